//! Durable access-token records persisted per environment.

// self
use crate::{
	_prelude::*,
	auth::{Environment, token::secret::TokenSecret},
};

/// Immutable record describing the access credential issued for one environment.
///
/// The provider does not report an expiry; staleness is only discovered when a signed call is
/// rejected, so the record carries the issue instant instead of a lifetime.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
	/// Environment partition that owns this record.
	pub environment: Environment,
	/// Access token value; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Access token secret used to derive signing keys.
	pub access_secret: TokenSecret,
	/// Instant the handshake completed, stored as a Unix timestamp.
	#[serde(with = "time::serde::timestamp")]
	pub issued_at: OffsetDateTime,
}
impl TokenRecord {
	/// Creates a record stamped with the current clock.
	pub fn new(
		environment: Environment,
		access_token: impl Into<String>,
		access_secret: impl Into<String>,
	) -> Self {
		Self {
			environment,
			access_token: TokenSecret::new(access_token),
			access_secret: TokenSecret::new(access_secret),
			issued_at: OffsetDateTime::now_utc(),
		}
	}

	/// Overrides the issued-at instant.
	pub fn issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = instant;

		self
	}
}
impl Debug for TokenRecord {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenRecord")
			.field("environment", &self.environment)
			.field("access_token", &"<redacted>")
			.field("access_secret", &"<redacted>")
			.field("issued_at", &self.issued_at)
			.finish()
	}
}
