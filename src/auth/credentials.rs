//! Consumer credential pair issued by the brokerage for one registered application.

// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// Validated consumer key and secret.
///
/// Both values must be non-empty; the secret is redacted from [`Debug`] output.
#[derive(Clone, PartialEq, Eq)]
pub struct ConsumerCredentials {
	key: String,
	secret: TokenSecret,
}
impl ConsumerCredentials {
	/// Validates and wraps a consumer key and secret.
	pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Result<Self, ConfigError> {
		let key = key.into();
		let secret = secret.into();

		if key.trim().is_empty() {
			return Err(ConfigError::MissingCredential { field: "key" });
		}
		if secret.trim().is_empty() {
			return Err(ConfigError::MissingCredential { field: "secret" });
		}

		Ok(Self { key, secret: TokenSecret::new(secret) })
	}

	/// The consumer key sent as `oauth_consumer_key`.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// The consumer secret used to derive signing keys.
	pub fn secret(&self) -> &TokenSecret {
		&self.secret
	}
}
impl Debug for ConsumerCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ConsumerCredentials")
			.field("key", &self.key)
			.field("secret", &self.secret)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn empty_key_is_rejected() {
		let err = ConsumerCredentials::new("", "secret").expect_err("Empty key must be rejected.");

		assert!(matches!(err, ConfigError::MissingCredential { field: "key" }));
	}

	#[test]
	fn blank_secret_is_rejected() {
		let err = ConsumerCredentials::new("key", "   ").expect_err("Blank secret must be rejected.");

		assert!(matches!(err, ConfigError::MissingCredential { field: "secret" }));
	}

	#[test]
	fn debug_redacts_the_secret() {
		let credentials = ConsumerCredentials::new("consumer-key", "consumer-secret")
			.expect("Credentials must validate.");
		let rendered = format!("{credentials:?}");

		assert!(rendered.contains("consumer-key"));
		assert!(!rendered.contains("consumer-secret"));
	}
}
