//! Signed-request capability bound to one access token.

// self
use crate::{
	_prelude::*,
	auth::{ConsumerCredentials, Environment, TokenRecord},
	http::HttpMethod,
	oauth::{OauthParams, Signer},
};

/// Authenticated session combining consumer credentials with an issued access token.
///
/// Produced by a completed handshake or reloaded from a store; every signed market data call
/// borrows the session to render its `Authorization` header.
#[derive(Clone)]
pub struct Session {
	credentials: ConsumerCredentials,
	record: TokenRecord,
	api_base: Url,
}
impl Session {
	/// Binds a token record to the credentials and API base that will serve its calls.
	pub fn new(credentials: ConsumerCredentials, record: TokenRecord, api_base: Url) -> Self {
		Self { credentials, record, api_base }
	}

	/// Environment the session is bound to.
	pub fn environment(&self) -> Environment {
		self.record.environment
	}

	/// Base URL for signed data calls in this environment.
	pub fn api_base(&self) -> &Url {
		&self.api_base
	}

	/// Token record backing the session.
	pub fn record(&self) -> &TokenRecord {
		&self.record
	}

	/// Renders the `Authorization` header for the given request line.
	pub fn authorization(&self, method: HttpMethod, url: &Url) -> Result<String> {
		self.authorization_with(method, url, &OauthParams::generate())
	}

	/// Same as [`authorization`](Self::authorization) with caller-pinned signature inputs.
	pub fn authorization_with(
		&self,
		method: HttpMethod,
		url: &Url,
		params: &OauthParams,
	) -> Result<String> {
		Signer::new(&self.credentials)
			.token(self.record.access_token.expose(), &self.record.access_secret)
			.authorization(method, url, params)
	}
}
impl Debug for Session {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Session")
			.field("environment", &self.record.environment)
			.field("api_base", &self.api_base.as_str())
			.field("record", &self.record)
			.finish()
	}
}
