//! Transient request-token pair produced by the first handshake leg.

// self
use crate::{_prelude::*, auth::token::secret::TokenSecret};

/// Short-lived request token that authorizes exactly one verifier exchange.
///
/// The pair never touches a store; it lives only for the duration of one handshake.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestToken {
	/// Public token value embedded in the authorize URL.
	pub token: String,
	/// Secret that co-signs the access-token exchange.
	pub secret: TokenSecret,
}
impl RequestToken {
	/// Wraps the values returned by the request-token endpoint.
	pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
		Self { token: token.into(), secret: TokenSecret::new(secret) }
	}
}
