//! In-flight handshake state carried between the request-token leg and the verifier exchange.

// self
use crate::{
	_prelude::*,
	auth::{Environment, RequestToken},
	provider::ProviderEndpoints,
};

/// Handshake metadata returned by
/// [`Broker::start_authorization`](crate::flows::Broker::start_authorization).
///
/// Carries the request token pair between the two legs. Send the user to
/// [`Self::authorize_url`], collect the verification code the provider displays, and
/// feed it into [`Broker::complete_authorization`](crate::flows::Broker::complete_authorization).
#[derive(Clone, Debug)]
pub struct HandshakeSession {
	/// Environment the handshake targets.
	pub environment: Environment,
	/// Fully-formed HTTPS authorize URL that callers should send end-users to.
	pub authorize_url: Url,
	/// Base URL the issued session will sign data calls against.
	pub api_base: Url,
	request_token: RequestToken,
}
impl HandshakeSession {
	pub(super) fn new(
		environment: Environment,
		request_token: RequestToken,
		authorize_url: Url,
		api_base: Url,
	) -> Self {
		Self { environment, authorize_url, api_base, request_token }
	}

	/// Request token pair the provider issued for this handshake.
	pub fn request_token(&self) -> &RequestToken {
		&self.request_token
	}
}

pub(super) fn build_session(
	environment: Environment,
	endpoints: &ProviderEndpoints,
	consumer_key: &str,
	request_token: RequestToken,
) -> HandshakeSession {
	let authorize_url =
		build_authorize_url(&endpoints.authorize, consumer_key, &request_token.token);

	HandshakeSession::new(environment, request_token, authorize_url, endpoints.api_base.clone())
}

fn build_authorize_url(endpoint: &Url, consumer_key: &str, token: &str) -> Url {
	let mut url = endpoint.clone();
	let mut pairs = url.query_pairs_mut();

	pairs.append_pair("key", consumer_key);
	pairs.append_pair("token", token);

	drop(pairs);

	url
}
