//! Three-legged handshake: request-token leg, authorize URL assembly, verifier exchange.

pub mod session;
pub use session::*;

// self
use crate::{
	_prelude::*,
	auth::{Environment, RequestToken, Session, TokenRecord},
	error::HandshakeError,
	flows::{Broker, common},
	http::SessionHttpClient,
	oauth::{self, HandshakeStep},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

impl<C> Broker<C>
where
	C: ?Sized + SessionHttpClient,
{
	/// Starts the three-legged handshake for an environment.
	///
	/// Obtains a fresh request token with an out-of-band callback and assembles the
	/// authorize URL. Nothing is persisted until [`Self::complete_authorization`]
	/// succeeds, so an existing record for the environment stays usable throughout.
	pub async fn start_authorization(&self, environment: Environment) -> Result<HandshakeSession> {
		const KIND: FlowKind = FlowKind::RequestToken;

		let span = FlowSpan::new(KIND, "start_authorization");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				const STEP: HandshakeStep = HandshakeStep::RequestToken;

				let endpoints = self.descriptor.endpoints(environment);
				let params =
					BTreeMap::from([("oauth_callback".to_owned(), oauth::OOB_CALLBACK.to_owned())]);
				let response =
					common::exchange_token(self, STEP, &endpoints.request_token, None, params)
						.await?;

				if response.get("oauth_callback_confirmed").map(String::as_str) != Some("true") {
					return Err(HandshakeError::CallbackUnconfirmed.into());
				}

				let token = common::require_param(STEP, &response, "oauth_token")?;
				let secret = common::require_param(STEP, &response, "oauth_token_secret")?;

				Ok(session::build_session(
					environment,
					endpoints,
					self.credentials.key(),
					RequestToken::new(token, secret),
				))
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}

	/// Completes the handshake by redeeming the verification code for an access token.
	///
	/// On success the token record is persisted for the handshake's environment and a
	/// ready-to-sign [`Session`] is returned. A blank verifier is rejected before any
	/// network or store activity.
	pub async fn complete_authorization(
		&self,
		handshake: &HandshakeSession,
		verifier: &str,
	) -> Result<Session> {
		const KIND: FlowKind = FlowKind::AccessToken;

		let span = FlowSpan::new(KIND, "complete_authorization");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				const STEP: HandshakeStep = HandshakeStep::AccessToken;

				let verifier = verifier.trim();

				if verifier.is_empty() {
					return Err(Error::VerifierInvalid {
						reason: "the verification code must not be empty".into(),
					});
				}

				let environment = handshake.environment;
				let endpoints = self.descriptor.endpoints(environment);
				let request_token = handshake.request_token();
				let params = BTreeMap::from([("oauth_verifier".to_owned(), verifier.to_owned())]);
				let response = common::exchange_token(
					self,
					STEP,
					&endpoints.access_token,
					Some((&request_token.token, &request_token.secret)),
					params,
				)
				.await?;
				let token = common::require_param(STEP, &response, "oauth_token")?;
				let secret = common::require_param(STEP, &response, "oauth_token_secret")?;
				let record = TokenRecord::new(environment, token, secret);

				self.store.save(record.clone()).await?;

				Ok(Session::new(self.credentials.clone(), record, endpoints.api_base.clone()))
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}
