//! Shared helpers for flow implementations (token-endpoint exchanges, response parsing).

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::HandshakeError,
	flows::Broker,
	http::{HttpMethod, SessionHttpClient, WireRequest},
	oauth::{self, HandshakeStep, OauthParams, Signer},
	provider::{HandshakeErrorContext, HandshakeErrorKind},
};

/// Executes one signed token-endpoint exchange and parses the form-encoded response.
///
/// `params` carries the protocol parameters specific to the step (`oauth_callback`,
/// `oauth_verifier`); they ride in the query string and participate in the signature.
pub(crate) async fn exchange_token<C>(
	broker: &Broker<C>,
	step: HandshakeStep,
	endpoint: &Url,
	token: Option<(&str, &TokenSecret)>,
	mut params: BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>>
where
	C: ?Sized + SessionHttpClient,
{
	broker.strategy.augment_token_request(step, &mut params);

	let mut url = endpoint.clone();

	{
		let mut query = url.query_pairs_mut();

		for (key, value) in &params {
			query.append_pair(key, value);
		}
	}

	let mut signer = Signer::new(&broker.credentials);

	if let Some((request_token, secret)) = token {
		signer = signer.token(request_token, secret);
	}

	let authorization = signer.authorization(HttpMethod::Get, &url, &OauthParams::generate())?;
	let response = broker
		.http_client
		.execute(WireRequest { method: HttpMethod::Get, url, authorization })
		.await
		.map_err(Error::from)?;

	if !response.is_success() {
		return Err(classify_endpoint_failure(broker, step, response.status, response.body));
	}

	Ok(oauth::parse_form_response(&response.body))
}

/// Maps a non-success token-endpoint response through the provider strategy.
pub(crate) fn classify_endpoint_failure<C>(
	broker: &Broker<C>,
	step: HandshakeStep,
	status: u16,
	body: String,
) -> Error
where
	C: ?Sized + SessionHttpClient,
{
	let context = HandshakeErrorContext::new(step, status).with_body_preview(&body);

	match broker.strategy.classify_handshake_error(&context) {
		HandshakeErrorKind::VerifierRejected => {
			let reason = context
				.body_preview
				.filter(|preview| !preview.trim().is_empty())
				.unwrap_or_else(|| format!("the {step} endpoint answered with status {status}"));

			Error::VerifierInvalid { reason }
		},
		HandshakeErrorKind::Endpoint => HandshakeError::Endpoint { step, status, body }.into(),
	}
}

/// Extracts a required parameter from a parsed token-endpoint response.
pub(crate) fn require_param(
	step: HandshakeStep,
	params: &BTreeMap<String, String>,
	name: &'static str,
) -> Result<String> {
	params.get(name).cloned().ok_or_else(|| HandshakeError::MissingParameter { step, name }.into())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn missing_parameters_name_the_step_and_field() {
		let params = BTreeMap::from([("oauth_token".to_owned(), "token".to_owned())]);

		assert_eq!(
			require_param(HandshakeStep::AccessToken, &params, "oauth_token")
				.expect("Present parameter should be extracted."),
			"token"
		);

		let err = require_param(HandshakeStep::AccessToken, &params, "oauth_token_secret")
			.expect_err("Absent parameter should be rejected.");

		assert_eq!(
			err.to_string(),
			"The access_token response is missing `oauth_token_secret`."
		);
	}
}
