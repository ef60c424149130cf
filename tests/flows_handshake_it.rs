#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use oauth1_broker::{
	_preludet::*,
	auth::{Environment, ProviderId, TokenRecord},
	error::HandshakeError,
	oauth::HandshakeStep,
	provider::ProviderDescriptor,
	store::BrokerStore,
};

const CONSUMER_KEY: &str = "consumer-it";
const CONSUMER_SECRET: &str = "secret-it";

fn build_descriptor(server: &MockServer) -> ProviderDescriptor {
	let url = |path: &str| {
		Url::parse(&server.url(path)).expect("Mock endpoint should parse successfully.")
	};
	let provider_id =
		ProviderId::new("mock-broker").expect("Provider identifier should be valid for tests.");
	let mut builder = ProviderDescriptor::builder(provider_id);

	for environment in Environment::ALL {
		let prefix = environment.as_str();

		builder = builder
			.request_token_endpoint(environment, url(&format!("/{prefix}/oauth/request_token")))
			.access_token_endpoint(environment, url(&format!("/{prefix}/oauth/access_token")))
			.authorize_endpoint(environment, url(&format!("/{prefix}/authorize")))
			.api_base(environment, url(&format!("/{prefix}/api/")));
	}

	builder.build().expect("Provider descriptor should build successfully.")
}

#[tokio::test]
async fn load_saved_session_on_an_empty_store_is_absent_without_network() {
	let server = MockServer::start_async().await;
	let catch_all = server.mock_async(|_, then| {
		then.status(500);
	})
	.await;
	let (broker, _) = build_reqwest_test_broker(build_descriptor(&server), CONSUMER_KEY, CONSUMER_SECRET);

	for environment in Environment::ALL {
		let session = broker
			.load_saved_session(environment)
			.await
			.expect("Loading from an empty store should not fail.");

		assert!(session.is_none());
	}

	assert_eq!(catch_all.hits_async().await, 0);
}

#[tokio::test]
async fn handshake_round_trip_persists_the_access_token() {
	let server = MockServer::start_async().await;
	let descriptor = build_descriptor(&server);
	let authorize_endpoint = descriptor.endpoints(Environment::Sandbox).authorize.clone();
	let (broker, store) = build_reqwest_test_broker(descriptor, CONSUMER_KEY, CONSUMER_SECRET);
	let request_token_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/sandbox/oauth/request_token")
				.query_param("oauth_callback", "oob")
				.header_exists("authorization");
			then.status(200)
				.header("content-type", "application/x-www-form-urlencoded")
				.body("oauth_token=req-token&oauth_token_secret=req-secret&oauth_callback_confirmed=true");
		})
		.await;
	let handshake = broker
		.start_authorization(Environment::Sandbox)
		.await
		.expect("Request-token leg should succeed.");

	request_token_mock.assert_async().await;

	assert_eq!(handshake.environment, Environment::Sandbox);
	assert_eq!(handshake.request_token().token, "req-token");
	assert!(handshake.api_base.as_str().ends_with("/sandbox/api/"));
	assert!(handshake.authorize_url.as_str().starts_with(authorize_endpoint.as_str()));

	let pairs: BTreeMap<_, _> = handshake.authorize_url.query_pairs().into_owned().collect();

	assert_eq!(pairs.get("key").map(String::as_str), Some(CONSUMER_KEY));
	assert_eq!(pairs.get("token").map(String::as_str), Some("req-token"));

	let access_token_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/sandbox/oauth/access_token")
				.query_param("oauth_verifier", "PIN123")
				.header_exists("authorization");
			then.status(200)
				.header("content-type", "application/x-www-form-urlencoded")
				.body("oauth_token=access-token&oauth_token_secret=access-secret");
		})
		.await;
	let session = broker
		.complete_authorization(&handshake, "PIN123")
		.await
		.expect("Verifier exchange should succeed.");

	access_token_mock.assert_async().await;

	assert_eq!(session.environment(), Environment::Sandbox);
	assert_eq!(session.record().access_token.expose(), "access-token");
	assert_eq!(session.record().access_secret.expose(), "access-secret");

	let stored = store
		.fetch(Environment::Sandbox)
		.await
		.expect("Token store fetch should succeed.")
		.expect("A record should be persisted after completion.");

	assert_eq!(&stored, session.record());

	let reloaded = broker
		.load_saved_session(Environment::Sandbox)
		.await
		.expect("Loading a persisted session should succeed.")
		.expect("A persisted session should be present.");

	assert_eq!(reloaded.record(), session.record());
}

#[tokio::test]
async fn empty_verifier_is_rejected_before_any_io() {
	let server = MockServer::start_async().await;
	let (broker, store) = build_reqwest_test_broker(build_descriptor(&server), CONSUMER_KEY, CONSUMER_SECRET);
	let request_token_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/sandbox/oauth/request_token");
			then.status(200)
				.header("content-type", "application/x-www-form-urlencoded")
				.body("oauth_token=req-token&oauth_token_secret=req-secret&oauth_callback_confirmed=true");
		})
		.await;
	let access_token_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/sandbox/oauth/access_token");
			then.status(200)
				.header("content-type", "application/x-www-form-urlencoded")
				.body("oauth_token=should-not&oauth_token_secret=be-reached");
		})
		.await;
	let handshake = broker
		.start_authorization(Environment::Sandbox)
		.await
		.expect("Request-token leg should succeed.");

	request_token_mock.assert_async().await;

	let err = broker
		.complete_authorization(&handshake, "   ")
		.await
		.expect_err("A blank verifier should be rejected.");

	assert!(matches!(err, Error::VerifierInvalid { .. }));
	assert_eq!(access_token_mock.hits_async().await, 0);
	assert!(
		store
			.fetch(Environment::Sandbox)
			.await
			.expect("Token store fetch should succeed.")
			.is_none()
	);
}

#[tokio::test]
async fn rejected_verifier_maps_to_verifier_invalid() {
	let server = MockServer::start_async().await;
	let (broker, _) = build_reqwest_test_broker(build_descriptor(&server), CONSUMER_KEY, CONSUMER_SECRET);
	let _request_token_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/sandbox/oauth/request_token");
			then.status(200)
				.header("content-type", "application/x-www-form-urlencoded")
				.body("oauth_token=req-token&oauth_token_secret=req-secret&oauth_callback_confirmed=true");
		})
		.await;
	let _access_token_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/sandbox/oauth/access_token");
			then.status(401).body("oauth_problem=verifier_invalid");
		})
		.await;
	let handshake = broker
		.start_authorization(Environment::Sandbox)
		.await
		.expect("Request-token leg should succeed.");
	let err = broker
		.complete_authorization(&handshake, "WRONG")
		.await
		.expect_err("A rejected verifier should fail.");

	match err {
		Error::VerifierInvalid { reason } => assert!(reason.contains("verifier_invalid")),
		other => panic!("Expected VerifierInvalid, got {other:?}"),
	}
}

#[tokio::test]
async fn unconfirmed_callback_fails_the_request_token_leg() {
	let server = MockServer::start_async().await;
	let (broker, _) = build_reqwest_test_broker(build_descriptor(&server), CONSUMER_KEY, CONSUMER_SECRET);
	let _request_token_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/sandbox/oauth/request_token");
			then.status(200)
				.header("content-type", "application/x-www-form-urlencoded")
				.body("oauth_token=req-token&oauth_token_secret=req-secret");
		})
		.await;
	let err = broker
		.start_authorization(Environment::Sandbox)
		.await
		.expect_err("A response without callback confirmation should fail.");

	assert!(matches!(err, Error::Handshake(HandshakeError::CallbackUnconfirmed)));
}

#[tokio::test]
async fn endpoint_failures_surface_status_and_step() {
	let server = MockServer::start_async().await;
	let (broker, _) = build_reqwest_test_broker(build_descriptor(&server), CONSUMER_KEY, CONSUMER_SECRET);
	let _request_token_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/sandbox/oauth/request_token");
			then.status(503).body("service unavailable");
		})
		.await;
	let err = broker
		.start_authorization(Environment::Sandbox)
		.await
		.expect_err("A 503 from the endpoint should fail the leg.");

	match err {
		Error::Handshake(HandshakeError::Endpoint { step, status, body }) => {
			assert_eq!(step, HandshakeStep::RequestToken);
			assert_eq!(status, 503);
			assert_eq!(body, "service unavailable");
		},
		other => panic!("Expected an endpoint error, got {other:?}"),
	}
}

#[tokio::test]
async fn revoke_on_an_absent_record_is_a_no_op() {
	let server = MockServer::start_async().await;
	let catch_all = server.mock_async(|_, then| {
		then.status(500);
	})
	.await;
	let (broker, store) = build_reqwest_test_broker(build_descriptor(&server), CONSUMER_KEY, CONSUMER_SECRET);

	broker.revoke(Environment::Production).await.expect("Revoking nothing should succeed.");

	assert!(
		store
			.fetch(Environment::Production)
			.await
			.expect("Token store fetch should succeed.")
			.is_none()
	);
	assert_eq!(catch_all.hits_async().await, 0);
}

#[tokio::test]
async fn failed_completion_keeps_the_previous_record() {
	let server = MockServer::start_async().await;
	let (broker, store) = build_reqwest_test_broker(build_descriptor(&server), CONSUMER_KEY, CONSUMER_SECRET);
	let old_record = TokenRecord::new(Environment::Sandbox, "old-token", "old-secret");

	store.save(old_record.clone()).await.expect("Seeding the store should succeed.");

	let _request_token_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/sandbox/oauth/request_token");
			then.status(200)
				.header("content-type", "application/x-www-form-urlencoded")
				.body("oauth_token=req-token&oauth_token_secret=req-secret&oauth_callback_confirmed=true");
		})
		.await;
	let _access_token_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/sandbox/oauth/access_token");
			then.status(401).body("oauth_problem=verifier_invalid");
		})
		.await;
	let handshake = broker
		.start_authorization(Environment::Sandbox)
		.await
		.expect("Forced re-auth should still obtain a request token.");

	broker
		.complete_authorization(&handshake, "BADPIN")
		.await
		.expect_err("The rejected verifier should fail the completion.");

	let reloaded = broker
		.load_saved_session(Environment::Sandbox)
		.await
		.expect("Loading after a failed completion should succeed.")
		.expect("The previous record should still be loadable.");

	assert_eq!(reloaded.record(), &old_record);

	let revoked = broker.revoke(Environment::Sandbox).await;

	assert!(revoked.is_ok());
	assert!(
		store
			.fetch(Environment::Sandbox)
			.await
			.expect("Token store fetch should succeed.")
			.is_none()
	);
}

#[tokio::test]
async fn environments_keep_separate_records() {
	let server = MockServer::start_async().await;
	let (broker, store) = build_reqwest_test_broker(build_descriptor(&server), CONSUMER_KEY, CONSUMER_SECRET);

	store
		.save(TokenRecord::new(Environment::Sandbox, "sandbox-token", "sandbox-secret"))
		.await
		.expect("Seeding the sandbox record should succeed.");

	let sandbox = broker
		.load_saved_session(Environment::Sandbox)
		.await
		.expect("Loading the sandbox session should succeed.")
		.expect("The sandbox session should be present.");

	assert_eq!(sandbox.record().access_token.expose(), "sandbox-token");
	assert!(
		broker
			.load_saved_session(Environment::Production)
			.await
			.expect("Loading the production session should succeed.")
			.is_none()
	);

	broker.revoke(Environment::Sandbox).await.expect("Revoking the sandbox should succeed.");

	assert!(
		store
			.fetch(Environment::Sandbox)
			.await
			.expect("Token store fetch should succeed.")
			.is_none()
	);
}
