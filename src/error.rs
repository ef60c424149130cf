//! Broker-level error types shared across flows, the market client, and stores.

// self
use crate::{_prelude::*, oauth::HandshakeStep};

/// Broker-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical broker error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Token endpoint rejected or mangled a handshake step.
	#[error(transparent)]
	Handshake(#[from] HandshakeError),
	/// Market data endpoint answered with a non-success status.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// Successful response carried a payload the crate could not decode.
	#[error(transparent)]
	Decode(#[from] DecodeError),

	/// Verifier/PIN was empty or rejected by the provider.
	#[error("Verifier was not accepted: {reason}.")]
	VerifierInvalid {
		/// Provider- or broker-supplied reason string.
		reason: String,
	},
}

/// Configuration and validation failures raised by the broker.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Endpoint URL cannot be parsed.
	#[error("Endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Consumer credential field was empty.
	#[error("Consumer {field} must not be empty.")]
	MissingCredential {
		/// Credential field name (key, secret).
		field: &'static str,
	},
	/// Signing key was rejected by the HMAC backend.
	#[error("Signing key was rejected by the HMAC backend.")]
	SigningKey,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the brokerage endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the brokerage endpoint.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Failures produced while exchanging OAuth 1.0a handshake tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum HandshakeError {
	/// Token endpoint answered with a non-success status.
	#[error("The {step} endpoint answered with status {status}.")]
	Endpoint {
		/// Handshake step that failed.
		step: HandshakeStep,
		/// HTTP status code returned by the endpoint.
		status: u16,
		/// Raw response body, unmodified.
		body: String,
	},
	/// Token endpoint response omitted a required OAuth parameter.
	#[error("The {step} response is missing `{name}`.")]
	MissingParameter {
		/// Handshake step whose response was incomplete.
		step: HandshakeStep,
		/// Name of the absent parameter.
		name: &'static str,
	},
	/// Provider did not confirm the out-of-band callback.
	#[error("The request token response did not confirm the callback.")]
	CallbackUnconfirmed,
}

/// Non-success answer from a signed market data call.
///
/// Status code and body text are preserved exactly as the provider sent them so
/// callers can render or log the original failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
#[error("API call failed with status {status}.")]
pub struct ApiError {
	/// HTTP status code returned by the endpoint.
	pub status: u16,
	/// Raw response body, unmodified.
	pub body: String,
}
impl ApiError {
	/// Creates a new error for the provided status and body.
	pub fn new(status: u16, body: impl Into<String>) -> Self {
		Self { status, body: body.into() }
	}
}

/// Decoding failures for successful-status payloads.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// JSON payload did not match the expected shape.
	#[error("The {endpoint} response returned malformed JSON.")]
	Json {
		/// Endpoint label for diagnostics.
		endpoint: &'static str,
		/// Structured parsing failure with the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Calendar components were outside their valid ranges.
	#[error("The {endpoint} response contained an out-of-range date.")]
	Date {
		/// Endpoint label for diagnostics.
		endpoint: &'static str,
		/// Underlying range failure.
		#[source]
		source: time::error::ComponentRange,
	},
}
