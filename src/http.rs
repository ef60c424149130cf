//! Transport primitives for signed brokerage calls.
//!
//! [`SessionHttpClient`] is the broker's only dependency on an HTTP stack. Implementations
//! execute one already-signed request and resolve with the raw status and body; all
//! interpretation (token parsing, error classification, JSON decoding) stays in the broker.

// std
use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::AUTHORIZATION;
// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`SessionHttpClient`] implementations.
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<WireResponse, TransportError>> + 'a + Send>>;

/// HTTP method of a wire request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
	/// HTTP GET.
	Get,
	/// HTTP POST.
	Post,
}
impl HttpMethod {
	/// Uppercase method name used in signature base strings.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Post => "POST",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Fully signed request handed to the transport.
#[derive(Clone)]
pub struct WireRequest {
	/// HTTP method to execute.
	pub method: HttpMethod,
	/// Request URL including any query parameters covered by the signature.
	pub url: Url,
	/// Rendered `Authorization` header value.
	pub authorization: String,
}
impl Debug for WireRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("WireRequest")
			.field("method", &self.method)
			.field("url", &self.url.as_str())
			.field("authorization", &"<redacted>")
			.finish()
	}
}

/// Raw response surfaced by the transport.
#[derive(Clone, Debug)]
pub struct WireResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body, unmodified.
	pub body: String,
}
impl WireResponse {
	/// `true` when the status is in the 2xx range.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Abstraction over HTTP transports capable of executing signed brokerage calls.
///
/// Implementations must be `Send + Sync + 'static` so brokers and market clients can be shared
/// across tasks, and the returned futures must be `Send` for the lifetime of the in-flight
/// request.
pub trait SessionHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Executes one request and resolves with the raw status and body.
	///
	/// Implementations must not treat non-success statuses as transport failures; the broker
	/// classifies those itself.
	fn execute(&self, request: WireRequest) -> TransportFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Redirect following should stay disabled on custom clients; the token endpoints answer
/// directly and a redirect would strip the `Authorization` header.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl SessionHttpClient for ReqwestHttpClient {
	fn execute(&self, request: WireRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let builder = match request.method {
				HttpMethod::Get => client.get(request.url),
				HttpMethod::Post => client.post(request.url),
			};
			let response = builder
				.header(AUTHORIZATION, request.authorization)
				.send()
				.await
				.map_err(TransportError::from)?;
			let status = response.status().as_u16();
			let body = response.text().await.map_err(TransportError::from)?;

			Ok(WireResponse { status, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn methods_have_uppercase_names() {
		assert_eq!(HttpMethod::Get.as_str(), "GET");
		assert_eq!(HttpMethod::Post.to_string(), "POST");
	}

	#[test]
	fn success_covers_the_2xx_range() {
		assert!(!WireResponse { status: 199, body: String::new() }.is_success());
		assert!(WireResponse { status: 200, body: String::new() }.is_success());
		assert!(WireResponse { status: 299, body: String::new() }.is_success());
		assert!(!WireResponse { status: 301, body: String::new() }.is_success());
	}

	#[test]
	fn wire_request_debug_redacts_the_header() {
		let request = WireRequest {
			method: HttpMethod::Get,
			url: Url::parse("https://api.example.com/v1/market/quote/AAPL.json")
				.expect("URL fixture must parse."),
			authorization: "OAuth oauth_token=\"access-token\"".into(),
		};
		let rendered = format!("{request:?}");

		assert!(!rendered.contains("access-token"));
		assert!(rendered.contains("quote/AAPL.json"));
	}
}
