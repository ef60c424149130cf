//! OAuth 1.0a signing primitives shared by the handshake flows and the market client.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use rand::{Rng, distr::Alphanumeric};
use sha1::Sha1;
use url::Position;
// self
use crate::{
	_prelude::*,
	auth::{ConsumerCredentials, TokenSecret},
	error::ConfigError,
	http::HttpMethod,
};

type HmacSha1 = Hmac<Sha1>;

/// Signature method advertised in every `Authorization` header.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
/// Protocol version advertised in every `Authorization` header.
pub const OAUTH_VERSION: &str = "1.0";
/// Callback value for providers that hand the verifier to the user out of band.
pub const OOB_CALLBACK: &str = "oob";

const NONCE_LEN: usize = 32;

/// Handshake leg being executed, used to attribute token-endpoint failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandshakeStep {
	/// First leg obtaining the temporary request token.
	RequestToken,
	/// Final leg exchanging the verifier for an access token.
	AccessToken,
}
impl HandshakeStep {
	/// Stable label used in errors, spans, and metrics.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::RequestToken => "request_token",
			Self::AccessToken => "access_token",
		}
	}
}
impl Display for HandshakeStep {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Per-request signature inputs.
///
/// Generated fresh for every signed request; tests pin both fields to reproduce signatures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OauthParams {
	/// Unique nonce for this request.
	pub nonce: String,
	/// Unix timestamp for this request.
	pub timestamp: i64,
}
impl OauthParams {
	/// Generates a random nonce and stamps the current clock.
	pub fn generate() -> Self {
		let nonce = random_string(NONCE_LEN);

		Self { nonce, timestamp: OffsetDateTime::now_utc().unix_timestamp() }
	}
}

/// Renders signed `Authorization` headers for one consumer and an optional token pair.
#[derive(Clone)]
pub struct Signer<'a> {
	credentials: &'a ConsumerCredentials,
	token: Option<(&'a str, &'a TokenSecret)>,
}
impl<'a> Signer<'a> {
	/// Creates a signer backed by the consumer secret alone.
	pub fn new(credentials: &'a ConsumerCredentials) -> Self {
		Self { credentials, token: None }
	}

	/// Attaches a token pair so requests are co-signed with the token secret.
	pub fn token(mut self, token: &'a str, secret: &'a TokenSecret) -> Self {
		self.token = Some((token, secret));

		self
	}

	/// Renders the `Authorization` header for the given request line.
	///
	/// Query parameters carried by `url` are covered by the signature but stay on the URL; the
	/// header carries only the `oauth_*` protocol parameters and the signature.
	pub fn authorization(
		&self,
		method: HttpMethod,
		url: &Url,
		params: &OauthParams,
	) -> Result<String> {
		let timestamp = params.timestamp.to_string();
		let mut header_params = vec![
			("oauth_consumer_key", self.credentials.key()),
			("oauth_nonce", params.nonce.as_str()),
			("oauth_signature_method", SIGNATURE_METHOD),
			("oauth_timestamp", timestamp.as_str()),
		];

		if let Some((token, _)) = self.token {
			header_params.push(("oauth_token", token));
		}

		header_params.push(("oauth_version", OAUTH_VERSION));

		let mut pairs = header_params
			.iter()
			.map(|(key, value)| (percent_encode(key), percent_encode(value)))
			.collect::<Vec<_>>();

		pairs.extend(
			url.query_pairs().map(|(key, value)| (percent_encode(&key), percent_encode(&value))),
		);
		// Ordering is byte-wise over the encoded pairs, per RFC 5849 section 3.4.1.3.2.
		pairs.sort();

		let normalized =
			pairs.iter().map(|(key, value)| format!("{key}={value}")).collect::<Vec<_>>().join("&");
		let base = format!(
			"{}&{}&{}",
			method.as_str(),
			percent_encode(&url[..Position::AfterPath]),
			percent_encode(&normalized),
		);
		let signature = self.sign(&base)?;
		let mut header = String::from("OAuth ");

		for (index, (key, value)) in header_params.iter().enumerate() {
			if index > 0 {
				header.push_str(", ");
			}

			header.push_str(&format!("{key}=\"{}\"", percent_encode(value)));
		}

		header.push_str(&format!(", oauth_signature=\"{}\"", percent_encode(&signature)));

		Ok(header)
	}

	fn sign(&self, base: &str) -> Result<String> {
		let token_secret = self.token.map(|(_, secret)| secret.expose()).unwrap_or_default();
		let key = format!(
			"{}&{}",
			percent_encode(self.credentials.secret().expose()),
			percent_encode(token_secret),
		);
		let mut mac =
			HmacSha1::new_from_slice(key.as_bytes()).map_err(|_| ConfigError::SigningKey)?;

		mac.update(base.as_bytes());

		Ok(STANDARD.encode(mac.finalize().into_bytes()))
	}
}

/// Percent-encodes with the unreserved set required for signature material.
///
/// Unlike generic URL encoding this escapes everything outside `ALPHA`, `DIGIT`, `-`, `.`, `_`,
/// and `~`, including spaces and plus signs.
pub fn percent_encode(input: &str) -> String {
	let mut out = String::with_capacity(input.len());

	for byte in input.bytes() {
		match byte {
			b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' =>
				out.push(byte as char),
			_ => out.push_str(&format!("%{byte:02X}")),
		}
	}

	out
}

/// Parses a form-encoded token-endpoint response body into a key-value map.
pub fn parse_form_response(body: &str) -> BTreeMap<String, String> {
	url::form_urlencoded::parse(body.as_bytes()).into_owned().collect()
}

pub(crate) fn random_string(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn credentials() -> ConsumerCredentials {
		ConsumerCredentials::new("consumer-key", "consumer-secret")
			.expect("Credential fixture must validate.")
	}

	fn signature_of(header: &str) -> String {
		header
			.split(", ")
			.find_map(|part| part.strip_prefix("oauth_signature=\""))
			.map(|rest| rest.trim_end_matches('"').to_owned())
			.expect("Header must contain a signature.")
	}

	#[test]
	fn encodes_with_the_unreserved_set() {
		assert_eq!(percent_encode("abcXYZ019-._~"), "abcXYZ019-._~");
		assert_eq!(percent_encode("a b+c"), "a%20b%2Bc");
		assert_eq!(percent_encode("ä/&="), "%C3%A4%2F%26%3D");
		assert_eq!(percent_encode("100%"), "100%25");
	}

	#[test]
	fn signs_the_request_token_leg() {
		let url = Url::parse("https://api.example.com/oauth/request_token?oauth_callback=oob")
			.expect("URL fixture must parse.");
		let params = OauthParams { nonce: "abcdefghijklmnop".into(), timestamp: 1_755_850_000 };
		let header = Signer::new(&credentials())
			.authorization(HttpMethod::Get, &url, &params)
			.expect("Signing must succeed.");

		assert_eq!(signature_of(&header), percent_encode("Rs983MPjh6hF6ueBscjAtwj2v2Q="));
		assert!(header.starts_with("OAuth oauth_consumer_key=\"consumer-key\""));
		assert!(header.contains("oauth_signature_method=\"HMAC-SHA1\""));
		assert!(header.contains("oauth_version=\"1.0\""));
		assert!(!header.contains("oauth_callback"), "Query parameters must stay on the URL.");
	}

	#[test]
	fn signs_with_a_token_secret() {
		let url = Url::parse(
			"https://api.example.com/v1/market/optionchains.json?symbol=AAPL&expiryDate=2025-09-19",
		)
		.expect("URL fixture must parse.");
		let params = OauthParams { nonce: "abcdefghijklmnop".into(), timestamp: 1_755_850_000 };
		let access_secret = TokenSecret::new("access-secret");
		let header = Signer::new(&credentials())
			.token("access-token", &access_secret)
			.authorization(HttpMethod::Get, &url, &params)
			.expect("Signing must succeed.");

		assert_eq!(signature_of(&header), percent_encode("3d4+bOYXkvu6BuswQSV420eq8Rw="));
		assert!(header.contains("oauth_token=\"access-token\""));
		assert!(!header.contains("access-secret"), "Token secret must never appear.");
	}

	#[test]
	fn signs_the_verifier_exchange() {
		let url = Url::parse(
			"https://api.example.com/oauth/access_token?oauth_verifier=PIN123",
		)
		.expect("URL fixture must parse.");
		let params = OauthParams { nonce: "abcdefghijklmnop".into(), timestamp: 1_755_850_000 };
		let request_secret = TokenSecret::new("request-secret");
		let header = Signer::new(&credentials())
			.token("request-token", &request_secret)
			.authorization(HttpMethod::Get, &url, &params)
			.expect("Signing must succeed.");

		assert_eq!(signature_of(&header), percent_encode("I+aQ07vSrCYNlRkLg4e9IrSeUh4="));
	}

	#[test]
	fn generated_params_are_unique() {
		let first = OauthParams::generate();
		let second = OauthParams::generate();

		assert_eq!(first.nonce.len(), NONCE_LEN);
		assert_ne!(first.nonce, second.nonce);
	}

	#[test]
	fn parses_form_encoded_bodies() {
		let map = parse_form_response(
			"oauth_token=abc%3D&oauth_token_secret=def&oauth_callback_confirmed=true",
		);

		assert_eq!(map["oauth_token"], "abc=");
		assert_eq!(map["oauth_token_secret"], "def");
		assert_eq!(map["oauth_callback_confirmed"], "true");
	}

	#[test]
	fn handshake_steps_have_stable_labels() {
		assert_eq!(HandshakeStep::RequestToken.as_str(), "request_token");
		assert_eq!(HandshakeStep::AccessToken.to_string(), "access_token");
	}
}
