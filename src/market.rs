//! Session consumer for the provider's market-data REST endpoints.
//!
//! Every operation issues one OAuth-signed GET on behalf of an authenticated
//! [`Session`] and maps the JSON payload into typed results. Non-success statuses
//! surface as [`ApiError`] with the body text unmodified; empty result sets parse
//! into empty collections rather than errors so callers can distinguish "no data"
//! from "call failed".

pub mod model;
pub use model::*;

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::Session,
	error::{ApiError, ConfigError, DecodeError},
	http::{HttpMethod, SessionHttpClient, WireRequest},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Market client specialized for the crate's default reqwest transport stack.
pub type ReqwestMarketClient = MarketClient<ReqwestHttpClient>;

/// Issues signed market-data calls using a [`Session`] produced by the broker.
#[derive(Clone)]
pub struct MarketClient<C>
where
	C: ?Sized + SessionHttpClient,
{
	/// Session whose access token signs every request.
	pub session: Session,
	/// HTTP client wrapper used for every outbound call.
	pub http_client: Arc<C>,
}
impl<C> MarketClient<C>
where
	C: ?Sized + SessionHttpClient,
{
	/// Creates a market client that reuses the caller-provided transport.
	pub fn with_http_client(session: Session, http_client: impl Into<Arc<C>>) -> Self {
		Self { session, http_client: http_client.into() }
	}

	/// Searches the provider's symbol directory.
	///
	/// Zero matches deserialize into an empty vector.
	pub async fn lookup(&self, search: &str) -> Result<Vec<ProductMatch>> {
		let url = self.endpoint_url(&format!("v1/market/lookup/{search}.json"))?;
		let envelope: model::RawLookupEnvelope = self.fetch("lookup", url).await?;

		Ok(envelope.into_matches())
	}

	/// Lists the option expiration dates available for a symbol.
	pub async fn option_expire_dates(&self, symbol: &str) -> Result<Vec<ExpiryDate>> {
		const ENDPOINT: &str = "option_expire_dates";

		let mut url = self.endpoint_url("v1/market/optionexpiredate.json")?;

		url.query_pairs_mut().append_pair("symbol", symbol);

		let envelope: model::RawExpireDateEnvelope = self.fetch(ENDPOINT, url).await?;

		envelope.into_dates(ENDPOINT)
	}

	/// Retrieves the option chain for a symbol and expiry as CALL/PUT collections.
	///
	/// A chain with zero option pairs yields empty `calls` and `puts` vectors.
	pub async fn option_chain(&self, query: OptionChainQuery) -> Result<OptionChain> {
		let mut url = self.endpoint_url("v1/market/optionchains.json")?;

		{
			let mut pairs = url.query_pairs_mut();

			pairs.append_pair("symbol", &query.symbol);
			pairs.append_pair("expiryDate", &query.expiry.to_string());
			pairs.append_pair("includeWeekly", bool_str(query.include_weekly));
			pairs.append_pair("skipAdjusted", bool_str(query.skip_adjusted));
		}

		let envelope: model::RawOptionChainEnvelope = self.fetch("option_chain", url).await?;

		Ok(envelope.into_chain())
	}

	/// Fetches quotes for one symbol or a comma-separated list of symbols.
	pub async fn quote(&self, symbols: &str) -> Result<Vec<Quote>> {
		let url = self.endpoint_url(&format!("v1/market/quote/{symbols}.json"))?;
		let envelope: model::RawQuoteEnvelope = self.fetch("quote", url).await?;

		Ok(envelope.into_quotes())
	}

	fn endpoint_url(&self, path: &str) -> Result<Url> {
		Ok(self
			.session
			.api_base()
			.join(path)
			.map_err(|source| ConfigError::InvalidEndpoint { source })?)
	}

	async fn fetch<T>(&self, endpoint: &'static str, url: Url) -> Result<T>
	where
		T: DeserializeOwned,
	{
		const KIND: FlowKind = FlowKind::MarketData;

		let span = FlowSpan::new(KIND, endpoint);

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let authorization = self.session.authorization(HttpMethod::Get, &url)?;
				let response = self
					.http_client
					.execute(WireRequest { method: HttpMethod::Get, url, authorization })
					.await
					.map_err(Error::from)?;

				if !response.is_success() {
					return Err(ApiError::new(response.status, response.body).into());
				}

				let mut deserializer = serde_json::Deserializer::from_str(&response.body);

				serde_path_to_error::deserialize(&mut deserializer)
					.map_err(|source| DecodeError::Json { endpoint, source }.into())
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}
#[cfg(feature = "reqwest")]
impl MarketClient<ReqwestHttpClient> {
	/// Creates a market client backed by a default reqwest transport.
	pub fn new(session: Session) -> Self {
		Self::with_http_client(session, ReqwestHttpClient::default())
	}
}
impl<C> Debug for MarketClient<C>
where
	C: ?Sized + SessionHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("MarketClient").field("session", &self.session).finish()
	}
}

/// Parameters for [`MarketClient::option_chain`].
///
/// The weekly/adjusted filters default to the dashboard's behavior (weekly series
/// included, adjusted contracts skipped).
#[derive(Clone, Debug)]
pub struct OptionChainQuery {
	/// Underlying symbol.
	pub symbol: String,
	/// Target expiration date.
	pub expiry: ExpiryDate,
	/// Includes weekly series when set.
	pub include_weekly: bool,
	/// Skips adjusted (non-standard) contracts when set.
	pub skip_adjusted: bool,
}
impl OptionChainQuery {
	/// Creates a query for the provided symbol and expiry with default filters.
	pub fn new(symbol: impl Into<String>, expiry: ExpiryDate) -> Self {
		Self { symbol: symbol.into(), expiry, include_weekly: true, skip_adjusted: true }
	}

	/// Overrides the weekly-series filter.
	pub fn include_weekly(mut self, include: bool) -> Self {
		self.include_weekly = include;

		self
	}

	/// Overrides the adjusted-contract filter.
	pub fn skip_adjusted(mut self, skip: bool) -> Self {
		self.skip_adjusted = skip;

		self
	}
}

fn bool_str(value: bool) -> &'static str {
	if value { "true" } else { "false" }
}
