//! Typed market-data results and the raw wire shapes they parse from.
//!
//! The provider's JSON is inconsistent about field casing across endpoints and API
//! revisions (`Bid` next to `bid`, pair-level `StrikePrice` next to leg-level
//! `strikePrice`), so the raw structs accept both spellings via serde aliases and the
//! conversions normalize into one domain shape.

// crates.io
use time::{Date, Month, error::ComponentRange};
// self
use crate::{_prelude::*, error::DecodeError};

/// One symbol match returned by the lookup endpoint.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductMatch {
	/// Ticker symbol.
	pub symbol: String,
	/// Company or instrument description.
	pub description: String,
	/// Instrument classification reported by the provider.
	pub security_type: Option<String>,
}

/// One option expiration date, parsed from the provider's calendar components.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExpiryDate {
	/// Calendar date of the expiry.
	pub date: Date,
	/// Expiry classification reported by the provider (such as `MONTHLY`).
	pub expiry_type: Option<String>,
}
impl ExpiryDate {
	/// Creates an expiry from calendar components.
	pub fn from_calendar(year: i32, month: u8, day: u8) -> Result<Self, ComponentRange> {
		let month = Month::try_from(month)?;
		let date = Date::from_calendar_date(year, month, day)?;

		Ok(Self { date, expiry_type: None })
	}

	/// Renders the expiry in the compact `YYYYMMDD` form the dashboard exchanges.
	pub fn compact(&self) -> String {
		format!("{:04}{:02}{:02}", self.date.year(), u8::from(self.date.month()), self.date.day())
	}
}
impl Display for ExpiryDate {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{:04}-{:02}-{:02}", self.date.year(), u8::from(self.date.month()), self.date.day())
	}
}

/// Option chain for one symbol and expiry, grouped into CALL and PUT collections.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct OptionChain {
	/// Call legs in the provider's strike order.
	pub calls: Vec<OptionQuote>,
	/// Put legs in the provider's strike order.
	pub puts: Vec<OptionQuote>,
}
impl OptionChain {
	/// `true` when the provider reported no option pairs at all.
	pub fn is_empty(&self) -> bool {
		self.calls.is_empty() && self.puts.is_empty()
	}
}

/// One option leg of a chain.
///
/// Every market field is optional because sandbox payloads routinely omit them.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OptionQuote {
	/// Option symbol.
	pub symbol: Option<String>,
	/// Contract category (such as `STANDARD`).
	pub option_category: Option<String>,
	/// Strike price, backfilled from the pair level when the leg omits its own.
	pub strike_price: Option<f64>,
	/// Current bid.
	pub bid: Option<f64>,
	/// Current ask.
	pub ask: Option<f64>,
	/// Last traded price.
	pub last_price: Option<f64>,
	/// Implied volatility, falling back to the greeks block when absent at the top level.
	pub implied_volatility: Option<f64>,
	/// Open interest.
	pub open_interest: Option<u64>,
	/// Traded volume.
	pub volume: Option<u64>,
}

/// Quote data for one symbol, flattened from the provider's nested envelope.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Quote {
	/// Ticker symbol.
	pub symbol: String,
	/// Security type reported by the provider (such as `EQ`).
	pub security_type: Option<String>,
	/// Company name.
	pub company_name: Option<String>,
	/// Last trade price.
	pub last_trade: Option<f64>,
	/// Current bid.
	pub bid: Option<f64>,
	/// Current ask.
	pub ask: Option<f64>,
	/// Change versus the prior close.
	pub change_close: Option<f64>,
	/// Total traded volume.
	pub total_volume: Option<u64>,
	/// Quote status label (such as `REALTIME` or `DELAYED`).
	pub quote_status: Option<String>,
	/// Provider timestamp string, passed through untouched.
	pub date_time: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawLookupEnvelope {
	#[serde(rename = "LookupResponse", default)]
	response: RawLookupResponse,
}
impl RawLookupEnvelope {
	pub(super) fn into_matches(self) -> Vec<ProductMatch> {
		self.response.data.into_iter().map(ProductMatch::from).collect()
	}
}

#[derive(Debug, Default, Deserialize)]
struct RawLookupResponse {
	#[serde(rename = "Data", default)]
	data: Vec<RawLookupData>,
}

#[derive(Debug, Deserialize)]
struct RawLookupData {
	#[serde(default)]
	symbol: String,
	#[serde(default)]
	description: String,
	#[serde(rename = "type")]
	security_type: Option<String>,
}
impl From<RawLookupData> for ProductMatch {
	fn from(raw: RawLookupData) -> Self {
		Self { symbol: raw.symbol, description: raw.description, security_type: raw.security_type }
	}
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawExpireDateEnvelope {
	#[serde(rename = "OptionExpireDateResponse", default)]
	response: RawExpireDateResponse,
}
impl RawExpireDateEnvelope {
	pub(super) fn into_dates(self, endpoint: &'static str) -> Result<Vec<ExpiryDate>> {
		self.response.dates.into_iter().map(|raw| raw.into_expiry(endpoint)).collect()
	}
}

#[derive(Debug, Default, Deserialize)]
struct RawExpireDateResponse {
	#[serde(rename = "ExpirationDate", default)]
	dates: Vec<RawExpirationDate>,
}

#[derive(Debug, Deserialize)]
struct RawExpirationDate {
	year: i32,
	month: u8,
	day: u8,
	#[serde(rename = "expiryType")]
	expiry_type: Option<String>,
}
impl RawExpirationDate {
	fn into_expiry(self, endpoint: &'static str) -> Result<ExpiryDate> {
		let month =
			Month::try_from(self.month).map_err(|source| DecodeError::Date { endpoint, source })?;
		let date = Date::from_calendar_date(self.year, month, self.day)
			.map_err(|source| DecodeError::Date { endpoint, source })?;

		Ok(ExpiryDate { date, expiry_type: self.expiry_type })
	}
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawOptionChainEnvelope {
	#[serde(rename = "OptionChainResponse", default)]
	response: RawOptionChainResponse,
}
impl RawOptionChainEnvelope {
	pub(super) fn into_chain(self) -> OptionChain {
		let mut chain = OptionChain::default();

		for pair in self.response.pairs {
			let strike = pair.strike_price;

			if let Some(leg) = pair.call {
				chain.calls.push(leg.into_quote(strike));
			}
			if let Some(leg) = pair.put {
				chain.puts.push(leg.into_quote(strike));
			}
		}

		chain
	}
}

#[derive(Debug, Default, Deserialize)]
struct RawOptionChainResponse {
	#[serde(rename = "OptionPair", alias = "optionPair", default)]
	pairs: Vec<RawOptionPair>,
}

#[derive(Debug, Deserialize)]
struct RawOptionPair {
	#[serde(rename = "Call", alias = "call")]
	call: Option<RawOptionLeg>,
	#[serde(rename = "Put", alias = "put")]
	put: Option<RawOptionLeg>,
	#[serde(rename = "StrikePrice", alias = "strikePrice")]
	strike_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawOptionLeg {
	symbol: Option<String>,
	#[serde(rename = "optionCategory", alias = "OptionCategory")]
	option_category: Option<String>,
	#[serde(rename = "strikePrice", alias = "StrikePrice")]
	strike_price: Option<f64>,
	#[serde(alias = "Bid")]
	bid: Option<f64>,
	#[serde(alias = "Ask")]
	ask: Option<f64>,
	#[serde(rename = "lastPrice", alias = "LastPrice")]
	last_price: Option<f64>,
	#[serde(rename = "ImpliedVolatility", alias = "impliedVolatility")]
	implied_volatility: Option<f64>,
	#[serde(rename = "openInterest", alias = "OpenInterest")]
	open_interest: Option<u64>,
	#[serde(alias = "Volume")]
	volume: Option<u64>,
	#[serde(rename = "OptionGreeks", alias = "optionGreeks")]
	greeks: Option<RawOptionGreeks>,
}
impl RawOptionLeg {
	fn into_quote(self, pair_strike: Option<f64>) -> OptionQuote {
		let implied_volatility =
			self.implied_volatility.or_else(|| self.greeks.and_then(|greeks| greeks.iv));

		OptionQuote {
			symbol: self.symbol,
			option_category: self.option_category,
			strike_price: self.strike_price.or(pair_strike),
			bid: self.bid,
			ask: self.ask,
			last_price: self.last_price,
			implied_volatility,
			open_interest: self.open_interest,
			volume: self.volume,
		}
	}
}

#[derive(Debug, Deserialize)]
struct RawOptionGreeks {
	iv: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawQuoteEnvelope {
	#[serde(rename = "QuoteResponse", default)]
	response: RawQuoteResponse,
}
impl RawQuoteEnvelope {
	pub(super) fn into_quotes(self) -> Vec<Quote> {
		self.response.data.into_iter().map(Quote::from).collect()
	}
}

#[derive(Debug, Default, Deserialize)]
struct RawQuoteResponse {
	#[serde(rename = "QuoteData", default)]
	data: Vec<RawQuoteData>,
}

#[derive(Debug, Deserialize)]
struct RawQuoteData {
	#[serde(rename = "dateTime")]
	date_time: Option<String>,
	#[serde(rename = "quoteStatus")]
	quote_status: Option<String>,
	#[serde(rename = "Product")]
	product: Option<RawQuoteProduct>,
	#[serde(rename = "All")]
	all: Option<RawQuoteAll>,
}
impl From<RawQuoteData> for Quote {
	fn from(raw: RawQuoteData) -> Self {
		let product = raw.product.unwrap_or_default();
		let all = raw.all.unwrap_or_default();

		Self {
			symbol: product.symbol.unwrap_or_default(),
			security_type: product.security_type,
			company_name: all.company_name,
			last_trade: all.last_trade,
			bid: all.bid,
			ask: all.ask,
			change_close: all.change_close,
			total_volume: all.total_volume,
			quote_status: raw.quote_status,
			date_time: raw.date_time,
		}
	}
}

#[derive(Debug, Default, Deserialize)]
struct RawQuoteProduct {
	symbol: Option<String>,
	#[serde(rename = "securityType")]
	security_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawQuoteAll {
	#[serde(rename = "companyName")]
	company_name: Option<String>,
	#[serde(rename = "lastTrade")]
	last_trade: Option<f64>,
	bid: Option<f64>,
	ask: Option<f64>,
	#[serde(rename = "changeClose")]
	change_close: Option<f64>,
	#[serde(rename = "totalVolume")]
	total_volume: Option<u64>,
}
