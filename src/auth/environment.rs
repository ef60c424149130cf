//! Deployment environments targeted by the broker.

// self
use crate::_prelude::*;

/// Deployment target selecting the provider endpoints and the token-store partition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
	/// Paper-trading sandbox.
	Sandbox,
	/// Live trading.
	Production,
}
impl Environment {
	/// Every environment, in partition order.
	pub const ALL: [Self; 2] = [Self::Sandbox, Self::Production];

	/// Stable label used for store partitions, spans, and metrics.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Sandbox => "sandbox",
			Self::Production => "production",
		}
	}
}
impl Display for Environment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Environment {
	type Err = EnvironmentParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"sandbox" => Ok(Self::Sandbox),
			"production" | "prod" => Ok(Self::Production),
			_ => Err(EnvironmentParseError { value: s.into() }),
		}
	}
}

/// Error returned when a label does not name a known environment.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown environment `{value}`.")]
pub struct EnvironmentParseError {
	/// The rejected label.
	pub value: String,
}
