//! Provider descriptor data structures and presets shared by all flows.
//!
//! The module exposes validated per-environment endpoint metadata plus the builder
//! utilities used to assemble descriptors for providers without a built-in preset.

/// Builder API for assembling provider descriptors.
pub mod builder;

pub use builder::*;

// self
use crate::{
	_prelude::*,
	auth::{Environment, ProviderId},
};

const ETRADE_SANDBOX_API: &str = "https://apisb.etrade.com";
const ETRADE_PRODUCTION_API: &str = "https://api.etrade.com";
// The authorize page is served by the retail site and is shared by both environments.
const ETRADE_AUTHORIZE: &str = "https://us.etrade.com/e/t/etws/authorize";

/// Endpoint set declared for one environment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Request-token endpoint starting the handshake.
	pub request_token: Url,
	/// Access-token endpoint completing the handshake.
	pub access_token: Url,
	/// User-facing authorize page that displays the verifier.
	pub authorize: Url,
	/// Base URL for signed data calls.
	pub api_base: Url,
}

/// Immutable provider descriptor consumed by flows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
	/// Descriptor identifier.
	pub id: ProviderId,
	/// Endpoints serving the sandbox environment.
	pub sandbox: ProviderEndpoints,
	/// Endpoints serving the production environment.
	pub production: ProviderEndpoints,
}
impl ProviderDescriptor {
	/// Creates a new builder for the provided identifier.
	pub fn builder(id: ProviderId) -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::new(id)
	}

	/// Endpoint set for the provided environment.
	pub fn endpoints(&self, environment: Environment) -> &ProviderEndpoints {
		match environment {
			Environment::Sandbox => &self.sandbox,
			Environment::Production => &self.production,
		}
	}

	/// Built-in descriptor for the E*TRADE brokerage API.
	pub fn etrade() -> Result<Self, ProviderDescriptorError> {
		let id = ProviderId::new("etrade")?;
		let authorize = parse_endpoint("authorize", ETRADE_AUTHORIZE)?;
		let mut builder = Self::builder(id);

		for (environment, base) in [
			(Environment::Sandbox, ETRADE_SANDBOX_API),
			(Environment::Production, ETRADE_PRODUCTION_API),
		] {
			builder = builder
				.request_token_endpoint(
					environment,
					parse_endpoint("request_token", &format!("{base}/oauth/request_token"))?,
				)
				.access_token_endpoint(
					environment,
					parse_endpoint("access_token", &format!("{base}/oauth/access_token"))?,
				)
				.authorize_endpoint(environment, authorize.clone())
				.api_base(environment, parse_endpoint("api_base", base)?);
		}

		builder.build()
	}
}

fn parse_endpoint(name: &'static str, raw: &str) -> Result<Url, ProviderDescriptorError> {
	Url::parse(raw).map_err(|e| ProviderDescriptorError::UnparsableEndpoint {
		endpoint: name,
		message: e.to_string(),
	})
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn etrade_preset_validates() {
		let descriptor = ProviderDescriptor::etrade().expect("Preset must build.");

		assert_eq!(descriptor.id.as_ref(), "etrade");
		assert_eq!(
			descriptor.endpoints(Environment::Sandbox).request_token.as_str(),
			"https://apisb.etrade.com/oauth/request_token",
		);
		assert_eq!(
			descriptor.endpoints(Environment::Production).access_token.as_str(),
			"https://api.etrade.com/oauth/access_token",
		);
		assert_eq!(
			descriptor.endpoints(Environment::Sandbox).authorize,
			descriptor.endpoints(Environment::Production).authorize,
			"Both environments share the retail authorize page.",
		);
		assert_eq!(
			descriptor.endpoints(Environment::Production).api_base.as_str(),
			"https://api.etrade.com/",
		);
	}

	#[test]
	fn descriptor_round_trips_through_json() {
		let descriptor = ProviderDescriptor::etrade().expect("Preset must build.");
		let encoded = serde_json::to_string(&descriptor).expect("Descriptor must serialize.");
		let decoded =
			serde_json::from_str::<ProviderDescriptor>(&encoded).expect("Descriptor must deserialize.");

		assert_eq!(decoded, descriptor);
	}
}
