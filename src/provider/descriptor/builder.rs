// self
use crate::{
	_prelude::*,
	auth::{Environment, IdentifierError, ProviderId},
	provider::{ProviderDescriptor, ProviderEndpoints},
};

/// Errors raised while constructing or validating descriptors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum ProviderDescriptorError {
	/// Descriptor identifier failed validation.
	#[error(transparent)]
	Id(#[from] IdentifierError),
	/// An endpoint URL could not be parsed.
	#[error("The {endpoint} endpoint could not be parsed: {message}.")]
	UnparsableEndpoint {
		/// Which endpoint failed to parse.
		endpoint: &'static str,
		/// Parser error message.
		message: String,
	},
	/// A required endpoint was never supplied.
	#[error("Missing {endpoint} endpoint for {environment}.")]
	MissingEndpoint {
		/// Which endpoint is absent.
		endpoint: &'static str,
		/// Environment whose endpoint set is incomplete.
		environment: Environment,
	},
	/// Endpoints must use HTTPS.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
}

#[derive(Clone, Debug, Default)]
struct EndpointSlots {
	request_token: Option<Url>,
	access_token: Option<Url>,
	authorize: Option<Url>,
	api_base: Option<Url>,
}
impl EndpointSlots {
	fn build(self, environment: Environment) -> Result<ProviderEndpoints, ProviderDescriptorError> {
		let missing = |endpoint| ProviderDescriptorError::MissingEndpoint { endpoint, environment };

		Ok(ProviderEndpoints {
			request_token: self.request_token.ok_or_else(|| missing("request_token"))?,
			access_token: self.access_token.ok_or_else(|| missing("access_token"))?,
			authorize: self.authorize.ok_or_else(|| missing("authorize"))?,
			api_base: self.api_base.ok_or_else(|| missing("api_base"))?,
		})
	}
}

/// Builder for [`ProviderDescriptor`] values.
#[derive(Clone, Debug)]
pub struct ProviderDescriptorBuilder {
	/// Identifier for the descriptor being constructed.
	pub id: ProviderId,
	sandbox: EndpointSlots,
	production: EndpointSlots,
}
impl ProviderDescriptorBuilder {
	/// Creates a new builder seeded with the provided identifier.
	pub fn new(id: ProviderId) -> Self {
		Self { id, sandbox: EndpointSlots::default(), production: EndpointSlots::default() }
	}

	/// Sets the request-token endpoint for an environment.
	pub fn request_token_endpoint(mut self, environment: Environment, url: Url) -> Self {
		self.slots_mut(environment).request_token = Some(url);

		self
	}

	/// Sets the access-token endpoint for an environment.
	pub fn access_token_endpoint(mut self, environment: Environment, url: Url) -> Self {
		self.slots_mut(environment).access_token = Some(url);

		self
	}

	/// Sets the user-facing authorize page for an environment.
	pub fn authorize_endpoint(mut self, environment: Environment, url: Url) -> Self {
		self.slots_mut(environment).authorize = Some(url);

		self
	}

	/// Sets the signed-call base URL for an environment.
	///
	/// The base is stored with a trailing `/` so joined endpoint paths extend it
	/// instead of replacing its final segment.
	pub fn api_base(mut self, environment: Environment, mut url: Url) -> Self {
		if !url.path().ends_with('/') {
			url.set_path(&format!("{}/", url.path()));
		}

		self.slots_mut(environment).api_base = Some(url);

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ProviderDescriptor, ProviderDescriptorError> {
		let sandbox = self.sandbox.build(Environment::Sandbox)?;
		let production = self.production.build(Environment::Production)?;
		let descriptor = ProviderDescriptor { id: self.id, sandbox, production };

		descriptor.validate()?;

		Ok(descriptor)
	}

	fn slots_mut(&mut self, environment: Environment) -> &mut EndpointSlots {
		match environment {
			Environment::Sandbox => &mut self.sandbox,
			Environment::Production => &mut self.production,
		}
	}
}

impl ProviderDescriptor {
	/// Validates invariants for the descriptor.
	fn validate(&self) -> Result<(), ProviderDescriptorError> {
		for environment in Environment::ALL {
			let endpoints = self.endpoints(environment);

			validate_endpoint("request_token", &endpoints.request_token)?;
			validate_endpoint("access_token", &endpoints.access_token)?;
			validate_endpoint("authorize", &endpoints.authorize)?;
			validate_endpoint("api_base", &endpoints.api_base)?;
		}

		Ok(())
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ProviderDescriptorError> {
	if url.scheme() != "https" {
		Err(ProviderDescriptorError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	} else {
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(raw: &str) -> Url {
		Url::parse(raw).expect("URL fixture must parse.")
	}

	fn complete_builder() -> ProviderDescriptorBuilder {
		let mut builder = ProviderDescriptorBuilder::new(
			ProviderId::new("test-provider").expect("Identifier fixture must be valid."),
		);

		for environment in Environment::ALL {
			builder = builder
				.request_token_endpoint(environment, url("https://example.com/oauth/request_token"))
				.access_token_endpoint(environment, url("https://example.com/oauth/access_token"))
				.authorize_endpoint(environment, url("https://example.com/authorize"))
				.api_base(environment, url("https://example.com"));
		}

		builder
	}

	#[test]
	fn complete_builder_succeeds() {
		let descriptor = complete_builder().build().expect("Complete builder must succeed.");

		assert_eq!(
			descriptor.endpoints(Environment::Sandbox),
			descriptor.endpoints(Environment::Production),
		);
	}

	#[test]
	fn missing_endpoint_is_reported_with_its_environment() {
		let builder = ProviderDescriptorBuilder::new(
			ProviderId::new("test-provider").expect("Identifier fixture must be valid."),
		)
		.request_token_endpoint(Environment::Sandbox, url("https://example.com/rt"));
		let err = builder.build().expect_err("Incomplete builder must fail.");

		assert_eq!(
			err,
			ProviderDescriptorError::MissingEndpoint {
				endpoint: "access_token",
				environment: Environment::Sandbox,
			},
		);
	}

	#[test]
	fn insecure_endpoints_are_rejected() {
		let err = complete_builder()
			.api_base(Environment::Production, url("http://example.com"))
			.build()
			.expect_err("Insecure endpoint must fail validation.");

		assert!(matches!(
			err,
			ProviderDescriptorError::InsecureEndpoint { endpoint: "api_base", .. },
		));
	}

	#[test]
	fn api_base_is_normalized_to_a_trailing_slash() {
		let descriptor = complete_builder()
			.api_base(Environment::Sandbox, url("https://example.com/api"))
			.build()
			.expect("Builder with an unslashed base must succeed.");
		let base = &descriptor.endpoints(Environment::Sandbox).api_base;

		assert_eq!(base.as_str(), "https://example.com/api/");
		assert_eq!(
			base.join("v1/market/quote.json").expect("Join must succeed.").as_str(),
			"https://example.com/api/v1/market/quote.json",
		);
	}
}
