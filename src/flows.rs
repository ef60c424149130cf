//! High-level flow orchestrators powered by the broker facade.

pub mod handshake;

mod common;
mod load_session;
mod revoke;

pub use handshake::*;

// self
use crate::{
	_prelude::*,
	auth::ConsumerCredentials,
	http::SessionHttpClient,
	provider::{ProviderDescriptor, ProviderStrategy},
	store::BrokerStore,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Broker specialized for the crate's default reqwest transport stack.
pub type ReqwestBroker = Broker<ReqwestHttpClient>;

/// Coordinates the three-legged handshake and session lifecycle for one provider.
///
/// The broker owns the HTTP client, token store, provider descriptor, and strategy
/// references so individual flow implementations can focus on protocol logic (request
/// token exchanges, verifier redemption, record persistence). Consumer credentials are
/// stored alongside the descriptor so every leg is signed consistently.
#[derive(Clone)]
pub struct Broker<C>
where
	C: ?Sized + SessionHttpClient,
{
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Token store implementation that persists issued secrets.
	pub store: Arc<dyn BrokerStore>,
	/// Provider descriptor that defines per-environment endpoints.
	pub descriptor: ProviderDescriptor,
	/// Strategy responsible for provider-specific request adjustments.
	pub strategy: Arc<dyn ProviderStrategy>,
	/// Consumer key pair that signs every leg of the protocol.
	pub credentials: ConsumerCredentials,
}
impl<C> Broker<C>
where
	C: ?Sized + SessionHttpClient,
{
	/// Creates a broker that reuses the caller-provided transport.
	pub fn with_http_client(
		store: Arc<dyn BrokerStore>,
		descriptor: ProviderDescriptor,
		strategy: Arc<dyn ProviderStrategy>,
		credentials: ConsumerCredentials,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self { http_client: http_client.into(), store, descriptor, strategy, credentials }
	}
}
#[cfg(feature = "reqwest")]
impl Broker<ReqwestHttpClient> {
	/// Creates a new broker for the provided descriptor and consumer credentials.
	///
	/// The broker provisions its own reqwest-backed transport so callers do not need
	/// to pass HTTP handles explicitly.
	pub fn new(
		store: Arc<dyn BrokerStore>,
		descriptor: ProviderDescriptor,
		strategy: Arc<dyn ProviderStrategy>,
		credentials: ConsumerCredentials,
	) -> Self {
		Self::with_http_client(store, descriptor, strategy, credentials, ReqwestHttpClient::default())
	}
}
impl<C> Debug for Broker<C>
where
	C: ?Sized + SessionHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Broker")
			.field("descriptor", &self.descriptor.id)
			.field("credentials", &self.credentials)
			.finish()
	}
}
