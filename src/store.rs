//! Storage contracts and built-in store implementations for issued access tokens.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	auth::{Environment, TokenRecord},
};

/// Future returned by [`BrokerStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract implemented by broker token stores.
///
/// Each environment owns at most one record; saving replaces any previous record for that
/// environment and leaves other environments untouched.
pub trait BrokerStore
where
	Self: Send + Sync,
{
	/// Persists or replaces the record for the record's environment.
	fn save(&self, record: TokenRecord) -> StoreFuture<'_, ()>;

	/// Fetches the record for the environment, if present.
	fn fetch(&self, environment: Environment) -> StoreFuture<'_, Option<TokenRecord>>;

	/// Removes and returns the record for the environment, if present.
	fn delete(&self, environment: Environment) -> StoreFuture<'_, Option<TokenRecord>>;
}

/// Error type produced by [`BrokerStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
