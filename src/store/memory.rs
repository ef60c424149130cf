//! Thread-safe in-memory [`BrokerStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::{Environment, TokenRecord},
	store::{BrokerStore, StoreFuture},
};

type StoreMap = Arc<RwLock<BTreeMap<Environment, TokenRecord>>>;

/// Storage backend that keeps records in-process for tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	fn save_now(map: &StoreMap, record: TokenRecord) {
		map.write().insert(record.environment, record);
	}

	fn fetch_now(map: &StoreMap, environment: Environment) -> Option<TokenRecord> {
		map.read().get(&environment).cloned()
	}

	fn delete_now(map: &StoreMap, environment: Environment) -> Option<TokenRecord> {
		map.write().remove(&environment)
	}
}
impl BrokerStore for MemoryStore {
	fn save(&self, record: TokenRecord) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move {
			Self::save_now(&map, record);

			Ok(())
		})
	}

	fn fetch(&self, environment: Environment) -> StoreFuture<'_, Option<TokenRecord>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::fetch_now(&map, environment)) })
	}

	fn delete(&self, environment: Environment) -> StoreFuture<'_, Option<TokenRecord>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::delete_now(&map, environment)) })
	}
}
