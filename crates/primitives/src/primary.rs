//! Primary record store primitive
//!
//! Stateless facade over the storage engine's primary-row primitives. Owns
//! the contract that storage cost is charged to the payer on store and
//! refunded on remove — both effects live in the engine, this layer decides
//! when they happen.

use std::sync::Arc;

use migra_core::{Name, Result, StoreError};
use migra_engine::{Locator, StorageEngine};

/// Primary record store.
///
/// Holds only an engine reference; `Clone` is cheap and clones share data.
#[derive(Clone)]
pub struct PrimaryStore {
    engine: Arc<dyn StorageEngine>,
}

impl PrimaryStore {
    pub fn new(engine: Arc<dyn StorageEngine>) -> Self {
        Self { engine }
    }

    /// Persist `bytes` under `(scope, table, id)`, charging `payer`.
    ///
    /// Empty payloads are a caller error: they fail `InvalidArgument`
    /// before the engine is touched, so a rejected call performs no
    /// storage mutation. Occupied keys fail `DuplicateKey`; engine
    /// exhaustion surfaces as `StorageFull`.
    pub fn store(
        &self,
        table: Name,
        scope: Name,
        payer: Name,
        id: u64,
        bytes: &[u8],
    ) -> Result<Locator> {
        if bytes.is_empty() {
            return Err(StoreError::invalid_argument("empty record payload"));
        }
        self.engine.store_primary(scope, table, payer, id, bytes)
    }

    /// Free the record behind `locator`, refunding the payer recorded at
    /// store time. Consumes the locator; it cannot be reused.
    pub fn remove(&self, locator: Locator) -> Result<()> {
        self.engine.remove_primary(locator)
    }
}
