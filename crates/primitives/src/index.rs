//! Secondary index manager primitive
//!
//! One generic store over the closed index-value set, dispatched by
//! exhaustive match to the per-kind engine primitive with that kind's exact
//! wire encoding. Write-only by design: the query surface over secondary
//! indexes belongs to the engine, not this layer.
//!
//! An index entry is not required to reference an existing primary record —
//! insertion paths are independent, and nothing here cleans up entries when
//! a record is removed.

use std::sync::Arc;

use migra_core::{IndexValue, Name, Result};
use migra_engine::{Locator, StorageEngine};

/// Secondary index store, generic over [`IndexValue`].
#[derive(Clone)]
pub struct SecondaryIndexManager {
    engine: Arc<dyn StorageEngine>,
}

impl SecondaryIndexManager {
    pub fn new(engine: Arc<dyn StorageEngine>) -> Self {
        Self { engine }
    }

    /// Store `value` under `id` in its kind's `(scope, table)` sub-table,
    /// charging `payer`.
    ///
    /// A second store of the same `id` within the same kind's sub-table
    /// fails `DuplicateKey`. Entries of different kinds never collide, even
    /// with equal ids.
    pub fn store(
        &self,
        table: Name,
        scope: Name,
        payer: Name,
        id: u64,
        value: IndexValue,
    ) -> Result<Locator> {
        match value {
            IndexValue::U64(v) => self.engine.store_index_u64(scope, table, payer, id, v),
            IndexValue::U128(v) => self.engine.store_index_u128(scope, table, payer, id, v),
            IndexValue::Digest256(d) => {
                // Fixed 32-byte layout: two little-endian 128-bit words.
                self.engine
                    .store_index_digest(scope, table, payer, id, d.words())
            }
            IndexValue::Float64(v) => self.engine.store_index_f64(scope, table, payer, id, v),
            IndexValue::Float80(x) => {
                self.engine
                    .store_index_ext(scope, table, payer, id, x.to_le_bytes())
            }
        }
    }
}
