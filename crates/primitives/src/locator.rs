//! Record lookup primitive
//!
//! Exact-match only: no range scans, no prefix walks. Absence is a normal
//! `None` — only a caller that requires the record to exist turns it into
//! an error.

use std::sync::Arc;

use migra_core::Name;
use migra_engine::{Locator, StorageEngine};

/// Exact-match primary record lookup.
#[derive(Clone)]
pub struct RecordLocator {
    engine: Arc<dyn StorageEngine>,
}

impl RecordLocator {
    pub fn new(engine: Arc<dyn StorageEngine>) -> Self {
        Self { engine }
    }

    /// Look up the record at `(account, scope, table, id)`.
    ///
    /// The returned locator is single-use: it is consumed by
    /// [`PrimaryStore::remove`](crate::PrimaryStore::remove) and must not
    /// be held across operations.
    pub fn find(&self, account: Name, scope: Name, table: Name, id: u64) -> Option<Locator> {
        self.engine.find_primary(account, scope, table, id)
    }
}
