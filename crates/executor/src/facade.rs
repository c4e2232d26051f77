//! The seven-operation migration surface.
//!
//! Composes the primitives per request: every operation validates its name
//! arguments, emits a pre-call trace line, delegates, and emits a post-call
//! trace line carrying the response code (the locator slot on success, the
//! negative error code otherwise). Trace lines are diagnostic only and never
//! affect control flow.

use std::sync::Arc;

use migra_core::{Digest256, ExtFloat, IndexValue, Name, Result, StoreError};
use migra_engine::{Locator, StorageEngine};
use migra_primitives::{PrimaryStore, RecordLocator, SecondaryIndexManager};
use tracing::debug;

const TRACE_TARGET: &str = "migra::action";

/// Pre-call trace line: `"<op> <table>:<scope> <id>:<payer>"`.
/// For `eject`, which has no payer, the account occupies the payer slot.
fn trace_call(op: &str, table: Name, scope: Name, id: u64, payer: Name) -> String {
    format!("{op} {table}:{scope} {id}:{payer}")
}

/// Post-call trace line: `"<op> resp: <code>"`.
fn trace_resp(op: &str, code: i32) -> String {
    format!("{op} resp: {code}")
}

fn resp_code(slot: &Result<i32>) -> i32 {
    match slot {
        Ok(slot) => *slot,
        Err(err) => err.code(),
    }
}

/// The public operation surface of the record store.
///
/// Holds the three primitives over one shared engine reference; the engine
/// is injected at construction and its lifetime is never owned here.
#[derive(Clone)]
pub struct MigrationFacade {
    primary: PrimaryStore,
    indexes: SecondaryIndexManager,
    locator: RecordLocator,
}

impl MigrationFacade {
    pub fn new(engine: Arc<dyn StorageEngine>) -> Self {
        Self {
            primary: PrimaryStore::new(engine.clone()),
            indexes: SecondaryIndexManager::new(engine.clone()),
            locator: RecordLocator::new(engine),
        }
    }

    /// Every `Name` argument must be well-formed: the empty (all-zero)
    /// name is never a valid table, scope, payer or account.
    fn validate_names(args: &[(&str, Name)]) -> Result<()> {
        for (label, name) in args {
            if name.is_empty() {
                return Err(StoreError::invalid_argument(format!("empty {label} name")));
            }
        }
        Ok(())
    }

    /// Shared shape of the six store operations: pre-trace, validate,
    /// delegate, post-trace.
    fn traced_store(
        &self,
        op: &str,
        table: Name,
        scope: Name,
        payer: Name,
        id: u64,
        run: impl FnOnce(&Self) -> Result<Locator>,
    ) -> Result<Locator> {
        debug!(target: TRACE_TARGET, "{}", trace_call(op, table, scope, id, payer));
        let result = Self::validate_names(&[("table", table), ("scope", scope), ("payer", payer)])
            .and_then(|()| run(self));
        let code = match &result {
            Ok(locator) => locator.slot(),
            Err(err) => err.code(),
        };
        debug!(target: TRACE_TARGET, "{}", trace_resp(op, code));
        result
    }

    /// Store a primary record. `data` must be non-empty.
    pub fn inject(
        &self,
        table: Name,
        scope: Name,
        payer: Name,
        id: u64,
        data: &[u8],
    ) -> Result<Locator> {
        self.traced_store("inject", table, scope, payer, id, |f| {
            f.primary.store(table, scope, payer, id, data)
        })
    }

    /// Store a `u64` secondary index entry.
    pub fn idxi(
        &self,
        table: Name,
        scope: Name,
        payer: Name,
        id: u64,
        secondary: u64,
    ) -> Result<Locator> {
        self.traced_store("idxi", table, scope, payer, id, |f| {
            f.indexes
                .store(table, scope, payer, id, IndexValue::U64(secondary))
        })
    }

    /// Store a `u128` secondary index entry.
    pub fn idxii(
        &self,
        table: Name,
        scope: Name,
        payer: Name,
        id: u64,
        secondary: u128,
    ) -> Result<Locator> {
        self.traced_store("idxii", table, scope, payer, id, |f| {
            f.indexes
                .store(table, scope, payer, id, IndexValue::U128(secondary))
        })
    }

    /// Store a 256-bit digest secondary index entry.
    pub fn idxc(
        &self,
        table: Name,
        scope: Name,
        payer: Name,
        id: u64,
        secondary: Digest256,
    ) -> Result<Locator> {
        self.traced_store("idxc", table, scope, payer, id, |f| {
            f.indexes
                .store(table, scope, payer, id, IndexValue::Digest256(secondary))
        })
    }

    /// Store an `f64` secondary index entry.
    pub fn idxdbl(
        &self,
        table: Name,
        scope: Name,
        payer: Name,
        id: u64,
        secondary: f64,
    ) -> Result<Locator> {
        self.traced_store("idxdbl", table, scope, payer, id, |f| {
            f.indexes
                .store(table, scope, payer, id, IndexValue::Float64(secondary))
        })
    }

    /// Store an extended-precision float secondary index entry.
    pub fn idxldbl(
        &self,
        table: Name,
        scope: Name,
        payer: Name,
        id: u64,
        secondary: ExtFloat,
    ) -> Result<Locator> {
        self.traced_store("idxldbl", table, scope, payer, id, |f| {
            f.indexes
                .store(table, scope, payer, id, IndexValue::Float80(secondary))
        })
    }

    /// Remove the primary record at `(account, scope, table, id)`.
    ///
    /// Takes `account`, not `payer`, and removes the primary entry only:
    /// secondary index entries under the same id survive. Both asymmetries
    /// are part of the operation's contract; secondary cleanup, if any,
    /// happens outside this layer.
    pub fn eject(&self, account: Name, table: Name, scope: Name, id: u64) -> Result<()> {
        debug!(target: TRACE_TARGET, "{}", trace_call("eject", table, scope, id, account));
        let result = Self::validate_names(&[
            ("account", account),
            ("table", table),
            ("scope", scope),
        ])
        .and_then(|()| {
            let locator = self.locator.find(account, scope, table, id).ok_or(
                StoreError::NotFound {
                    account,
                    table,
                    scope,
                    id,
                },
            )?;
            let slot = locator.slot();
            self.primary.remove(locator)?;
            Ok(slot)
        });
        debug!(target: TRACE_TARGET, "{}", trace_resp("eject", resp_code(&result)));
        result.map(|_| ())
    }
}
