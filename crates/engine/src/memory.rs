//! Reference in-memory storage engine
//!
//! Map-per-sub-table storage in the shape the host engine uses: primary rows
//! keyed by `(scope, table, id)`, one index map per `(scope, table, kind)`
//! triple, and an iterator table of single-use slots backing [`Locator`]
//! handles. Execution is single-threaded within a unit of work; the lock
//! exists only because the host may move units of work between threads.
//!
//! # Billing
//!
//! Every stored row charges its payer `overhead + payload` bytes; removal
//! refunds exactly what was charged. An optional byte budget models engine
//! exhaustion: exceeding it fails `StorageFull` without mutating state.

use byteorder::{ByteOrder, LittleEndian};
use migra_core::{
    Digest256, ExtFloat, IndexKind, IndexValue, Name, Record, Result, SecondaryIndexEntry,
    StoreError,
};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::{Locator, StorageEngine};

/// Fixed per-row billing overhead, on top of the payload bytes.
pub const ROW_OVERHEAD_BYTES: u64 = 112;

/// Fixed per-index-cell billing overhead, on top of the encoded value.
pub const INDEX_OVERHEAD_BYTES: u64 = 112;

/// Composite key of a primary row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct RowKey {
    scope: Name,
    table: Name,
    id: u64,
}

/// Identity of one secondary sub-table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SubTableKey {
    scope: Name,
    table: Name,
    kind: IndexKind,
}

#[derive(Debug, Clone)]
struct Row {
    payer: Name,
    bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
struct IndexCell {
    payer: Name,
    bytes: Vec<u8>,
}

/// What a consumed slot pointed at. Slots are handed out once and cleared
/// on removal; a cleared slot is a stale locator.
#[derive(Debug, Clone, Copy)]
enum SlotTarget {
    Primary(RowKey),
    Index(SubTableKey, u64),
}

#[derive(Default)]
struct EngineState {
    rows: FxHashMap<RowKey, Row>,
    indexes: FxHashMap<SubTableKey, FxHashMap<u64, IndexCell>>,
    slots: Vec<Option<SlotTarget>>,
    billed: FxHashMap<Name, u64>,
    total_billed: u64,
}

impl EngineState {
    fn alloc_slot(&mut self, target: SlotTarget) -> Locator {
        let slot = self.slots.len() as i32;
        self.slots.push(Some(target));
        Locator::new(slot)
    }

    fn charge(&mut self, payer: Name, bytes: u64) {
        *self.billed.entry(payer).or_insert(0) += bytes;
        self.total_billed += bytes;
    }

    fn refund(&mut self, payer: Name, bytes: u64) {
        if let Some(balance) = self.billed.get_mut(&payer) {
            *balance = balance.saturating_sub(bytes);
        }
        self.total_billed = self.total_billed.saturating_sub(bytes);
    }
}

/// In-memory [`StorageEngine`] owned by a single `code` account.
///
/// The `(table, scope)` namespaces it stores belong exclusively to that
/// account: `find_primary` for any other account sees nothing.
pub struct MemoryEngine {
    code: Name,
    byte_budget: Option<u64>,
    state: RwLock<EngineState>,
}

impl MemoryEngine {
    /// Create an unbounded engine owned by `code`.
    pub fn new(code: Name) -> Self {
        Self {
            code,
            byte_budget: None,
            state: RwLock::new(EngineState::default()),
        }
    }

    /// Create an engine with a total billed-byte budget. Stores that would
    /// exceed it fail `StorageFull`.
    pub fn with_budget(code: Name, byte_budget: u64) -> Self {
        Self {
            code,
            byte_budget: Some(byte_budget),
            state: RwLock::new(EngineState::default()),
        }
    }

    /// The owning account.
    pub fn code(&self) -> Name {
        self.code
    }

    fn check_budget(&self, state: &EngineState, payer: Name, requested: u64) -> Result<()> {
        if let Some(budget) = self.byte_budget {
            if state.total_billed + requested > budget {
                tracing::warn!(
                    target: "migra::engine",
                    payer = %payer,
                    requested,
                    budget,
                    billed = state.total_billed,
                    "byte budget exhausted"
                );
                return Err(StoreError::StorageFull { payer, requested });
            }
        }
        Ok(())
    }

    fn store_index_cell(
        &self,
        scope: Name,
        table: Name,
        kind: IndexKind,
        payer: Name,
        id: u64,
        bytes: Vec<u8>,
    ) -> Result<Locator> {
        let sub = SubTableKey { scope, table, kind };
        let mut state = self.state.write();
        if state
            .indexes
            .get(&sub)
            .is_some_and(|cells| cells.contains_key(&id))
        {
            return Err(StoreError::DuplicateKey {
                table,
                scope,
                id,
                kind: Some(kind),
            });
        }
        let charge = INDEX_OVERHEAD_BYTES + bytes.len() as u64;
        self.check_budget(&state, payer, charge)?;
        state
            .indexes
            .entry(sub)
            .or_default()
            .insert(id, IndexCell { payer, bytes });
        state.charge(payer, charge);
        Ok(state.alloc_slot(SlotTarget::Index(sub, id)))
    }

    // ------------------------------------------------------------------
    // Inspection surface, for tests and host diagnostics. The logical
    // layers above never read through these.
    // ------------------------------------------------------------------

    /// The primary record at `(scope, table, id)`, if any.
    pub fn primary_record(&self, scope: Name, table: Name, id: u64) -> Option<Record> {
        let state = self.state.read();
        let row = state.rows.get(&RowKey { scope, table, id })?;
        Some(Record {
            table,
            scope,
            payer: row.payer,
            id,
            bytes: row.bytes.clone(),
        })
    }

    /// The raw bytes the engine received for an index cell, exactly as
    /// stored on the wire.
    pub fn index_cell_bytes(
        &self,
        scope: Name,
        table: Name,
        kind: IndexKind,
        id: u64,
    ) -> Option<Vec<u8>> {
        let state = self.state.read();
        let cells = state.indexes.get(&SubTableKey { scope, table, kind })?;
        Some(cells.get(&id)?.bytes.clone())
    }

    /// Decode an index cell back into its typed entry.
    pub fn index_entry(
        &self,
        scope: Name,
        table: Name,
        kind: IndexKind,
        id: u64,
    ) -> Option<SecondaryIndexEntry> {
        let state = self.state.read();
        let cells = state.indexes.get(&SubTableKey { scope, table, kind })?;
        let cell = cells.get(&id)?;
        Some(SecondaryIndexEntry {
            table,
            scope,
            payer: cell.payer,
            id,
            value: decode_value(kind, &cell.bytes),
        })
    }

    /// Bytes currently billed to `payer`.
    pub fn billed_bytes(&self, payer: Name) -> u64 {
        self.state.read().billed.get(&payer).copied().unwrap_or(0)
    }

    /// Bytes currently billed across all payers.
    pub fn total_billed(&self) -> u64 {
        self.state.read().total_billed
    }

    /// Number of primary rows.
    pub fn row_count(&self) -> usize {
        self.state.read().rows.len()
    }

    /// Number of index cells across all sub-tables.
    pub fn index_count(&self) -> usize {
        self.state
            .read()
            .indexes
            .values()
            .map(|cells| cells.len())
            .sum()
    }
}

impl StorageEngine for MemoryEngine {
    fn store_primary(
        &self,
        scope: Name,
        table: Name,
        payer: Name,
        id: u64,
        bytes: &[u8],
    ) -> Result<Locator> {
        let key = RowKey { scope, table, id };
        let mut state = self.state.write();
        if state.rows.contains_key(&key) {
            return Err(StoreError::DuplicateKey {
                table,
                scope,
                id,
                kind: None,
            });
        }
        let charge = ROW_OVERHEAD_BYTES + bytes.len() as u64;
        self.check_budget(&state, payer, charge)?;
        state.rows.insert(
            key,
            Row {
                payer,
                bytes: bytes.to_vec(),
            },
        );
        state.charge(payer, charge);
        Ok(state.alloc_slot(SlotTarget::Primary(key)))
    }

    fn find_primary(&self, account: Name, scope: Name, table: Name, id: u64) -> Option<Locator> {
        // Namespaces are exclusively owned: other accounts see nothing.
        if account != self.code {
            return None;
        }
        let key = RowKey { scope, table, id };
        let mut state = self.state.write();
        if !state.rows.contains_key(&key) {
            return None;
        }
        Some(state.alloc_slot(SlotTarget::Primary(key)))
    }

    fn remove_primary(&self, locator: Locator) -> Result<()> {
        let mut state = self.state.write();
        let target = state
            .slots
            .get_mut(locator.slot() as usize)
            .and_then(Option::take)
            .ok_or_else(|| StoreError::invalid_argument("stale locator"))?;
        let key = match target {
            SlotTarget::Primary(key) => key,
            SlotTarget::Index(..) => {
                return Err(StoreError::invalid_argument(
                    "locator does not reference a primary record",
                ));
            }
        };
        let row = state
            .rows
            .remove(&key)
            .ok_or_else(|| StoreError::invalid_argument("stale locator"))?;
        let refund = ROW_OVERHEAD_BYTES + row.bytes.len() as u64;
        state.refund(row.payer, refund);
        Ok(())
    }

    fn store_index_u64(
        &self,
        scope: Name,
        table: Name,
        payer: Name,
        id: u64,
        value: u64,
    ) -> Result<Locator> {
        let mut bytes = vec![0u8; IndexKind::U64.value_size()];
        LittleEndian::write_u64(&mut bytes, value);
        self.store_index_cell(scope, table, IndexKind::U64, payer, id, bytes)
    }

    fn store_index_u128(
        &self,
        scope: Name,
        table: Name,
        payer: Name,
        id: u64,
        value: u128,
    ) -> Result<Locator> {
        let mut bytes = vec![0u8; IndexKind::U128.value_size()];
        LittleEndian::write_u128(&mut bytes, value);
        self.store_index_cell(scope, table, IndexKind::U128, payer, id, bytes)
    }

    fn store_index_digest(
        &self,
        scope: Name,
        table: Name,
        payer: Name,
        id: u64,
        words: [u128; 2],
    ) -> Result<Locator> {
        let mut bytes = vec![0u8; IndexKind::Digest256.value_size()];
        LittleEndian::write_u128(&mut bytes[..16], words[0]);
        LittleEndian::write_u128(&mut bytes[16..], words[1]);
        self.store_index_cell(scope, table, IndexKind::Digest256, payer, id, bytes)
    }

    fn store_index_f64(
        &self,
        scope: Name,
        table: Name,
        payer: Name,
        id: u64,
        value: f64,
    ) -> Result<Locator> {
        let mut bytes = vec![0u8; IndexKind::Float64.value_size()];
        LittleEndian::write_f64(&mut bytes, value);
        self.store_index_cell(scope, table, IndexKind::Float64, payer, id, bytes)
    }

    fn store_index_ext(
        &self,
        scope: Name,
        table: Name,
        payer: Name,
        id: u64,
        bytes: [u8; 16],
    ) -> Result<Locator> {
        self.store_index_cell(scope, table, IndexKind::Float80, payer, id, bytes.to_vec())
    }
}

/// Decode a stored cell back into its typed value. Stored cells always have
/// the exact wire size of their kind.
fn decode_value(kind: IndexKind, bytes: &[u8]) -> IndexValue {
    match kind {
        IndexKind::U64 => IndexValue::U64(LittleEndian::read_u64(bytes)),
        IndexKind::U128 => IndexValue::U128(LittleEndian::read_u128(bytes)),
        IndexKind::Digest256 => {
            let mut buf = [0u8; 32];
            buf.copy_from_slice(bytes);
            IndexValue::Digest256(Digest256::from_bytes(buf))
        }
        IndexKind::Float64 => IndexValue::Float64(LittleEndian::read_f64(bytes)),
        IndexKind::Float80 => {
            let mut buf = [0u8; 16];
            buf.copy_from_slice(bytes);
            IndexValue::Float80(ExtFloat::from_le_bytes(buf))
        }
    }
}

impl std::fmt::Debug for MemoryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryEngine")
            .field("code", &self.code)
            .field("byte_budget", &self.byte_budget)
            .field("row_count", &self.row_count())
            .field("index_count", &self.index_count())
            .field("total_billed", &self.total_billed())
            .finish()
    }
}
