//! Storage engine boundary.
//!
//! The record store proper never touches bytes on its own: every effect goes
//! through the [`StorageEngine`] trait, which models the host's byte-level
//! primitives. The logical layers hold a shared `Arc<dyn StorageEngine>`
//! supplied at construction and never own the engine's lifetime.
//!
//! [`MemoryEngine`] is the reference implementation shipped with this
//! workspace, used by tests and by hosts that want an in-process store.

pub mod memory;

use migra_core::{Name, Result};

pub use memory::{MemoryEngine, INDEX_OVERHEAD_BYTES, ROW_OVERHEAD_BYTES};

/// Single-use handle to a stored row.
///
/// Returned by store and find primitives and consumed by removal. The type
/// is deliberately neither `Copy` nor `Clone`: a locator that has been
/// passed to [`StorageEngine::remove_primary`] is gone, and the compiler
/// enforces that it cannot be retained or reused across calls.
#[derive(Debug, PartialEq, Eq)]
pub struct Locator(i32);

impl Locator {
    pub(crate) fn new(slot: i32) -> Self {
        Locator(slot)
    }

    /// The raw slot index, reported as the response code of a successful
    /// operation.
    pub fn slot(&self) -> i32 {
        self.0
    }
}

/// Byte-level storage primitives consumed by the record store.
///
/// One store primitive per secondary index kind, each with its fixed value
/// encoding: `u64`/`u128` native, digests as two little-endian 128-bit
/// words, doubles native, extended floats as 16 raw bytes.
///
/// All primitives are synchronous; the host serializes calls within one
/// unit of work. Passing a consumed locator back in is undefined at this
/// boundary — implementations may reject it or worse.
pub trait StorageEngine: Send + Sync {
    /// Persist `bytes` under `(scope, table, id)`, charging `payer`.
    fn store_primary(
        &self,
        scope: Name,
        table: Name,
        payer: Name,
        id: u64,
        bytes: &[u8],
    ) -> Result<Locator>;

    /// Exact-match lookup in the primary sub-table owned by `account`.
    /// Absence is a normal `None`, never an error.
    fn find_primary(&self, account: Name, scope: Name, table: Name, id: u64) -> Option<Locator>;

    /// Free the row behind `locator`, refunding the payer recorded at store
    /// time. Consumes the locator.
    fn remove_primary(&self, locator: Locator) -> Result<()>;

    fn store_index_u64(
        &self,
        scope: Name,
        table: Name,
        payer: Name,
        id: u64,
        value: u64,
    ) -> Result<Locator>;

    fn store_index_u128(
        &self,
        scope: Name,
        table: Name,
        payer: Name,
        id: u64,
        value: u128,
    ) -> Result<Locator>;

    /// Digest values arrive as two little-endian 128-bit words, exactly the
    /// 32-byte wire layout. Implementations must preserve it byte for byte.
    fn store_index_digest(
        &self,
        scope: Name,
        table: Name,
        payer: Name,
        id: u64,
        words: [u128; 2],
    ) -> Result<Locator>;

    fn store_index_f64(
        &self,
        scope: Name,
        table: Name,
        payer: Name,
        id: u64,
        value: f64,
    ) -> Result<Locator>;

    /// Extended-precision floats arrive as 16 opaque bytes, stored bitwise.
    fn store_index_ext(
        &self,
        scope: Name,
        table: Name,
        payer: Name,
        id: u64,
        bytes: [u8; 16],
    ) -> Result<Locator>;
}
