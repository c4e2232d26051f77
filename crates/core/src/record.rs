//! Record and index-entry shapes
//!
//! A [`Record`] is owned exclusively by its `(table, scope)` namespace;
//! `payer` is a billing attribute, never an owner. A [`SecondaryIndexEntry`]
//! resolves back to a primary id but is *not* required to reference an
//! existing record — the two insertion paths are independent, and this layer
//! never cascades deletes between them.

use crate::{IndexKind, IndexValue, Name};

/// A primary record within a `(table, scope)` namespace.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub table: Name,
    pub scope: Name,
    pub payer: Name,
    pub id: u64,
    pub bytes: Vec<u8>,
}

/// One secondary index entry. The kind is carried by the value and names the
/// sub-table the entry lives in.
#[derive(Debug, Clone, PartialEq)]
pub struct SecondaryIndexEntry {
    pub table: Name,
    pub scope: Name,
    pub payer: Name,
    pub id: u64,
    pub value: IndexValue,
}

impl SecondaryIndexEntry {
    pub fn kind(&self) -> IndexKind {
        self.value.kind()
    }
}
