//! Error taxonomy and response codes
//!
//! Failures are fail-fast: any non-success result aborts the enclosing unit
//! of work at the host boundary. Nothing here retries, compensates or
//! partially commits — callers resubmit a corrected request.

use crate::{IndexKind, Name};
use thiserror::Error;

/// Result alias used throughout the store.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Failure taxonomy of the record store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The composite key is already occupied, in the primary table
    /// (`kind: None`) or in one secondary sub-table (`kind: Some(_)`).
    #[error("duplicate key {id} in {table}:{scope}{}", kind_suffix(.kind))]
    DuplicateKey {
        table: Name,
        scope: Name,
        id: u64,
        kind: Option<IndexKind>,
    },

    /// Exact-match lookup found nothing, and the caller required existence.
    #[error("no record {id} in {account}/{table}:{scope}")]
    NotFound {
        account: Name,
        table: Name,
        scope: Name,
        id: u64,
    },

    /// The caller handed over something malformed: an empty payload, an
    /// empty name, a stale locator.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// Engine-level storage exhaustion. Fatal for the unit of work.
    #[error("storage exhausted: payer {payer} requested {requested} bytes")]
    StorageFull { payer: Name, requested: u64 },
}

fn kind_suffix(kind: &Option<IndexKind>) -> String {
    match kind {
        Some(kind) => format!(" ({kind} index)"),
        None => String::new(),
    }
}

impl StoreError {
    /// Stable negative response code, used in post-call trace lines.
    /// Successful operations report the non-negative locator slot instead.
    pub fn code(&self) -> i32 {
        match self {
            StoreError::DuplicateKey { .. } => -1,
            StoreError::NotFound { .. } => -2,
            StoreError::InvalidArgument { .. } => -3,
            StoreError::StorageFull { .. } => -4,
        }
    }

    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        StoreError::InvalidArgument {
            reason: reason.into(),
        }
    }
}
