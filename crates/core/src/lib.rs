//! Core types for the migradb record store.
//!
//! This crate defines the vocabulary shared by every layer: symbolic
//! [`Name`]s, the closed [`IndexKind`]/[`IndexValue`] taxonomy with its
//! fixed wire encodings, record shapes, and the [`StoreError`] failure
//! taxonomy with stable response codes.

pub mod error;
pub mod name;
pub mod record;
pub mod value;

pub use error::{Result, StoreError};
pub use name::{Name, NameParseError};
pub use record::{Record, SecondaryIndexEntry};
pub use value::{Digest256, ExtFloat, HexError, IndexKind, IndexValue};
