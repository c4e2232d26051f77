//! migradb — a typed multi-index record store.
//!
//! A thin logical layer mapping application records to a primary numeric key
//! within a `(table, scope)` namespace, with parallel secondary indexes of
//! heterogeneous value types resolving back to the same primary key. The
//! byte-level engine sits behind the [`StorageEngine`] trait; a reference
//! in-memory engine ships with the workspace.
//!
//! # Quick start
//!
//! ```
//! use std::sync::Arc;
//! use migradb::{MemoryEngine, MigrationFacade, Name};
//!
//! let code = Name::parse_const("migrator");
//! let engine = Arc::new(MemoryEngine::new(code));
//! let facade = MigrationFacade::new(engine.clone());
//!
//! let table: Name = "accounts".parse().unwrap();
//! let scope: Name = "alice".parse().unwrap();
//! let payer: Name = "bob".parse().unwrap();
//!
//! facade.inject(table, scope, payer, 1, b"balance=100").unwrap();
//! facade.idxi(table, scope, payer, 1, 100).unwrap();
//! facade.eject(code, table, scope, 1).unwrap();
//! ```
//!
//! Every operation either fully applies its storage effects or fails with a
//! [`StoreError`]; the hosting environment is expected to abort the whole
//! unit of work on any failure. Nothing here retries or compensates.

pub mod types;

pub use types::*;
