//! Public types for the migradb unified API.
//!
//! Re-exports from the internal crates with a clean public surface.

// Core vocabulary
pub use migra_core::{Digest256, ExtFloat, IndexKind, IndexValue, Name, NameParseError};
pub use migra_core::{Record, Result, SecondaryIndexEntry, StoreError};

// Engine boundary and the reference engine
pub use migra_engine::{Locator, MemoryEngine, StorageEngine};
pub use migra_engine::{INDEX_OVERHEAD_BYTES, ROW_OVERHEAD_BYTES};

// Logical primitives
pub use migra_primitives::{PrimaryStore, RecordLocator, SecondaryIndexManager};

// Operation surface and dispatch
pub use migra_executor::{registry, ActionRegistry, Actionable, MigrationFacade};
pub use migra_executor::{Error as DispatchError, Output};
