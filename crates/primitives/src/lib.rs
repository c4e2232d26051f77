//! Logical record-store primitives.
//!
//! Three stateless facades over a shared `Arc<dyn StorageEngine>`:
//!
//! - [`PrimaryStore`] — store and remove primary records, owning the
//!   charge/refund contract with the payer;
//! - [`SecondaryIndexManager`] — one generic store over the closed
//!   [`IndexValue`](migra_core::IndexValue) set, write-only;
//! - [`RecordLocator`] — exact-match primary lookup yielding a single-use
//!   locator.
//!
//! Each facade holds only the engine reference; clones share the same
//! underlying data.

pub mod index;
pub mod locator;
pub mod primary;

pub use index::SecondaryIndexManager;
pub use locator::RecordLocator;
pub use primary::PrimaryStore;
