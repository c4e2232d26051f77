//! Operation surface and action dispatch.
//!
//! [`MigrationFacade`] exposes the seven store operations; the
//! [`registry`] module routes structured call envelopes to them through
//! concrete [`Actionable`](registry::Actionable) handlers registered in a
//! name→handler map built at process start. No reflection, no annotations:
//! the map is the whole dispatch mechanism.

pub mod actions;
pub mod convert;
pub mod facade;
pub mod registry;

pub use facade::MigrationFacade;
pub use registry::{registry, ActionRegistry, Actionable};

use migra_core::Name;
use thiserror::Error;

/// Result alias for the dispatch layer.
pub type Result<T> = std::result::Result<T, Error>;

/// Dispatch-layer errors: store failures mapped through [`convert`], plus
/// the failures only this layer can produce.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("duplicate key: {reason}")]
    DuplicateKey { reason: String },

    #[error("not found: {reason}")]
    NotFound { reason: String },

    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("storage full: {reason}")]
    StorageFull { reason: String },

    #[error("unknown action '{action}'")]
    UnknownAction { action: Name },

    #[error("bad action arguments: {reason}")]
    BadArguments { reason: String },
}

/// Successful operation outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// The slot index of the stored row, also reported as the response
    /// code in the post-call trace line.
    Locator(i32),
    /// Operation completed with nothing to return (`eject`).
    Unit,
}
