//! Error conversion from store error types.
//!
//! Maps [`StoreError`] values into the dispatch layer's [`Error`] while
//! preserving the human-readable detail. Codes are not preserved here —
//! trace lines log them before conversion happens.

use crate::Error;
use migra_core::StoreError;

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        let reason = err.to_string();
        match err {
            StoreError::DuplicateKey { .. } => Error::DuplicateKey { reason },
            StoreError::NotFound { .. } => Error::NotFound { reason },
            StoreError::InvalidArgument { .. } => Error::InvalidArgument { reason },
            StoreError::StorageFull { .. } => Error::StorageFull { reason },
        }
    }
}
