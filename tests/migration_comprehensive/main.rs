//! Comprehensive migration-surface test suite.
//!
//! Exercises the full stack — facade, primitives, reference engine and the
//! action registry — through the public `migradb` API.
//!
//! ```bash
//! cargo test --test migration_comprehensive
//! ```

mod test_utils;

mod billing;
mod dispatch;
mod secondary_indexes;
