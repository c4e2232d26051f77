//! Shared fixtures for the comprehensive suite.

use migradb::{MemoryEngine, MigrationFacade, Name};
use std::sync::{Arc, Once};

pub const CODE: Name = Name::parse_const("migrator");
pub const TABLE: Name = Name::parse_const("accounts");
pub const SCOPE: Name = Name::parse_const("alice");
pub const PAYER: Name = Name::parse_const("bob");

static TRACING: Once = Once::new();

/// Capture the pre/post action trace lines in test output.
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// A facade over a fresh unbounded in-memory engine.
pub fn setup() -> (Arc<MemoryEngine>, MigrationFacade) {
    init_tracing();
    let engine = Arc::new(MemoryEngine::new(CODE));
    let facade = MigrationFacade::new(engine.clone());
    (engine, facade)
}

/// Same, with a total byte budget.
pub fn setup_with_budget(budget: u64) -> (Arc<MemoryEngine>, MigrationFacade) {
    init_tracing();
    let engine = Arc::new(MemoryEngine::with_budget(CODE, budget));
    let facade = MigrationFacade::new(engine.clone());
    (engine, facade)
}
