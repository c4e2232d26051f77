//! Payer billing: charge on store, refund on remove, budget exhaustion.

use crate::test_utils::{setup, setup_with_budget, CODE, PAYER, SCOPE, TABLE};
use migradb::{Name, StoreError, INDEX_OVERHEAD_BYTES, ROW_OVERHEAD_BYTES};

#[test]
fn store_charges_and_eject_refunds_the_recorded_payer() {
    let (engine, facade) = setup();
    facade.inject(TABLE, SCOPE, PAYER, 1, b"0123456789").unwrap();
    assert_eq!(engine.billed_bytes(PAYER), ROW_OVERHEAD_BYTES + 10);

    // eject carries no payer; the refund goes to whoever was charged.
    facade.eject(CODE, TABLE, SCOPE, 1).unwrap();
    assert_eq!(engine.billed_bytes(PAYER), 0);
    assert_eq!(engine.total_billed(), 0);
}

#[test]
fn index_entries_charge_their_payer_too() {
    let (engine, facade) = setup();
    facade.idxi(TABLE, SCOPE, PAYER, 1, 42).unwrap();
    assert_eq!(engine.billed_bytes(PAYER), INDEX_OVERHEAD_BYTES + 8);

    facade.idxii(TABLE, SCOPE, PAYER, 2, 42).unwrap();
    assert_eq!(
        engine.billed_bytes(PAYER),
        2 * INDEX_OVERHEAD_BYTES + 8 + 16
    );
}

#[test]
fn payers_are_billed_independently() {
    let (engine, facade) = setup();
    let other = Name::parse_const("carol");
    facade.inject(TABLE, SCOPE, PAYER, 1, b"row").unwrap();
    facade.inject(TABLE, SCOPE, other, 2, b"longer-row").unwrap();

    assert_eq!(engine.billed_bytes(PAYER), ROW_OVERHEAD_BYTES + 3);
    assert_eq!(engine.billed_bytes(other), ROW_OVERHEAD_BYTES + 10);
}

#[test]
fn budget_exhaustion_is_storage_full_and_mutates_nothing() {
    let (engine, facade) = setup_with_budget(ROW_OVERHEAD_BYTES + 8);
    facade.inject(TABLE, SCOPE, PAYER, 1, b"12345678").unwrap();

    let err = facade.inject(TABLE, SCOPE, PAYER, 2, b"x").unwrap_err();
    assert!(matches!(err, StoreError::StorageFull { .. }));
    assert_eq!(engine.row_count(), 1);
    assert_eq!(engine.billed_bytes(PAYER), ROW_OVERHEAD_BYTES + 8);

    let err = facade.idxi(TABLE, SCOPE, PAYER, 2, 42).unwrap_err();
    assert!(matches!(err, StoreError::StorageFull { .. }));
    assert_eq!(engine.index_count(), 0);
}

#[test]
fn refund_frees_budget_for_new_stores() {
    let (_engine, facade) = setup_with_budget(ROW_OVERHEAD_BYTES + 8);
    facade.inject(TABLE, SCOPE, PAYER, 1, b"12345678").unwrap();
    facade.eject(CODE, TABLE, SCOPE, 1).unwrap();
    // Budget is back; the next store fits.
    facade.inject(TABLE, SCOPE, PAYER, 2, b"abcdefgh").unwrap();
}
