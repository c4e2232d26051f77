//! Secondary index behavior: orphans, kind isolation, wire fidelity.

use crate::test_utils::{setup, CODE, PAYER, SCOPE, TABLE};
use migradb::{Digest256, ExtFloat, IndexKind, IndexValue, StoreError};

#[test]
fn orphan_secondary_entry_is_intended_behavior() {
    // No primary record for id 77 — the index store still succeeds.
    // Insertion paths are independent by contract.
    let (engine, facade) = setup();
    facade.idxi(TABLE, SCOPE, PAYER, 77, 42).unwrap();

    assert!(engine.primary_record(SCOPE, TABLE, 77).is_none());
    let entry = engine.index_entry(SCOPE, TABLE, IndexKind::U64, 77).unwrap();
    assert_eq!(entry.value, IndexValue::U64(42));
}

#[test]
fn same_id_different_kinds_never_collide() {
    let (engine, facade) = setup();
    facade.idxi(TABLE, SCOPE, PAYER, 5, 42).unwrap();
    facade.idxdbl(TABLE, SCOPE, PAYER, 5, 42.0).unwrap();

    assert!(engine.index_entry(SCOPE, TABLE, IndexKind::U64, 5).is_some());
    assert!(engine
        .index_entry(SCOPE, TABLE, IndexKind::Float64, 5)
        .is_some());
}

#[test]
fn same_id_same_kind_is_duplicate() {
    let (_engine, facade) = setup();
    facade.idxii(TABLE, SCOPE, PAYER, 5, 10).unwrap();
    let err = facade.idxii(TABLE, SCOPE, PAYER, 5, 11).unwrap_err();
    assert!(matches!(
        err,
        StoreError::DuplicateKey {
            kind: Some(IndexKind::U128),
            ..
        }
    ));
}

#[test]
fn digest_round_trips_as_exactly_32_bytes() {
    let (engine, facade) = setup();
    let mut raw = [0u8; 32];
    for (i, b) in raw.iter_mut().enumerate() {
        *b = (251u16.wrapping_mul(i as u16 + 1) % 256) as u8;
    }
    let digest = Digest256::from_bytes(raw);
    facade.idxc(TABLE, SCOPE, PAYER, 9, digest).unwrap();

    // The engine-received payload is byte-identical to the input.
    let wire = engine
        .index_cell_bytes(SCOPE, TABLE, IndexKind::Digest256, 9)
        .unwrap();
    assert_eq!(wire.len(), 32);
    assert_eq!(wire.as_slice(), &raw);

    let entry = engine
        .index_entry(SCOPE, TABLE, IndexKind::Digest256, 9)
        .unwrap();
    assert_eq!(entry.value, IndexValue::Digest256(digest));
}

#[test]
fn extended_float_is_stored_bitwise() {
    let (engine, facade) = setup();
    let x = ExtFloat::from_bits(0x4000_c90f_daa2_2168_c235);
    facade.idxldbl(TABLE, SCOPE, PAYER, 3, x).unwrap();

    let wire = engine
        .index_cell_bytes(SCOPE, TABLE, IndexKind::Float80, 3)
        .unwrap();
    assert_eq!(wire.len(), 16);
    assert_eq!(wire.as_slice(), &x.to_le_bytes());
}

#[test]
fn ejecting_the_primary_leaves_all_index_entries() {
    let (engine, facade) = setup();
    facade.inject(TABLE, SCOPE, PAYER, 1, b"row").unwrap();
    facade.idxi(TABLE, SCOPE, PAYER, 1, 10).unwrap();
    facade.idxc(TABLE, SCOPE, PAYER, 1, Digest256::default()).unwrap();

    facade.eject(CODE, TABLE, SCOPE, 1).unwrap();

    // Documented limitation: no cascade on eject.
    assert_eq!(engine.row_count(), 0);
    assert_eq!(engine.index_count(), 2);
}

#[test]
fn index_entries_are_write_only_here_but_visible_to_the_engine() {
    let (engine, facade) = setup();
    facade.idxdbl(TABLE, SCOPE, PAYER, 2, -0.5).unwrap();
    let entry = engine
        .index_entry(SCOPE, TABLE, IndexKind::Float64, 2)
        .unwrap();
    assert_eq!(entry.value, IndexValue::Float64(-0.5));
    assert_eq!(entry.payer, PAYER);
}
