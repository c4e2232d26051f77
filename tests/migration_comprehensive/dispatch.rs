//! Envelope dispatch through the action registry.

use crate::test_utils::{setup, PAYER, SCOPE, TABLE};
use migradb::{registry, DispatchError, IndexKind, Name, Output};
use serde_json::json;

#[test]
fn full_surface_via_envelopes() {
    let (engine, facade) = setup();
    let registry = registry();

    let store_ops = [
        ("inject", json!({"table": "accounts", "scope": "alice", "payer": "bob", "id": 1, "data": "cm93"})),
        ("idxi", json!({"table": "accounts", "scope": "alice", "payer": "bob", "id": 1, "secondary": 42})),
        ("idxii", json!({"table": "accounts", "scope": "alice", "payer": "bob", "id": 1, "secondary": "99999999999999999999999999999"})),
        ("idxc", json!({"table": "accounts", "scope": "alice", "payer": "bob", "id": 1, "secondary": "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff"})),
        ("idxdbl", json!({"table": "accounts", "scope": "alice", "payer": "bob", "id": 1, "secondary": 1.5})),
        ("idxldbl", json!({"table": "accounts", "scope": "alice", "payer": "bob", "id": 1, "secondary": "0000000000000000c0ff000000000000"})),
    ];
    for (op, args) in store_ops {
        let action: Name = op.parse().unwrap();
        let output = registry.dispatch(&facade, action, &args).unwrap();
        assert!(matches!(output, Output::Locator(slot) if slot >= 0), "{op}");
    }
    assert_eq!(engine.row_count(), 1);
    assert_eq!(engine.index_count(), 5);

    let eject_args = json!({"account": "migrator", "table": "accounts", "scope": "alice", "id": 1});
    let action: Name = "eject".parse().unwrap();
    assert_eq!(
        registry.dispatch(&facade, action, &eject_args).unwrap(),
        Output::Unit
    );
    assert_eq!(engine.row_count(), 0);
    // eject never cascades into the index sub-tables.
    assert_eq!(engine.index_count(), 5);
}

#[test]
fn envelope_names_match_typed_state() {
    let (engine, facade) = setup();
    let args = json!({
        "table": TABLE.to_string(),
        "scope": SCOPE.to_string(),
        "payer": PAYER.to_string(),
        "id": 8,
        "secondary": 64,
    });
    registry()
        .dispatch(&facade, "idxi".parse().unwrap(), &args)
        .unwrap();
    let entry = engine.index_entry(SCOPE, TABLE, IndexKind::U64, 8).unwrap();
    assert_eq!(entry.payer, PAYER);
}

#[test]
fn unknown_action_fails_before_any_effect() {
    let (engine, facade) = setup();
    let bogus: Name = "settle".parse().unwrap();
    let err = registry().dispatch(&facade, bogus, &json!({})).unwrap_err();
    assert_eq!(err, DispatchError::UnknownAction { action: bogus });
    assert_eq!(engine.row_count(), 0);
}

#[test]
fn malformed_payload_is_bad_arguments() {
    let (engine, facade) = setup();
    let args = json!({"table": "accounts", "scope": "alice", "id": "not-a-number"});
    let err = registry()
        .dispatch(&facade, "inject".parse().unwrap(), &args)
        .unwrap_err();
    assert!(matches!(err, DispatchError::BadArguments { .. }));
    assert_eq!(engine.row_count(), 0);
}

#[test]
fn store_errors_surface_through_dispatch() {
    let (_engine, facade) = setup();
    let args = json!({
        "table": "accounts", "scope": "alice", "payer": "bob", "id": 1, "data": "cm93",
    });
    let inject: Name = "inject".parse().unwrap();
    registry().dispatch(&facade, inject, &args).unwrap();
    let err = registry().dispatch(&facade, inject, &args).unwrap_err();
    assert!(matches!(err, DispatchError::DuplicateKey { .. }));

    let empty = json!({
        "table": "accounts", "scope": "alice", "payer": "bob", "id": 2, "data": "",
    });
    let err = registry().dispatch(&facade, inject, &empty).unwrap_err();
    assert!(matches!(err, DispatchError::InvalidArgument { .. }));
}

#[test]
fn eject_under_foreign_account_via_envelope() {
    let (engine, facade) = setup();
    facade.inject(TABLE, SCOPE, PAYER, 3, b"row").unwrap();

    let args = json!({"account": "outsider", "table": "accounts", "scope": "alice", "id": 3});
    let err = registry()
        .dispatch(&facade, "eject".parse().unwrap(), &args)
        .unwrap_err();
    assert!(matches!(err, DispatchError::NotFound { .. }));
    assert_eq!(engine.row_count(), 1);
}
