#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Scenario D: a transaction commits several commands at one revision

mod common;

use common::{addr, id, ModelHarness};
use revstore_core::{
    AtomicCommand, ChangeType, CommandOutcome, Intent, Level, Transaction, Value,
};

fn build_object_txn(model: &ModelHarness) -> Transaction {
    Transaction::new(
        model.model_address(),
        vec![
            AtomicCommand::add_object(addr("/repo/m1/o1"), Intent::SafeStateBound),
            AtomicCommand::add_field(addr("/repo/m1/o1/f1"), Intent::SafeStateBound),
            AtomicCommand::add_value(addr("/repo/m1/o1/f1"), Intent::SafeStateBound, "y"),
        ],
    )
}

#[test]
fn test_transaction_commits_at_one_revision() {
    // GIVEN a created model
    let mut harness = ModelHarness::created("m1");

    // WHEN a three-command transaction runs
    let txn = build_object_txn(&harness);
    let outcome = harness.run(txn);

    // THEN exactly one revision is minted
    assert_eq!(outcome, CommandOutcome::Revision(1));
    assert_eq!(harness.state.revision(), Some(1));
    assert_eq!(harness.state.object(&id("o1")).unwrap().revision, 1);
    assert_eq!(
        harness.state.field(&id("o1"), &id("f1")).unwrap().value,
        Some(Value::from("y"))
    );

    // AND one transaction event with three in-transaction events is logged
    let events = harness.log.events(&harness.model_address(), 1, 1);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].change_type(), ChangeType::Transaction);
    let txn = events[0].as_transaction().unwrap();
    assert_eq!(txn.target, harness.model_address());
    assert_eq!(txn.len(), 3);
    assert!(txn.events.iter().all(|e| e.in_transaction));
    assert!(txn.events.iter().all(|e| !e.implied));
    assert!(txn.events.iter().all(|e| e.revision == 1));
    let levels: Vec<Level> = txn.events.iter().map(|e| e.level).collect();
    assert_eq!(levels, vec![Level::Object, Level::Field, Level::Value]);
}

#[test]
fn test_object_target_transaction() {
    // GIVEN an existing object
    let mut harness = ModelHarness::created("m1");
    harness.run(AtomicCommand::add_object(addr("/repo/m1/o1"), Intent::Forced));

    // WHEN a transaction targets the object
    let txn = Transaction::new(
        addr("/repo/m1/o1"),
        vec![
            AtomicCommand::add_field(addr("/repo/m1/o1/a"), Intent::Forced),
            AtomicCommand::add_field(addr("/repo/m1/o1/b"), Intent::Forced),
        ],
    );
    let outcome = harness.run(txn);

    // THEN the wrapping event records the object's old revision
    assert_eq!(outcome, CommandOutcome::Revision(2));
    let event = harness.log.event_at(2).unwrap();
    let wrapped = event.as_transaction().unwrap();
    assert_eq!(wrapped.target, addr("/repo/m1/o1"));
    assert_eq!(wrapped.old_model_revision, Some(1));
    assert_eq!(wrapped.old_object_revision, Some(1));
}

#[test]
fn test_single_effective_command_is_still_wrapped() {
    let mut harness = ModelHarness::created("m1");
    let txn = Transaction::new(
        harness.model_address(),
        vec![
            AtomicCommand::add_object(addr("/repo/m1/o1"), Intent::Forced),
            AtomicCommand::remove_object(addr("/repo/m1/o2"), Intent::Forced),
        ],
    );
    assert_eq!(harness.run(txn), CommandOutcome::Revision(1));
    let event = harness.log.event_at(1).unwrap();
    assert_eq!(event.as_transaction().unwrap().len(), 1);
}

#[test]
fn test_transaction_with_cascade_keeps_command_order() {
    // GIVEN an object with a field
    let mut harness = ModelHarness::created("m1");
    harness.run(AtomicCommand::add_object(addr("/repo/m1/o1"), Intent::Forced));
    harness.run(AtomicCommand::add_field(addr("/repo/m1/o1/f1"), Intent::Forced));

    // WHEN a transaction adds an object and removes the populated one
    let txn = Transaction::new(
        harness.model_address(),
        vec![
            AtomicCommand::add_object(addr("/repo/m1/o2"), Intent::Forced),
            AtomicCommand::remove_object(addr("/repo/m1/o1"), Intent::SafeStateBound),
        ],
    );
    assert_eq!(harness.run(txn), CommandOutcome::Revision(3));

    // THEN cascade events are interleaved at the remove's position
    let event = harness.log.event_at(3).unwrap();
    let entities: Vec<(String, bool)> = event
        .as_transaction()
        .unwrap()
        .events
        .iter()
        .map(|e| (e.changed_entity.to_string(), e.implied))
        .collect();
    assert_eq!(
        entities,
        vec![
            ("/repo/m1/o2".to_string(), false),
            ("/repo/m1/o1/f1".to_string(), true),
            ("/repo/m1/o1".to_string(), false),
        ]
    );
}
