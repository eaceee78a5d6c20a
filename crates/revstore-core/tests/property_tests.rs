#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Randomized command streams against one model

mod common;

use common::{addr, ModelHarness};
use proptest::prelude::*;
use revstore_core::rules::invariants::validate_model;
use revstore_core::{AtomicCommand, CommandOutcome, Intent, RevisionPrecondition, Transaction};

fn state_intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        Just(Intent::Forced),
        Just(Intent::SafeStateBound),
        Just(Intent::SafeRevisionBound(RevisionPrecondition::NotExisting)),
    ]
}

fn intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        state_intent(),
        (0u64..6).prop_map(|n| Intent::SafeRevisionBound(RevisionPrecondition::Exactly(n))),
    ]
}

fn command() -> impl Strategy<Value = AtomicCommand> {
    command_with(intent())
}

/// Commands over a small fixed set of objects and fields so that they collide
fn command_with(intent: impl Strategy<Value = Intent>) -> impl Strategy<Value = AtomicCommand> {
    let object = prop::sample::select(vec!["o1", "o2"]);
    let field = prop::sample::select(vec!["a", "b"]);
    (0u8..7, object, field, intent, 0i32..3).prop_map(|(kind, object, field, intent, value)| {
        let object_address = addr(&format!("/repo/m1/{}", object));
        let field_address = addr(&format!("/repo/m1/{}/{}", object, field));
        match kind {
            0 => AtomicCommand::add_object(object_address, intent),
            1 => AtomicCommand::remove_object(object_address, intent),
            2 => AtomicCommand::add_field(field_address, intent),
            3 => AtomicCommand::remove_field(field_address, intent),
            4 => AtomicCommand::add_value(field_address, intent, value),
            5 => AtomicCommand::change_value(field_address, intent, value),
            _ => AtomicCommand::remove_value(field_address, intent),
        }
    })
}

proptest! {
    #[test]
    fn revisions_increase_by_one_per_change(commands in prop::collection::vec(command(), 1..40)) {
        let mut harness = ModelHarness::created("m1");

        for cmd in commands {
            let before = harness.state.clone();
            let expected = before.next_revision();
            match harness.run(cmd) {
                CommandOutcome::Revision(revision) => {
                    prop_assert_eq!(revision, expected);
                    prop_assert_eq!(harness.log.last_revision(), Some(revision));
                }
                CommandOutcome::NoChange | CommandOutcome::Failed => {
                    prop_assert_eq!(&harness.state, &before);
                }
            }
            prop_assert!(validate_model(&harness.state).is_ok());
        }
    }

    #[test]
    fn transactions_are_all_or_nothing(
        setup in prop::collection::vec(command(), 0..15),
        body in prop::collection::vec(command_with(state_intent()), 1..8),
    ) {
        let mut harness = ModelHarness::created("m1");
        for cmd in setup {
            harness.run(cmd);
        }
        let before = harness.state.clone();

        // Without revision preconditions, applying the body one command at a
        // time fails exactly when the transaction does.
        let mut scratch = ModelHarness::created("m1");
        scratch.state = before.clone();
        let any_failed = body
            .iter()
            .any(|cmd| scratch.run(cmd.clone()) == CommandOutcome::Failed);

        let model = harness.model_address();
        let outcome = harness.run(Transaction::new(model, body));
        match outcome {
            CommandOutcome::Failed => {
                prop_assert!(any_failed);
                prop_assert_eq!(&harness.state, &before);
            }
            CommandOutcome::NoChange => prop_assert_eq!(&harness.state, &before),
            CommandOutcome::Revision(revision) => {
                prop_assert!(!any_failed);
                prop_assert_eq!(revision, before.next_revision());
                let event = harness.log.event_at(revision).unwrap();
                prop_assert!(event.as_transaction().is_some());
            }
        }
    }
}
