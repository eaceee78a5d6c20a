#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Scenario A: adding, re-adding and removing a model

mod common;

use common::ModelHarness;
use revstore_core::snapshot::model_snapshot;
use revstore_core::{AtomicCommand, CommandOutcome, Intent, ModelRevision, RevisionPrecondition};

#[test]
fn test_add_model_on_empty_store() {
    // GIVEN a model id that was never created
    let mut harness = ModelHarness::new("m1");
    assert_eq!(
        harness.state.model_revision(),
        ModelRevision::MODEL_DOES_NOT_EXIST_YET
    );

    // WHEN it is added with a safe intent
    let outcome = harness.run(AtomicCommand::add_model(
        harness.model_address(),
        Intent::SafeStateBound,
    ));

    // THEN it is created at revision 0 and has a snapshot
    assert_eq!(outcome, CommandOutcome::Revision(0));
    let snapshot = model_snapshot(&harness.state).unwrap();
    assert_eq!(snapshot.revision, 0);
    assert!(snapshot.objects.is_empty());
}

#[test]
fn test_readding_existing_model() {
    // GIVEN a created model
    let mut harness = ModelHarness::created("m1");

    // WHEN it is added again safely, THEN the command fails
    let safe = AtomicCommand::add_model(harness.model_address(), Intent::SafeStateBound);
    assert_eq!(harness.run(safe), CommandOutcome::Failed);

    // AND a forced add is a no-op
    let forced = AtomicCommand::add_model(harness.model_address(), Intent::Forced);
    assert_eq!(harness.run(forced), CommandOutcome::NoChange);

    // AND nothing was logged for either
    assert_eq!(harness.log.len(), 1);
    assert_eq!(harness.state.revision(), Some(0));
}

#[test]
fn test_removed_model_keeps_identity_and_counter() {
    // GIVEN a created model with one object
    let mut harness = ModelHarness::created("m1");
    let object = harness.model_address().child(common::id("o1")).unwrap();
    harness.run(AtomicCommand::add_object(object, Intent::Forced));

    // WHEN the model is removed
    let outcome = harness.run(AtomicCommand::remove_model(
        harness.model_address(),
        Intent::SafeRevisionBound(RevisionPrecondition::Exactly(1)),
    ));

    // THEN it reports its removal revision and no longer exists
    assert_eq!(outcome, CommandOutcome::Revision(2));
    assert_eq!(harness.state.model_revision(), ModelRevision::new(2, false));
    assert!(harness.state.ever_existed());
    assert!(model_snapshot(&harness.state).is_none());

    // AND re-adding it continues the revision counter
    let outcome = harness.run(AtomicCommand::add_model(
        harness.model_address(),
        Intent::SafeRevisionBound(RevisionPrecondition::NotExisting),
    ));
    assert_eq!(outcome, CommandOutcome::Revision(3));
    assert_eq!(harness.state.object_count(), 0);
}

#[test]
fn test_readd_event_reports_removal_revision() {
    // GIVEN a model created at revision 0 and removed at revision 1
    let mut harness = ModelHarness::created("m1");
    harness.run(AtomicCommand::remove_model(
        harness.model_address(),
        Intent::Forced,
    ));

    // WHEN it is added again
    let outcome = harness.run(AtomicCommand::add_model(
        harness.model_address(),
        Intent::SafeStateBound,
    ));

    // THEN the first add has no prior revision and the re-add reports the removal
    assert_eq!(outcome, CommandOutcome::Revision(2));
    let events = harness.log.events(&harness.model_address(), 0, 2);
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].old_model_revision(), None);
    assert_eq!(events[1].old_model_revision(), Some(0));
    assert_eq!(events[2].old_model_revision(), Some(1));
}

#[test]
fn test_remove_missing_model() {
    // GIVEN a model that was never created
    let mut harness = ModelHarness::new("m1");

    // WHEN it is removed, THEN forced is a no-op and safe fails
    let forced = AtomicCommand::remove_model(harness.model_address(), Intent::Forced);
    assert_eq!(harness.run(forced), CommandOutcome::NoChange);
    let safe = AtomicCommand::remove_model(harness.model_address(), Intent::SafeStateBound);
    assert_eq!(harness.run(safe), CommandOutcome::Failed);
    assert!(!harness.state.ever_existed());
}
