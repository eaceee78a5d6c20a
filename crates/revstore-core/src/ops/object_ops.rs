use super::{cascade, gate_add, gate_existing, Gate, Step};
use crate::commands::{AtomicCommand, ChangeType, Level};
use crate::events::builder::EventDraft;
use crate::model::ModelState;

/// Add or remove an object; the model must exist under every intent
pub fn apply(state: &mut ModelState, cmd: &AtomicCommand, next: u64) -> Step {
    let Some(object) = cmd.address.object_id() else {
        return Step::Failed;
    };
    if !state.exists() {
        return Step::Failed;
    }
    let current = state.object(object).map(|o| o.revision);

    match cmd.change_type {
        ChangeType::Add => match gate_add(&cmd.intent, current) {
            Gate::Proceed => {
                state.insert_object(object.clone(), next);
                Step::Changed(vec![EventDraft::new(
                    ChangeType::Add,
                    Level::Object,
                    cmd.address.clone(),
                )
                .old_revisions(state.revision(), None, None)])
            }
            Gate::NoChange => Step::NoChange,
            Gate::Failed => Step::Failed,
        },
        ChangeType::Remove => match gate_existing(&cmd.intent, current) {
            Gate::Proceed => Step::Changed(cascade::remove_object(state, object)),
            Gate::NoChange => Step::NoChange,
            Gate::Failed => Step::Failed,
        },
        ChangeType::Change | ChangeType::Transaction => Step::Failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::commands::{Intent, RevisionPrecondition};
    use crate::id::Id;

    fn id(s: &str) -> Id {
        Id::new(s).unwrap()
    }

    fn object_address() -> Address {
        Address::object(id("repo"), id("m1"), id("o1"))
    }

    fn model() -> ModelState {
        let mut state = ModelState::never_existed(Address::model(id("repo"), id("m1")));
        state.mark_created();
        state.set_revision(0);
        state
    }

    #[test]
    fn test_add_object_stamps_pending_revision() {
        let mut state = model();
        let step = apply(
            &mut state,
            &AtomicCommand::add_object(object_address(), Intent::SafeStateBound),
            1,
        );
        let Step::Changed(drafts) = step else {
            panic!("expected change");
        };
        assert_eq!(drafts[0].old_model_revision, Some(0));
        assert_eq!(state.object(&id("o1")).unwrap().revision, 1);
    }

    #[test]
    fn test_forced_add_in_missing_model_fails() {
        let mut state = ModelState::never_existed(Address::model(id("repo"), id("m1")));
        let cmd = AtomicCommand::add_object(object_address(), Intent::Forced);
        assert_eq!(apply(&mut state, &cmd, 0), Step::Failed);
    }

    #[test]
    fn test_remove_missing_object() {
        let mut state = model();
        let forced = AtomicCommand::remove_object(object_address(), Intent::Forced);
        let safe = AtomicCommand::remove_object(object_address(), Intent::SafeStateBound);
        assert_eq!(apply(&mut state, &forced, 1), Step::NoChange);
        assert_eq!(apply(&mut state, &safe, 1), Step::Failed);
    }

    #[test]
    fn test_revision_bound_remove() {
        let mut state = model();
        state.insert_object(id("o1"), 1);
        state.set_revision(1);

        let stale = AtomicCommand::remove_object(
            object_address(),
            Intent::SafeRevisionBound(RevisionPrecondition::Exactly(0)),
        );
        assert_eq!(apply(&mut state, &stale, 2), Step::Failed);

        let fresh = AtomicCommand::remove_object(
            object_address(),
            Intent::SafeRevisionBound(RevisionPrecondition::Exactly(1)),
        );
        assert!(matches!(apply(&mut state, &fresh, 2), Step::Changed(_)));
        assert!(!state.has_object(&id("o1")));
    }
}
