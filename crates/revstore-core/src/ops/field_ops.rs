use super::{gate_add, gate_existing, Gate, Step};
use crate::commands::{AtomicCommand, ChangeType, Level};
use crate::events::builder::EventDraft;
use crate::model::ModelState;

/// Add or remove a field; its object must exist under every intent
///
/// Either change stamps the owning object with the pending revision.
pub fn apply(state: &mut ModelState, cmd: &AtomicCommand, next: u64) -> Step {
    let (Some(object), Some(field)) = (cmd.address.object_id(), cmd.address.field_id()) else {
        return Step::Failed;
    };
    let Some(object_revision) = state.object(object).map(|o| o.revision) else {
        return Step::Failed;
    };
    let current = state.field(object, field).map(|f| f.revision);
    let model_revision = state.revision();

    match cmd.change_type {
        ChangeType::Add => match gate_add(&cmd.intent, current) {
            Gate::Proceed => {
                state.insert_field(object, field.clone(), next);
                state.stamp_object(object, next);
                Step::Changed(vec![EventDraft::new(
                    ChangeType::Add,
                    Level::Field,
                    cmd.address.clone(),
                )
                .old_revisions(model_revision, Some(object_revision), None)])
            }
            Gate::NoChange => Step::NoChange,
            Gate::Failed => Step::Failed,
        },
        ChangeType::Remove => match gate_existing(&cmd.intent, current) {
            Gate::Proceed => {
                state.remove_field(object, field);
                state.stamp_object(object, next);
                Step::Changed(vec![EventDraft::new(
                    ChangeType::Remove,
                    Level::Field,
                    cmd.address.clone(),
                )
                .old_revisions(model_revision, Some(object_revision), current)])
            }
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
    use crate::commands::Intent;
    use crate::id::Id;

    fn id(s: &str) -> Id {
        Id::new(s).unwrap()
    }

    fn field_address() -> Address {
        Address::field(id("repo"), id("m1"), id("o1"), id("f1"))
    }

    fn with_object() -> ModelState {
        let mut state = ModelState::never_existed(Address::model(id("repo"), id("m1")));
        state.mark_created();
        state.insert_object(id("o1"), 1);
        state.set_revision(1);
        state
    }

    #[test]
    fn test_add_field_stamps_object() {
        let mut state = with_object();
        let step = apply(
            &mut state,
            &AtomicCommand::add_field(field_address(), Intent::SafeStateBound),
            2,
        );
        assert!(matches!(step, Step::Changed(_)));
        assert_eq!(state.field(&id("o1"), &id("f1")).unwrap().revision, 2);
        assert_eq!(state.object(&id("o1")).unwrap().revision, 2);
    }

    #[test]
    fn test_field_on_missing_object_fails_even_forced() {
        let mut state = with_object();
        let address = Address::field(id("repo"), id("m1"), id("o9"), id("f1"));
        let cmd = AtomicCommand::add_field(address, Intent::Forced);
        assert_eq!(apply(&mut state, &cmd, 2), Step::Failed);
    }

    #[test]
    fn test_remove_field_reports_old_revisions() {
        let mut state = with_object();
        state.insert_field(&id("o1"), id("f1"), 2);
        state.stamp_object(&id("o1"), 2);
        state.set_revision(2);

        let step = apply(
            &mut state,
            &AtomicCommand::remove_field(field_address(), Intent::SafeStateBound),
            3,
        );
        let Step::Changed(drafts) = step else {
            panic!("expected change");
        };
        assert_eq!(drafts[0].old_field_revision, Some(2));
        assert_eq!(drafts[0].old_object_revision, Some(2));
        assert_eq!(state.object(&id("o1")).unwrap().revision, 3);
        assert_eq!(state.field_count(), 0);
    }
}
