use super::{cascade, gate_add, gate_existing, Gate, Step};
use crate::commands::{AtomicCommand, ChangeType, Level};
use crate::events::builder::EventDraft;
use crate::model::ModelState;

/// Add or remove the model itself
///
/// A removed model counts as absent for preconditions but keeps its
/// revision counter, so re-adding it continues from there.
pub fn apply(state: &mut ModelState, cmd: &AtomicCommand) -> Step {
    let current = if state.exists() { state.revision() } else { None };

    match cmd.change_type {
        ChangeType::Add => match gate_add(&cmd.intent, current) {
            Gate::Proceed => {
                // A re-add reports the revision the removal left behind.
                let previous = state.revision();
                state.mark_created();
                Step::Changed(vec![EventDraft::new(
                    ChangeType::Add,
                    Level::Model,
                    state.address().clone(),
                )
                .old_revisions(previous, None, None)])
            }
            Gate::NoChange => Step::NoChange,
            Gate::Failed => Step::Failed,
        },
        ChangeType::Remove => match gate_existing(&cmd.intent, current) {
            Gate::Proceed => Step::Changed(cascade::remove_model(state)),
            Gate::NoChange => Step::NoChange,
            Gate::Failed => Step::Failed,
        },
        ChangeType::Change | ChangeType::Transaction => Step::Failed,
    }
}
