use super::{revision_matches, Step};
use crate::commands::{AtomicCommand, ChangeType, Intent, Level};
use crate::events::builder::EventDraft;
use crate::id::Id;
use crate::model::ModelState;
use crate::value::Value;

/// Set, change or clear the value held by a field
///
/// The field must exist under every intent. Revision-bound preconditions are
/// checked against the field's revision. Writing a value equal to the held
/// one is always a no-op.
pub fn apply(state: &mut ModelState, cmd: &AtomicCommand, next: u64) -> Step {
    let (Some(object), Some(field)) = (cmd.address.object_id(), cmd.address.field_id()) else {
        return Step::Failed;
    };
    let Some(field_state) = state.field(object, field) else {
        return Step::Failed;
    };
    let field_revision = field_state.revision;
    let held = field_state.value.clone();
    let revision_ok = match &cmd.intent {
        Intent::SafeRevisionBound(precondition) => revision_matches(precondition, field_revision),
        _ => true,
    };

    let write = match (cmd.change_type, cmd.value.clone()) {
        (ChangeType::Add, Some(value)) => match held {
            Some(_) if !cmd.intent.is_forced() => return Step::Failed,
            Some(current) if current == value => return Step::NoChange,
            // Forced add over a different value overwrites it.
            Some(_) => Write::Set(ChangeType::Change, value),
            None if !revision_ok => return Step::Failed,
            None => Write::Set(ChangeType::Add, value),
        },
        (ChangeType::Change, Some(value)) => match held {
            Some(_) if !revision_ok => return Step::Failed,
            Some(current) if current == value => return Step::NoChange,
            Some(_) => Write::Set(ChangeType::Change, value),
            None if cmd.intent.is_forced() => Write::Set(ChangeType::Add, value),
            None => return Step::Failed,
        },
        (ChangeType::Remove, _) => match held {
            Some(_) if !revision_ok => return Step::Failed,
            Some(_) => Write::Clear,
            None if cmd.intent.is_forced() => return Step::NoChange,
            None => return Step::Failed,
        },
        _ => return Step::Failed,
    };

    Step::Changed(vec![commit(state, cmd, object, field, field_revision, write, next)])
}

enum Write {
    Set(ChangeType, Value),
    Clear,
}

fn commit(
    state: &mut ModelState,
    cmd: &AtomicCommand,
    object: &Id,
    field: &Id,
    field_revision: u64,
    write: Write,
    next: u64,
) -> EventDraft {
    let model_revision = state.revision();
    let object_revision = state.object(object).map(|o| o.revision);
    let (change_type, value) = match write {
        Write::Set(change_type, value) => (change_type, Some(value)),
        Write::Clear => (ChangeType::Remove, None),
    };
    state.set_value(object, field, value.clone(), next);
    state.stamp_object(object, next);
    EventDraft::new(change_type, Level::Value, cmd.address.clone())
        .old_revisions(model_revision, object_revision, Some(field_revision))
        .with_value(value)
}
