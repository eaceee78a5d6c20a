//! Cascading removal
//!
//! Removing a container destroys its whole subtree. Drafts are emitted
//! children-first: for each object in id order its fields, then the object,
//! and the explicitly removed entity last.

use crate::commands::{ChangeType, Level};
use crate::events::builder::EventDraft;
use crate::id::Id;
use crate::model::ModelState;

/// Remove an object and its fields
///
/// Returns no drafts if the object does not exist.
pub fn remove_object(state: &mut ModelState, object: &Id) -> Vec<EventDraft> {
    let mut drafts = remove_object_subtree(state, object);
    if let Some(explicit) = drafts.last_mut() {
        explicit.implied = false;
    }
    drafts
}

/// Remove every object and field of the model and flag it as removed
pub fn remove_model(state: &mut ModelState) -> Vec<EventDraft> {
    let old_model = state.revision();
    let object_ids: Vec<Id> = state.objects().map(|o| o.id.clone()).collect();

    let mut drafts = Vec::new();
    for object in &object_ids {
        drafts.extend(remove_object_subtree(state, object));
    }
    state.mark_removed();
    drafts.push(
        EventDraft::new(ChangeType::Remove, Level::Model, state.address().clone())
            .old_revisions(old_model, None, None),
    );
    tracing::debug!(
        model = %state.address(),
        removed = drafts.len(),
        "model subtree removed"
    );
    drafts
}

/// Every draft of the subtree, all marked implied, object last
fn remove_object_subtree(state: &mut ModelState, object: &Id) -> Vec<EventDraft> {
    let old_model = state.revision();
    let object_address = state.object_address(object);
    let Some((removed, fields)) = state.remove_object(object) else {
        return Vec::new();
    };

    let mut drafts: Vec<EventDraft> = fields
        .iter()
        .map(|field| {
            EventDraft::new(
                ChangeType::Remove,
                Level::Field,
                state.field_address(object, &field.id),
            )
            .old_revisions(old_model, Some(removed.revision), Some(field.revision))
            .implied()
        })
        .collect();
    drafts.push(
        EventDraft::new(ChangeType::Remove, Level::Object, object_address)
            .old_revisions(old_model, Some(removed.revision), None)
            .implied(),
    );
    drafts
}
