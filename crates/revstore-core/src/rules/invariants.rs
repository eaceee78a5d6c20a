//! Tree invariants of a single model
//!
//! Each finder returns every violation it sees; `validate_model` reports the
//! first one as an error. The executor validates every working copy before it
//! is committed.

use crate::address::Address;
use crate::errors::{Result, StoreError};
use crate::model::{FieldKey, ModelState};

/// Fields whose owning object does not exist
pub fn find_orphan_fields(state: &ModelState) -> Vec<FieldKey> {
    state
        .field_entries()
        .filter(|((object, _), _)| !state.has_object(object))
        .map(|(key, _)| key.clone())
        .collect()
}

/// Entities stamped with a revision newer than the model's
pub fn find_future_revisions(state: &ModelState) -> Vec<Address> {
    let Some(model_revision) = state.revision() else {
        // A never-created model cannot hold anything.
        return find_entities_in_absent_model(state);
    };

    let objects = state
        .objects()
        .filter(|object| object.revision > model_revision)
        .map(|object| state.object_address(&object.id));
    let fields = state
        .field_entries()
        .filter(|(_, field)| field.revision > model_revision)
        .map(|((object, field), _)| state.field_address(object, field));
    objects.chain(fields).collect()
}

/// Objects or fields held by a model that does not exist
pub fn find_entities_in_absent_model(state: &ModelState) -> Vec<Address> {
    if state.exists() {
        return Vec::new();
    }
    let objects = state.objects().map(|object| state.object_address(&object.id));
    let fields = state
        .field_entries()
        .map(|((object, field), _)| state.field_address(object, field));
    objects.chain(fields).collect()
}

/// Fields touched more recently than their owning object
pub fn find_objects_behind_fields(state: &ModelState) -> Vec<Address> {
    state
        .field_entries()
        .filter(|((object, _), field)| {
            state
                .object(object)
                .is_some_and(|owner| owner.revision < field.revision)
        })
        .map(|((object, _), _)| state.object_address(object))
        .collect()
}

/// Run every invariant check against one model
///
/// # Errors
/// Returns `InvariantViolation` describing the first violation found.
pub fn validate_model(state: &ModelState) -> Result<()> {
    let violation = |reason: String| StoreError::InvariantViolation {
        model: state.address().to_string(),
        reason,
    };

    if let Some(address) = find_entities_in_absent_model(state).first() {
        return Err(violation(format!("{} exists in an absent model", address)));
    }
    if let Some((object, field)) = find_orphan_fields(state).first() {
        return Err(violation(format!(
            "field {} has no object {}",
            field, object
        )));
    }
    if let Some(address) = find_future_revisions(state).first() {
        return Err(violation(format!(
            "{} has a revision newer than its model",
            address
        )));
    }
    if let Some(address) = find_objects_behind_fields(state).first() {
        return Err(violation(format!(
            "{} is older than one of its fields",
            address
        )));
    }
    Ok(())
}
