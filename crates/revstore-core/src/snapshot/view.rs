use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::id::Id;
use crate::model::ModelState;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    pub address: Address,
    pub revision: u64,
    pub value: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSnapshot {
    pub address: Address,
    pub revision: u64,
    pub fields: BTreeMap<Id, FieldSnapshot>,
}

impl ObjectSnapshot {
    pub fn field(&self, id: &Id) -> Option<&FieldSnapshot> {
        self.fields.get(id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub address: Address,
    pub revision: u64,
    pub objects: BTreeMap<Id, ObjectSnapshot>,
}

impl ModelSnapshot {
    pub fn object(&self, id: &Id) -> Option<&ObjectSnapshot> {
        self.objects.get(id)
    }
}

/// Snapshot of an existing model, `None` if never created or removed
pub fn model_snapshot(state: &ModelState) -> Option<ModelSnapshot> {
    if !state.exists() {
        return None;
    }
    let revision = state.revision()?;
    let objects = state
        .objects()
        .filter_map(|object| {
            object_snapshot(state, &object.id).map(|snapshot| (object.id.clone(), snapshot))
        })
        .collect();
    Some(ModelSnapshot {
        address: state.address().clone(),
        revision,
        objects,
    })
}

/// Snapshot of one existing object
pub fn object_snapshot(state: &ModelState, object: &Id) -> Option<ObjectSnapshot> {
    if !state.exists() {
        return None;
    }
    let owner = state.object(object)?;
    let fields = state
        .fields_of(object)
        .map(|field| {
            (
                field.id.clone(),
                FieldSnapshot {
                    address: state.field_address(object, &field.id),
                    revision: field.revision,
                    value: field.value.clone(),
                },
            )
        })
        .collect();
    Some(ObjectSnapshot {
        address: state.object_address(object),
        revision: owner.revision,
        fields,
    })
}
