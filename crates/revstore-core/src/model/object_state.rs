use serde::{Deserialize, Serialize};

use crate::id::Id;

/// An object inside a model's arena
///
/// Fields are not owned directly; they live in the model's field map keyed
/// by `(object id, field id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectState {
    pub id: Id,

    /// Model revision of the last command that touched this object or one of its fields
    pub revision: u64,
}

impl ObjectState {
    pub fn new(id: Id, revision: u64) -> Self {
        Self { id, revision }
    }
}
