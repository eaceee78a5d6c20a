use std::collections::BTreeMap;

use super::{FieldState, ModelRevision, ObjectState};
use crate::address::Address;
use crate::id::Id;
use crate::value::Value;

/// Arena key of a field: `(object id, field id)`
pub type FieldKey = (Id, Id);

/// State of one model and its whole subtree
///
/// Objects and fields live in flat ordered maps; a field's parent is found by
/// key lookup. Cloning a `ModelState` yields an independent working copy, and
/// discarding that copy is a complete rollback.
///
/// A model that was never created has `revision == None`. A removed model
/// keeps its last revision with `exists == false` and an empty arena.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelState {
    address: Address,
    revision: Option<u64>,
    exists: bool,
    objects: BTreeMap<Id, ObjectState>,
    fields: BTreeMap<FieldKey, FieldState>,
}

impl ModelState {
    /// State of a model id that has never been created
    ///
    /// `address` must be a model address.
    pub fn never_existed(address: Address) -> Self {
        Self {
            address,
            revision: None,
            exists: false,
            objects: BTreeMap::new(),
            fields: BTreeMap::new(),
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn id(&self) -> &Id {
        self.address.last_id()
    }

    pub fn revision(&self) -> Option<u64> {
        self.revision
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    /// True once the model has been created, even if later removed
    pub fn ever_existed(&self) -> bool {
        self.revision.is_some()
    }

    /// Revision the next successful command will be committed at
    pub fn next_revision(&self) -> u64 {
        self.revision.map_or(0, |revision| revision + 1)
    }

    pub fn model_revision(&self) -> ModelRevision {
        match self.revision {
            Some(revision) => ModelRevision::new(revision, self.exists),
            None => ModelRevision::MODEL_DOES_NOT_EXIST_YET,
        }
    }

    // ===== Reads =====

    pub fn object(&self, id: &Id) -> Option<&ObjectState> {
        self.objects.get(id)
    }

    pub fn has_object(&self, id: &Id) -> bool {
        self.objects.contains_key(id)
    }

    /// Objects in id order
    pub fn objects(&self) -> impl Iterator<Item = &ObjectState> {
        self.objects.values()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn field(&self, object: &Id, field: &Id) -> Option<&FieldState> {
        self.fields.get(&(object.clone(), field.clone()))
    }

    /// Fields of one object in id order
    pub fn fields_of<'a>(&'a self, object: &'a Id) -> impl Iterator<Item = &'a FieldState> + 'a {
        self.field_range(object).map(|(_, field)| field)
    }

    /// Arena entries of one object's fields; keys sort by object id first
    fn field_range<'a>(
        &'a self,
        object: &'a Id,
    ) -> impl Iterator<Item = (&'a FieldKey, &'a FieldState)> + 'a {
        self.fields
            .range((object.clone(), Id::floor())..)
            .take_while(move |((owner, _), _)| owner == object)
    }

    /// Every field entry with its arena key
    pub fn field_entries(&self) -> impl Iterator<Item = (&FieldKey, &FieldState)> {
        self.fields.iter()
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn object_address(&self, object: &Id) -> Address {
        Address::object(
            self.address.repository_id().clone(),
            self.id().clone(),
            object.clone(),
        )
    }

    pub fn field_address(&self, object: &Id, field: &Id) -> Address {
        Address::field(
            self.address.repository_id().clone(),
            self.id().clone(),
            object.clone(),
            field.clone(),
        )
    }

    // ===== Mutations (working copies only) =====

    pub(crate) fn mark_created(&mut self) {
        self.exists = true;
    }

    /// Drop the whole subtree and flag the model as removed
    pub(crate) fn mark_removed(&mut self) {
        self.exists = false;
        self.objects.clear();
        self.fields.clear();
    }

    pub(crate) fn set_revision(&mut self, revision: u64) {
        self.revision = Some(revision);
    }

    pub(crate) fn insert_object(&mut self, id: Id, revision: u64) {
        self.objects
            .insert(id.clone(), ObjectState::new(id, revision));
    }

    /// Remove an object and return it with its fields (in id order)
    pub(crate) fn remove_object(&mut self, id: &Id) -> Option<(ObjectState, Vec<FieldState>)> {
        let object = self.objects.remove(id)?;
        let keys: Vec<FieldKey> = self.field_range(id).map(|(key, _)| key.clone()).collect();
        let fields = keys
            .iter()
            .filter_map(|key| self.fields.remove(key))
            .collect();
        Some((object, fields))
    }

    pub(crate) fn stamp_object(&mut self, id: &Id, revision: u64) {
        if let Some(object) = self.objects.get_mut(id) {
            object.revision = revision;
        }
    }

    pub(crate) fn insert_field(&mut self, object: &Id, id: Id, revision: u64) {
        self.fields.insert(
            (object.clone(), id.clone()),
            FieldState::new(id, revision),
        );
    }

    pub(crate) fn remove_field(&mut self, object: &Id, id: &Id) -> Option<FieldState> {
        self.fields.remove(&(object.clone(), id.clone()))
    }

    /// Replace a field's value and stamp it; returns false if the field is missing
    pub(crate) fn set_value(
        &mut self,
        object: &Id,
        field: &Id,
        value: Option<Value>,
        revision: u64,
    ) -> bool {
        match self.fields.get_mut(&(object.clone(), field.clone())) {
            Some(state) => {
                state.value = value;
                state.revision = revision;
                true
            }
            None => false,
        }
    }
}
