//! Hierarchical addresses
//!
//! An address names a repository, model, object or field. Its canonical text
//! form is `/repo/model/object/field` with trailing components omitted.
//! Addresses compare structurally, so an ancestor always sorts before its
//! descendants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, StoreError};
use crate::id::Id;

/// The deepest level named by an address
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressedType {
    Repository,
    Model,
    Object,
    Field,
}

impl AddressedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressedType::Repository => "repository",
            AddressedType::Model => "model",
            AddressedType::Object => "object",
            AddressedType::Field => "field",
        }
    }
}

impl fmt::Display for AddressedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    repository: Id,
    model: Option<Id>,
    object: Option<Id>,
    field: Option<Id>,
}

impl Address {
    /// Build an address from its components
    ///
    /// # Errors
    /// Returns `InvalidAddress` if the components are not contiguous, e.g.
    /// an object without a model.
    pub fn new(
        repository: Id,
        model: Option<Id>,
        object: Option<Id>,
        field: Option<Id>,
    ) -> Result<Self> {
        let contiguous = match (&model, &object, &field) {
            (None, Some(_), _) | (_, None, Some(_)) => false,
            _ => true,
        };
        let address = Self {
            repository,
            model,
            object,
            field,
        };
        if !contiguous {
            return Err(StoreError::InvalidAddress {
                input: address.to_string(),
                reason: "address components must be contiguous".to_string(),
            });
        }
        Ok(address)
    }

    pub fn repository(repository: Id) -> Self {
        Self {
            repository,
            model: None,
            object: None,
            field: None,
        }
    }

    pub fn model(repository: Id, model: Id) -> Self {
        Self {
            repository,
            model: Some(model),
            object: None,
            field: None,
        }
    }

    pub fn object(repository: Id, model: Id, object: Id) -> Self {
        Self {
            repository,
            model: Some(model),
            object: Some(object),
            field: None,
        }
    }

    pub fn field(repository: Id, model: Id, object: Id, field: Id) -> Self {
        Self {
            repository,
            model: Some(model),
            object: Some(object),
            field: Some(field),
        }
    }

    /// Address of the child entity `id` one level below this address
    ///
    /// # Errors
    /// Returns `InvalidAddress` when called on a field address.
    pub fn child(&self, id: Id) -> Result<Self> {
        let mut child = self.clone();
        match self.addressed_type() {
            AddressedType::Repository => child.model = Some(id),
            AddressedType::Model => child.object = Some(id),
            AddressedType::Object => child.field = Some(id),
            AddressedType::Field => {
                return Err(StoreError::InvalidAddress {
                    input: self.to_string(),
                    reason: "fields have no children".to_string(),
                })
            }
        }
        Ok(child)
    }

    pub fn addressed_type(&self) -> AddressedType {
        if self.field.is_some() {
            AddressedType::Field
        } else if self.object.is_some() {
            AddressedType::Object
        } else if self.model.is_some() {
            AddressedType::Model
        } else {
            AddressedType::Repository
        }
    }

    pub fn repository_id(&self) -> &Id {
        &self.repository
    }

    pub fn model_id(&self) -> Option<&Id> {
        self.model.as_ref()
    }

    pub fn object_id(&self) -> Option<&Id> {
        self.object.as_ref()
    }

    pub fn field_id(&self) -> Option<&Id> {
        self.field.as_ref()
    }

    /// Id of the deepest component
    pub fn last_id(&self) -> &Id {
        self.field
            .as_ref()
            .or(self.object.as_ref())
            .or(self.model.as_ref())
            .unwrap_or(&self.repository)
    }

    /// Address of the direct container, `None` for a repository address
    pub fn parent(&self) -> Option<Self> {
        let mut parent = self.clone();
        match self.addressed_type() {
            AddressedType::Repository => return None,
            AddressedType::Model => parent.model = None,
            AddressedType::Object => parent.object = None,
            AddressedType::Field => parent.field = None,
        }
        Some(parent)
    }

    /// The enclosing model address, `None` for a repository address
    pub fn model_address(&self) -> Option<Self> {
        self.model
            .as_ref()
            .map(|model| Self::model(self.repository.clone(), model.clone()))
    }

    /// The enclosing object address, `None` above object level
    pub fn object_address(&self) -> Option<Self> {
        match (&self.model, &self.object) {
            (Some(model), Some(object)) => Some(Self::object(
                self.repository.clone(),
                model.clone(),
                object.clone(),
            )),
            _ => None,
        }
    }

    /// True if `other` equals this address or lies below it
    pub fn contains(&self, other: &Address) -> bool {
        fn prefix(mine: &Option<Id>, theirs: &Option<Id>) -> bool {
            match mine {
                None => true,
                Some(id) => theirs.as_ref() == Some(id),
            }
        }
        self.repository == other.repository
            && prefix(&self.model, &other.model)
            && prefix(&self.object, &other.object)
            && prefix(&self.field, &other.field)
    }

    /// True if `other` lies strictly below this address
    pub fn is_ancestor_of(&self, other: &Address) -> bool {
        self != other && self.contains(other)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.repository)?;
        for id in [&self.model, &self.object, &self.field].into_iter().flatten() {
            write!(f, "/{}", id)?;
        }
        Ok(())
    }
}

impl FromStr for Address {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: String| StoreError::InvalidAddress {
            input: s.to_string(),
            reason,
        };
        let rest = s
            .strip_prefix('/')
            .ok_or_else(|| invalid("address must start with '/'".to_string()))?;
        let parts: Vec<&str> = rest.split('/').collect();
        if parts.len() > 4 {
            return Err(invalid("address has more than four components".to_string()));
        }
        let mut ids = Vec::with_capacity(parts.len());
        for part in parts {
            ids.push(Id::new(part).map_err(|e| invalid(e.to_string()))?);
        }
        let mut ids = ids.into_iter();
        let repository = ids
            .next()
            .ok_or_else(|| invalid("missing repository id".to_string()))?;
        Ok(Self {
            repository,
            model: ids.next(),
            object: ids.next(),
            field: ids.next(),
        })
    }
}

impl TryFrom<String> for Address {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}
