use serde::{Deserialize, Serialize};

use crate::id::Id;
use crate::value::Value;

/// A field inside a model's arena, holding at most one value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldState {
    pub id: Id,

    /// Model revision of the last command that touched this field
    pub revision: u64,

    pub value: Option<Value>,
}

impl FieldState {
    pub fn new(id: Id, revision: u64) -> Self {
        Self {
            id,
            revision,
            value: None,
        }
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_field_is_empty() {
        let field = FieldState::new(Id::new("f1").unwrap(), 3);
        assert_eq!(field.revision, 3);
        assert!(!field.has_value());
    }
}
