use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{Result, StoreError};

/// Maximum length of an id in characters
pub const MAX_ID_LENGTH: usize = 100;

/// Identifier of one entity at one level of the tree
///
/// Ids start with a letter or `_` and continue with letters, digits, `_`,
/// `-` or `.`. They never contain `/`, which separates address components.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Id(String);

impl Id {
    /// Parse and validate an id
    ///
    /// # Errors
    /// Returns `InvalidId` if the text is empty, too long, or contains
    /// characters outside the id alphabet.
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        validate(&text)?;
        Ok(Self(text))
    }

    /// Generate a fresh, unique id
    pub fn generate() -> Self {
        Self(format!("_{}", Uuid::now_v7().simple()))
    }

    /// Sorts before every valid id; only used as a range bound
    pub(crate) fn floor() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn validate(text: &str) -> Result<()> {
    let invalid = |reason: &str| StoreError::InvalidId {
        id: text.to_string(),
        reason: reason.to_string(),
    };

    let mut chars = text.chars();
    let first = chars.next().ok_or_else(|| invalid("id cannot be empty"))?;
    if text.chars().count() > MAX_ID_LENGTH {
        return Err(invalid("id is longer than 100 characters"));
    }
    if !(first.is_alphabetic() || first == '_') {
        return Err(invalid("id must start with a letter or '_'"));
    }
    if let Some(bad) = chars.find(|c| !(c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))) {
        return Err(invalid(&format!("illegal character '{}'", bad)));
    }
    Ok(())
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Id {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        Id::new(s)
    }
}

impl TryFrom<String> for Id {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self> {
        Id::new(value)
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.0
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ids() {
        for text in ["m1", "_hidden", "model.v2", "a-b_c", "Ärger"] {
            assert!(Id::new(text).is_ok(), "{} should be valid", text);
        }
    }

    #[test]
    fn test_invalid_ids() {
        for text in ["", "1abc", "a/b", "a b", "-x"] {
            assert!(
                matches!(Id::new(text), Err(StoreError::InvalidId { .. })),
                "{:?} should be invalid",
                text
            );
        }
    }

    #[test]
    fn test_id_length_limit() {
        let ok = "a".repeat(MAX_ID_LENGTH);
        let too_long = "a".repeat(MAX_ID_LENGTH + 1);
        assert!(Id::new(ok).is_ok());
        assert!(Id::new(too_long).is_err());
    }

    #[test]
    fn test_generated_ids_are_valid_and_unique() {
        let a = Id::generate();
        let b = Id::generate();
        assert_ne!(a, b);
        assert!(Id::new(a.as_str()).is_ok());
    }

    #[test]
    fn test_serde_rejects_invalid_id() {
        let ok: Id = serde_json::from_str("\"o1\"").unwrap();
        assert_eq!(ok.as_str(), "o1");
        assert!(serde_json::from_str::<Id>("\"a/b\"").is_err());
    }
}
