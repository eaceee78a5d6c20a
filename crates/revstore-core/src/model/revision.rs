//! Revision primitives
//!
//! Outcomes are explicit inside the kernel; the `-1` / `-2` encoding exists
//! only at the wire boundary via [`CommandOutcome::to_wire`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Result of executing a command or transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandOutcome {
    /// The change was committed at this model revision
    Revision(u64),
    /// A forced command whose application would not alter state
    NoChange,
    /// Preconditions rejected the command; nothing was changed
    Failed,
}

impl CommandOutcome {
    /// Wire value of `Failed`
    pub const FAILED: i64 = -1;
    /// Wire value of `NoChange`
    pub const NO_CHANGE: i64 = -2;

    /// Encode as the compatible integer form
    pub fn to_wire(self) -> i64 {
        match self {
            // Revisions are minted one at a time, so they stay far below i64::MAX.
            CommandOutcome::Revision(revision) => i64::try_from(revision).unwrap_or(i64::MAX),
            CommandOutcome::NoChange => Self::NO_CHANGE,
            CommandOutcome::Failed => Self::FAILED,
        }
    }

    /// Decode the integer form; `None` for values below `NO_CHANGE`
    pub fn from_wire(value: i64) -> Option<Self> {
        match value {
            Self::FAILED => Some(CommandOutcome::Failed),
            Self::NO_CHANGE => Some(CommandOutcome::NoChange),
            n if n >= 0 => Some(CommandOutcome::Revision(n as u64)),
            _ => None,
        }
    }

    pub fn revision(self) -> Option<u64> {
        match self {
            CommandOutcome::Revision(revision) => Some(revision),
            _ => None,
        }
    }

    pub fn is_failed(self) -> bool {
        self == CommandOutcome::Failed
    }

    pub fn is_no_change(self) -> bool {
        self == CommandOutcome::NoChange
    }
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutcome::Revision(revision) => write!(f, "revision {}", revision),
            CommandOutcome::NoChange => f.write_str("no_change"),
            CommandOutcome::Failed => f.write_str("failed"),
        }
    }
}

/// Latest known state of a model: its revision and whether it exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelRevision {
    revision: i64,
    model_exists: bool,
}

impl ModelRevision {
    /// Sentinel for a model id that was never created
    pub const MODEL_DOES_NOT_EXIST_YET: ModelRevision = ModelRevision {
        revision: -1,
        model_exists: false,
    };

    pub fn new(revision: u64, model_exists: bool) -> Self {
        Self {
            revision: i64::try_from(revision).unwrap_or(i64::MAX),
            model_exists,
        }
    }

    /// Revision number, `-1` for the never-created sentinel
    pub fn revision(&self) -> i64 {
        self.revision
    }

    pub fn model_exists(&self) -> bool {
        self.model_exists
    }

    /// True unless this is the never-created sentinel
    pub fn is_known(&self) -> bool {
        *self != Self::MODEL_DOES_NOT_EXIST_YET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_encoding_is_preserved() {
        assert_eq!(CommandOutcome::Failed.to_wire(), -1);
        assert_eq!(CommandOutcome::NoChange.to_wire(), -2);
        assert_eq!(CommandOutcome::Revision(0).to_wire(), 0);
        assert_eq!(CommandOutcome::Revision(41).to_wire(), 41);
    }

    #[test]
    fn test_wire_decoding() {
        assert_eq!(CommandOutcome::from_wire(-1), Some(CommandOutcome::Failed));
        assert_eq!(CommandOutcome::from_wire(-2), Some(CommandOutcome::NoChange));
        assert_eq!(
            CommandOutcome::from_wire(7),
            Some(CommandOutcome::Revision(7))
        );
        assert_eq!(CommandOutcome::from_wire(-3), None);
    }

    #[test]
    fn test_model_revision_sentinel() {
        let sentinel = ModelRevision::MODEL_DOES_NOT_EXIST_YET;
        assert_eq!(sentinel.revision(), -1);
        assert!(!sentinel.model_exists());
        assert!(!sentinel.is_known());

        let removed = ModelRevision::new(4, false);
        assert!(removed.is_known());
        assert!(!removed.model_exists());
    }
}
