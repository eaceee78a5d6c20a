use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::commands::{ChangeType, Level};
use crate::id::Id;
use crate::value::Value;

/// Record of one change to one entity
///
/// `target` is the direct container of `changed_entity`; for value events
/// both are the field address. Old revisions are `None` where the level does
/// not apply or the entity did not exist before the change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomicEvent {
    pub change_type: ChangeType,
    pub level: Level,
    pub target: Address,
    pub changed_entity: Address,
    pub actor: Id,
    pub revision: u64,
    pub old_model_revision: Option<u64>,
    pub old_object_revision: Option<u64>,
    pub old_field_revision: Option<u64>,
    pub implied: bool,
    pub in_transaction: bool,
    /// New value for value add/change events
    pub value: Option<Value>,
}

/// Container for every event produced by one transaction or one cascading remove
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionEvent {
    pub target: Address,
    pub actor: Id,
    pub revision: u64,
    pub old_model_revision: Option<u64>,
    pub old_object_revision: Option<u64>,
    pub events: Vec<AtomicEvent>,
}

impl TransactionEvent {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn implied_count(&self) -> usize {
        self.events.iter().filter(|e| e.implied).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    Atomic(AtomicEvent),
    Transaction(TransactionEvent),
}

impl Event {
    pub fn revision(&self) -> u64 {
        match self {
            Event::Atomic(e) => e.revision,
            Event::Transaction(t) => t.revision,
        }
    }

    pub fn change_type(&self) -> ChangeType {
        match self {
            Event::Atomic(e) => e.change_type,
            Event::Transaction(_) => ChangeType::Transaction,
        }
    }

    pub fn target(&self) -> &Address {
        match self {
            Event::Atomic(e) => &e.target,
            Event::Transaction(t) => &t.target,
        }
    }

    /// Entity the event is about; a transaction event is about its target
    pub fn changed_entity(&self) -> &Address {
        match self {
            Event::Atomic(e) => &e.changed_entity,
            Event::Transaction(t) => &t.target,
        }
    }

    pub fn actor(&self) -> &Id {
        match self {
            Event::Atomic(e) => &e.actor,
            Event::Transaction(t) => &t.actor,
        }
    }

    pub fn old_model_revision(&self) -> Option<u64> {
        match self {
            Event::Atomic(e) => e.old_model_revision,
            Event::Transaction(t) => t.old_model_revision,
        }
    }

    /// Transaction events are never implied
    pub fn is_implied(&self) -> bool {
        match self {
            Event::Atomic(e) => e.implied,
            Event::Transaction(_) => false,
        }
    }

    /// Transaction events are never inside another transaction
    pub fn in_transaction(&self) -> bool {
        match self {
            Event::Atomic(e) => e.in_transaction,
            Event::Transaction(_) => false,
        }
    }

    pub fn as_atomic(&self) -> Option<&AtomicEvent> {
        match self {
            Event::Atomic(e) => Some(e),
            Event::Transaction(_) => None,
        }
    }

    pub fn as_transaction(&self) -> Option<&TransactionEvent> {
        match self {
            Event::Atomic(_) => None,
            Event::Transaction(t) => Some(t),
        }
    }
}
