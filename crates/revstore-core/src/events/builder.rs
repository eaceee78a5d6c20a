//! Event assembly
//!
//! The executor records what it did as `EventDraft`s. Once the outcome of the
//! whole command or transaction is known, `build_event` stamps the drafts with
//! actor and revision and decides whether they are wrapped in a
//! `TransactionEvent`.

use crate::address::Address;
use crate::commands::{ChangeType, Level};
use crate::context::ExecutionContext;
use crate::value::Value;

use super::event::{AtomicEvent, Event, TransactionEvent};

/// An event before actor, revision and transaction membership are known
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub change_type: ChangeType,
    pub level: Level,
    pub changed_entity: Address,
    pub old_model_revision: Option<u64>,
    pub old_object_revision: Option<u64>,
    pub old_field_revision: Option<u64>,
    pub implied: bool,
    pub value: Option<Value>,
}

impl EventDraft {
    pub fn new(change_type: ChangeType, level: Level, changed_entity: Address) -> Self {
        Self {
            change_type,
            level,
            changed_entity,
            old_model_revision: None,
            old_object_revision: None,
            old_field_revision: None,
            implied: false,
            value: None,
        }
    }

    pub fn old_revisions(
        mut self,
        model: Option<u64>,
        object: Option<u64>,
        field: Option<u64>,
    ) -> Self {
        self.old_model_revision = model;
        self.old_object_revision = object;
        self.old_field_revision = field;
        self
    }

    pub fn implied(mut self) -> Self {
        self.implied = true;
        self
    }

    pub fn with_value(mut self, value: Option<Value>) -> Self {
        self.value = value;
        self
    }

    /// Direct container of the changed entity; value events target the field
    fn target(&self) -> Address {
        match self.level {
            Level::Value => self.changed_entity.clone(),
            _ => self
                .changed_entity
                .parent()
                .unwrap_or_else(|| self.changed_entity.clone()),
        }
    }

    fn finish(self, ctx: &ExecutionContext, revision: u64, in_transaction: bool) -> AtomicEvent {
        AtomicEvent {
            change_type: self.change_type,
            level: self.level,
            target: self.target(),
            changed_entity: self.changed_entity,
            actor: ctx.actor.clone(),
            revision,
            old_model_revision: self.old_model_revision,
            old_object_revision: self.old_object_revision,
            old_field_revision: self.old_field_revision,
            implied: self.implied,
            in_transaction,
            value: self.value,
        }
    }
}

/// How drafts are packaged into a logged event
#[derive(Debug, Clone, PartialEq)]
pub enum EventFrame {
    /// One atomic command: wrap only when a cascade produced several drafts
    Command,
    /// An explicit transaction: always wrap at the transaction target
    Transaction {
        target: Address,
        old_model_revision: Option<u64>,
        old_object_revision: Option<u64>,
    },
}

/// Assemble the single logged event for one committed revision
///
/// Returns `None` when there are no drafts.
pub fn build_event(
    ctx: &ExecutionContext,
    revision: u64,
    mut drafts: Vec<EventDraft>,
    frame: EventFrame,
) -> Option<Event> {
    match frame {
        EventFrame::Command if drafts.len() == 1 => drafts
            .pop()
            .map(|draft| Event::Atomic(draft.finish(ctx, revision, false))),
        EventFrame::Command => {
            // A cascade: the explicit removal is the only non-implied draft.
            let explicit = drafts.iter().find(|d| !d.implied)?.clone();
            Some(wrap(
                ctx,
                revision,
                drafts,
                explicit.changed_entity,
                explicit.old_model_revision,
                explicit.old_object_revision,
            ))
        }
        EventFrame::Transaction {
            target,
            old_model_revision,
            old_object_revision,
        } => {
            if drafts.is_empty() {
                return None;
            }
            Some(wrap(
                ctx,
                revision,
                drafts,
                target,
                old_model_revision,
                old_object_revision,
            ))
        }
    }
}

fn wrap(
    ctx: &ExecutionContext,
    revision: u64,
    drafts: Vec<EventDraft>,
    target: Address,
    old_model_revision: Option<u64>,
    old_object_revision: Option<u64>,
) -> Event {
    let events = drafts
        .into_iter()
        .map(|draft| draft.finish(ctx, revision, true))
        .collect();
    Event::Transaction(TransactionEvent {
        target,
        actor: ctx.actor.clone(),
        revision,
        old_model_revision,
        old_object_revision,
        events,
    })
}
