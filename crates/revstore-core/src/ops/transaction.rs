//! Commit coordination
//!
//! Every command, atomic or not, runs against a clone of the model state.
//! The clone is returned as the new state only when at least one step
//! changed something and nothing failed; it then carries exactly one new
//! revision and the single event logged for it.

use super::{execute_atomic, Step};
use crate::commands::{AtomicCommand, Command, Transaction};
use crate::context::ExecutionContext;
use crate::errors::{Result, StoreError};
use crate::events::builder::{build_event, EventDraft, EventFrame};
use crate::events::Event;
use crate::model::{CommandOutcome, ModelState};
use crate::rules::invariants;

/// What running a command produced
///
/// `state` and `event` are present exactly when `outcome` is a revision.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    pub outcome: CommandOutcome,
    pub state: Option<ModelState>,
    pub event: Option<Event>,
}

impl Execution {
    fn no_change() -> Self {
        Self {
            outcome: CommandOutcome::NoChange,
            state: None,
            event: None,
        }
    }

    fn failed() -> Self {
        Self {
            outcome: CommandOutcome::Failed,
            state: None,
            event: None,
        }
    }
}

/// Run an already validated command against `state`
///
/// `state` is never modified.
///
/// # Errors
/// Returns `InvariantViolation` if the committed working copy would break a
/// tree invariant.
pub fn execute(state: &ModelState, ctx: &ExecutionContext, cmd: &Command) -> Result<Execution> {
    match cmd {
        Command::Atomic(atomic) => execute_single(state, ctx, atomic),
        Command::Transaction(txn) => execute_transaction(state, ctx, txn),
    }
}

fn execute_single(
    state: &ModelState,
    ctx: &ExecutionContext,
    cmd: &AtomicCommand,
) -> Result<Execution> {
    let next = state.next_revision();
    let mut working = state.clone();
    match execute_atomic(&mut working, cmd, next) {
        Step::Changed(drafts) => commit(working, ctx, next, drafts, EventFrame::Command),
        Step::NoChange => Ok(Execution::no_change()),
        Step::Failed => Ok(Execution::failed()),
    }
}

fn execute_transaction(
    state: &ModelState,
    ctx: &ExecutionContext,
    txn: &Transaction,
) -> Result<Execution> {
    if !state.exists() {
        return Ok(Execution::failed());
    }
    let old_object_revision = match txn.target.object_id() {
        Some(object) => match state.object(object) {
            Some(target) => Some(target.revision),
            None => return Ok(Execution::failed()),
        },
        None => None,
    };

    let next = state.next_revision();
    let mut working = state.clone();
    let mut drafts = Vec::new();
    for (index, cmd) in txn.commands.iter().enumerate() {
        match execute_atomic(&mut working, cmd, next) {
            Step::Changed(step) => drafts.extend(step),
            Step::NoChange => {}
            Step::Failed => {
                tracing::debug!(
                    target_address = %txn.target,
                    failed_index = index,
                    "transaction rolled back"
                );
                return Ok(Execution::failed());
            }
        }
    }
    if drafts.is_empty() {
        return Ok(Execution::no_change());
    }

    let frame = EventFrame::Transaction {
        target: txn.target.clone(),
        old_model_revision: state.revision(),
        old_object_revision,
    };
    commit(working, ctx, next, drafts, frame)
}

fn commit(
    mut working: ModelState,
    ctx: &ExecutionContext,
    revision: u64,
    drafts: Vec<EventDraft>,
    frame: EventFrame,
) -> Result<Execution> {
    working.set_revision(revision);
    invariants::validate_model(&working)?;
    let event =
        build_event(ctx, revision, drafts, frame).ok_or_else(|| StoreError::InvariantViolation {
            model: working.address().to_string(),
            reason: "a committed change produced no event".to_string(),
        })?;
    tracing::debug!(
        model = %working.address(),
        revision,
        change_type = %event.change_type(),
        "revision committed"
    );
    Ok(Execution {
        outcome: CommandOutcome::Revision(revision),
        state: Some(working),
        event: Some(event),
    })
}
