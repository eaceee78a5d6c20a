//! Command execution against a model working copy
//!
//! Each level has its own `*_ops` module applying the uniform add / remove /
//! change policy. Operations mutate a `&mut ModelState` that the caller
//! owns as a working copy and report what they did as a `Step`; they never
//! mint revisions or touch the event log.

pub mod cascade;
pub mod field_ops;
pub mod model_ops;
pub mod object_ops;
pub mod transaction;
pub mod value_ops;

use crate::commands::{AtomicCommand, Intent, Level, RevisionPrecondition};
use crate::events::builder::EventDraft;
use crate::model::ModelState;

pub use transaction::{execute, Execution};

/// Result of running one atomic command on a working copy
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// State was modified; drafts are in emission order
    Changed(Vec<EventDraft>),
    /// Postcondition already held; state untouched
    NoChange,
    /// Precondition rejected the command; working copy must be discarded
    Failed,
}

/// Run one atomic command, stamping touched entities with `next`
pub fn execute_atomic(state: &mut ModelState, cmd: &AtomicCommand, next: u64) -> Step {
    let step = match cmd.level {
        Level::Model => model_ops::apply(state, cmd),
        Level::Object => object_ops::apply(state, cmd, next),
        Level::Field => field_ops::apply(state, cmd, next),
        Level::Value => value_ops::apply(state, cmd, next),
    };
    tracing::debug!(
        address = %cmd.address,
        level = %cmd.level,
        change_type = %cmd.change_type,
        intent = cmd.intent.kind_name(),
        step = step.name(),
        "atomic command executed"
    );
    step
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Changed(_) => "changed",
            Step::NoChange => "no_change",
            Step::Failed => "failed",
        }
    }
}

/// Decision of the existence and revision checks shared by every level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Gate {
    Proceed,
    NoChange,
    Failed,
}

/// Preconditions of an add: `current` is the target's revision if it exists
pub(crate) fn gate_add(intent: &Intent, current: Option<u64>) -> Gate {
    match (intent, current) {
        (Intent::Forced, Some(_)) => Gate::NoChange,
        (_, Some(_)) => Gate::Failed,
        (Intent::SafeRevisionBound(RevisionPrecondition::Exactly(_)), None) => Gate::Failed,
        (_, None) => Gate::Proceed,
    }
}

/// Preconditions of a remove or change: the target must exist
pub(crate) fn gate_existing(intent: &Intent, current: Option<u64>) -> Gate {
    match (intent, current) {
        (Intent::Forced, None) => Gate::NoChange,
        (_, None) => Gate::Failed,
        (Intent::SafeRevisionBound(precondition), Some(revision)) => {
            if revision_matches(precondition, revision) {
                Gate::Proceed
            } else {
                Gate::Failed
            }
        }
        (_, Some(_)) => Gate::Proceed,
    }
}

pub(crate) fn revision_matches(precondition: &RevisionPrecondition, revision: u64) -> bool {
    matches!(precondition, RevisionPrecondition::Exactly(expected) if *expected == revision)
}
