//! Functional-boundary apply function
//!
//! `apply()` is the single entry point for mutating a model. It validates
//! the command structurally, runs it against a working copy of the given
//! state and hands back the outcome together with the new state and its
//! event. The caller publishes both or neither.
//!
//! ## Atomicity Contract
//!
//! - **All-or-nothing**: the input state is borrowed and never modified; a
//!   new state is returned only for a committed revision
//! - **No panics**: malformed requests return typed errors
//! - **Outcomes are values**: `Failed` and `NoChange` are `Ok` results
//!
//! ## Example
//!
//! ```
//! use revstore_core::{apply::apply, Address, AtomicCommand, CommandOutcome, ExecutionContext,
//!     Id, Intent, Limits, ModelState};
//!
//! let repo = Id::new("repo").unwrap();
//! let model = Address::model(repo.clone(), Id::new("m1").unwrap());
//! let state = ModelState::never_existed(model.clone());
//! let ctx = ExecutionContext::new(Id::new("alice").unwrap());
//!
//! let cmd = AtomicCommand::add_model(model, Intent::SafeStateBound).into();
//! let applied = apply(&state, &ctx, &cmd, &repo, &Limits::default()).unwrap();
//! assert_eq!(applied.outcome, CommandOutcome::Revision(0));
//! ```

use crate::commands::Command;
use crate::context::ExecutionContext;
use crate::errors::{Result, StoreError};
use crate::id::Id;
use crate::model::ModelState;
use crate::ops::{self, Execution};
use crate::rules::{validate_command, Limits};

/// Apply a command to the state of the model it addresses
///
/// # Errors
/// Returns a request error for structurally invalid commands or when the
/// command addresses a different model than `state`, `IllegalArgument` for
/// a missing value payload and `InvariantViolation` if the result would
/// break a tree invariant.
pub fn apply(
    state: &ModelState,
    ctx: &ExecutionContext,
    cmd: &Command,
    repository: &Id,
    limits: &Limits,
) -> Result<Execution> {
    validate_command(repository, cmd, limits)?;

    let model = cmd.address().model_address();
    if model.as_ref() != Some(state.address()) {
        return Err(StoreError::MalformedCommand {
            address: cmd.address().to_string(),
            reason: format!("command does not address model {}", state.address()),
        });
    }

    ops::execute(state, ctx, cmd)
}
