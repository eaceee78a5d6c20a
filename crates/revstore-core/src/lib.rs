//! revstore core - in-memory versioned tree kernel
//!
//! This crate holds the semantics of a hierarchical, revisioned data store:
//! - Addresses, ids and typed values of the repository/model/object/field tree
//! - Commands with forced, state-bound and revision-bound intents
//! - Atomic execution with cascading removal and all-or-nothing transactions
//! - Events and the per-model event log with address-scoped queries
//! - Snapshots with deterministic content digests
//!
//! Concurrency and the public operation surface live in `revstore-engine`.

pub mod address;
pub mod apply;
pub mod commands;
pub mod context;
pub mod errors;
pub mod events;
pub mod id;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod rules;
pub mod snapshot;
pub mod value;

#[doc(hidden)]
pub use revstore_core_types;

// Re-export commonly used types
pub use address::{Address, AddressedType};
pub use apply::apply;
pub use commands::{
    AtomicCommand, ChangeType, Command, Intent, Level, RevisionPrecondition, Transaction,
};
pub use context::ExecutionContext;
pub use errors::{ExError, ExErrorKind, Result, StoreError};
pub use events::{AtomicEvent, Event, EventLog, TransactionEvent};
pub use id::Id;
pub use model::{CommandOutcome, ModelRevision, ModelState};
pub use ops::Execution;
pub use rules::Limits;
pub use snapshot::{ModelSnapshot, ObjectSnapshot};
pub use value::Value;
