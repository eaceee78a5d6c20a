//! Events describing accepted changes
//!
//! - `event`: atomic and transaction event types
//! - `builder`: turns executor drafts into labelled events
//! - `log`: append-only per-model log with address-scoped queries

pub mod builder;
pub mod event;
pub mod log;

pub use event::{AtomicEvent, Event, TransactionEvent};
pub use log::EventLog;
