//! revstore engine - concurrent operation surface
//!
//! Wraps the core kernel with per-model serialization, published state and
//! event logs, configuration, and lifecycle logging of every public
//! operation.

pub mod config;
pub mod engine;
pub mod requests;

pub use config::{EngineConfig, LimitsConfig, LoggingConfig};
pub use engine::Engine;
pub use requests::GetRequest;
