//! Structured logging for revstore
//!
//! - `init(profile)` installs the process-wide subscriber once
//! - `log_op_start!`, `log_op_end!` and `log_op_error!` emit the canonical
//!   lifecycle events of a public operation
//! - `init_test_capture()` collects events in memory for assertions
//!
//! The engine owns lifecycle events of its public operations. Kernel code
//! below it only emits `tracing::debug!` details.
//!
//! ```rust
//! use revstore_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
