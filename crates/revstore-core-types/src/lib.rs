//! Types shared by the revstore error and logging facilities
//!
//! [`correlation`] holds the request and trace ids attached to errors and
//! log records; [`schema`] fixes the structured log field names.

pub mod correlation;
pub mod schema;

pub use correlation::{RequestContext, RequestId, TraceId};
