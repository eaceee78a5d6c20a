//! Read-only snapshots of committed state
//!
//! Snapshots are deep, independent copies: later commands never change a
//! snapshot already handed out. They serialize to canonical JSON (ordered
//! maps throughout), which is what the digests hash.

pub mod digest;
pub mod view;

pub use digest::{compute_model_digest, compute_object_digest};
pub use view::{model_snapshot, object_snapshot, FieldSnapshot, ModelSnapshot, ObjectSnapshot};
