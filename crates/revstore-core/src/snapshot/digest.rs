//! Content digests of snapshots
//!
//! A digest is the hex SHA-256 of the snapshot's canonical JSON. Snapshots
//! use ordered maps only, so equal trees always hash equally.

use sha2::{Digest, Sha256};

use super::view::{ModelSnapshot, ObjectSnapshot};
use crate::errors::Result;

/// Hex-encoded SHA-256 of a model snapshot (64 characters)
///
/// # Errors
/// Returns `StoreError::Serialization` if JSON serialization fails.
pub fn compute_model_digest(snapshot: &ModelSnapshot) -> Result<String> {
    let canonical = serde_json::to_string(snapshot)?;
    Ok(hash_string(&canonical))
}

/// Hex-encoded SHA-256 of an object snapshot
///
/// # Errors
/// Returns `StoreError::Serialization` if JSON serialization fails.
pub fn compute_object_digest(snapshot: &ObjectSnapshot) -> Result<String> {
    let canonical = serde_json::to_string(snapshot)?;
    Ok(hash_string(&canonical))
}

fn hash_string(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::id::Id;
    use std::collections::BTreeMap;

    fn snapshot(revision: u64) -> ModelSnapshot {
        ModelSnapshot {
            address: Address::model(Id::new("repo").unwrap(), Id::new("m1").unwrap()),
            revision,
            objects: BTreeMap::new(),
        }
    }

    #[test]
    fn test_digest_is_deterministic() {
        let a = compute_model_digest(&snapshot(3)).unwrap();
        let b = compute_model_digest(&snapshot(3)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_digest_tracks_content() {
        let a = compute_model_digest(&snapshot(3)).unwrap();
        let b = compute_model_digest(&snapshot(4)).unwrap();
        assert_ne!(a, b);
    }
}
