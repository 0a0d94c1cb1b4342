//! Content hashing for backups.
//!
//! SHA256 over the serialized JSON of a value. Used to fingerprint export
//! output and store snapshots.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Compute a SHA256 hash of a serializable value.
///
/// The value is first serialized to JSON, then hashed, so two values with
/// the same JSON form share a fingerprint.
///
/// # Errors
///
/// Returns `EncodingError` if the value cannot be serialized.
pub fn content_hash<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_vec(value)?;
    let mut hasher = Sha256::new();
    hasher.update(&json);
    Ok(format!("{:x}", hasher.finalize()))
}
