//! Content digests for models.
//!
//! A digest covers the serialized content of a value, so two models with
//! identical designs, tables and bindings share a digest. Flatten reports
//! carry the digests of their source and result.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::ModelError;

/// A 32-byte SHA-256 content hash.
pub type ContentHash = [u8; 32];

/// Compute the SHA-256 content hash of any serializable value.
pub fn content_hash<T: Serialize>(value: &T) -> Result<ContentHash, ModelError> {
    let json = serde_json::to_vec(value).map_err(|e| ModelError::Serialization(e.to_string()))?;
    let mut hasher = Sha256::new();
    hasher.update(&json);
    Ok(hasher.finalize().into())
}

/// Format a content hash as a hex string.
pub fn hash_hex(hash: &ContentHash) -> String {
    hash.iter().map(|b| format!("{b:02x}")).collect()
}
