//! Identifier Module
//!
//! Random identifiers for stores and namespaces.

use rand::rngs::OsRng;
use rand::RngCore;
use uuid::Builder;

use crate::error::{CacheError, Result};

/// Generates a random 128-bit identifier in the 8-4-4-4-12 hex layout.
///
/// Bytes come from the OS entropy source. The version and variant bits are
/// then overwritten as for a v4 UUID, so 122 of the 128 bits are random.
/// Fails with [`CacheError::Entropy`] if the source cannot be read.
pub fn generate_id() -> Result<String> {
    let mut bytes = [0u8; 16];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| CacheError::Entropy(e.to_string()))?;

    Ok(Builder::from_random_bytes(bytes)
        .into_uuid()
        .hyphenated()
        .to_string())
}
