//! Canonical serialization for deterministic hashing.
//!
//! DAG fingerprints are computed over a canonical export (sorted nodes,
//! sorted edges), so two DAGs describing the same order hash identically
//! regardless of insertion order.
//!
//! ## Determinism Guarantees
//!
//! - Stable field order: Struct fields serialize in declaration order
//! - Stable Vec order: Vectors serialize in index order
//! - No HashMap allowed: Use BTreeMap/BTreeSet for collections in hashed data

use serde::Serialize;
use xxhash_rust::xxh64::xxh64;

use crate::error::Result;

/// Serialize a value to canonical JSON bytes for hashing.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

/// Compute canonical hash of a serializable value.
pub fn canonical_hash<T: Serialize>(value: &T) -> Result<u64> {
    let bytes = to_canonical_bytes(value)?;
    Ok(xxh64(&bytes, 0))
}

/// Compute canonical hash and return as hex string.
pub fn canonical_hash_hex<T: Serialize>(value: &T) -> Result<String> {
    Ok(format!("{:016x}", canonical_hash(value)?))
}
