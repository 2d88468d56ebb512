//! Content fingerprints for graph results and datasets.
//!
//! A fingerprint is xxh64 (seed 0) over the compact JSON encoding of a
//! value, printed as 16 lowercase hex digits. Every hashed collection is a
//! BTreeMap, a BTreeSet or a Vec sorted by the caller, so equal graphs give
//! equal fingerprints.

use std::collections::BTreeSet;

use serde::Serialize;
use xxhash_rust::xxh64::xxh64;

const FINGERPRINT_SEED: u64 = 0;

/// Compact JSON bytes of a value.
///
/// Only used on crate-owned types whose serialization cannot fail
/// (string keys, no non-finite floats).
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).expect("Canonical serialization failed")
}

/// Raw xxh64 fingerprint of a value.
pub fn canonical_hash<T: Serialize>(value: &T) -> u64 {
    xxh64(&to_canonical_bytes(value), FINGERPRINT_SEED)
}

/// Fingerprint of a value as 16 hex digits.
pub fn canonical_hash_hex<T: Serialize>(value: &T) -> String {
    to_hex(canonical_hash(value))
}

/// Fingerprint of a collection taken as a set.
///
/// Input order and repeated items do not change the result.
pub fn set_hash_hex<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Ord + Serialize,
{
    let set: BTreeSet<I::Item> = items.into_iter().collect();
    canonical_hash_hex(&set)
}

fn to_hex(hash: u64) -> String {
    format!("{:016x}", hash)
}
