//! Digest comparison between two snapshots

use crate::types::{DigestKey, DigestMap};
use std::collections::BTreeSet;

/// Keys whose digest differs between two maps, sorted ascending.
///
/// A key missing from one map differs from any present value, so keys found in
/// only one snapshot are always reported.
pub fn compare_digests(a: &DigestMap, b: &DigestMap) -> Vec<DigestKey> {
    let all_keys: BTreeSet<&DigestKey> = a.keys().chain(b.keys()).collect();

    all_keys
        .into_iter()
        .filter(|key| a.get(key) != b.get(key))
        .cloned()
        .collect()
}
