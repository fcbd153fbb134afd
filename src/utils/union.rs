//! Stable ordered union.

use std::hash::Hash;

use rustc_hash::FxHashSet;

/// Concatenate `sources` in order, keeping only the first item for each key.
///
/// Order within and across sources is preserved; a later item whose key was
/// already seen is dropped, so earlier sources take precedence.
pub fn union_by<'a, T, K, F>(sources: &[&'a [T]], mut key: F) -> Vec<&'a T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let capacity = sources.iter().map(|source| source.len()).sum();
    let mut seen = FxHashSet::default();
    let mut merged = Vec::with_capacity(capacity);

    for item in sources.iter().flat_map(|source| source.iter()) {
        if seen.insert(key(item)) {
            merged.push(item);
        }
    }

    merged
}
