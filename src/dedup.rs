//! Stable deduplication of prepared reference items.

use std::collections::HashSet;

use tracing::debug;

use crate::coordinate::CanonicalKey;

/// Drops every item whose canonical key matches an earlier item, keeping the
/// first occurrence and never reordering survivors. Items whose keys differ in
/// any field (classifier, extension, ...) are kept side by side. The first
/// occurrence wins unconditionally; later matches are not merged into it.
pub fn dedup_by_canonical_key<T>(items: Vec<T>, key_of: impl Fn(&T) -> CanonicalKey) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    let mut kept = Vec::with_capacity(items.len());

    for item in items {
        let key = key_of(&item);
        if seen.insert(key) {
            kept.push(item);
        } else {
            debug!(key = %key_of(&item), "dropping duplicate declaration");
        }
    }

    kept
}
