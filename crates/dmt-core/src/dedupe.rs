//! Stable de-duplication on a composite key.

use std::collections::BTreeSet;

/// Keeps the first row for each distinct key, preserving input order.
pub fn distinct_by<T, K, F>(rows: impl IntoIterator<Item = T>, mut key: F) -> Vec<T>
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    let mut seen = BTreeSet::new();
    rows.into_iter().filter(|row| seen.insert(key(row))).collect()
}
