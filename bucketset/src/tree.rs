//! Dedup, union and intersection over an ordered set of keys
//!
//! This is the tree engine: the same operations as the hash engine, with
//! the same first-occurrence ordering, but membership is decided by
//! [`SetKey::set_key()`] alone. Values are never compared. Two different
//! values with the same set key are treated as one value, and whichever
//! comes first wins. That agrees with the hash engine for `f64`, whose set
//! key is its bit pattern, and for points within ordinary image sizes,
//! whose set key is their pixel. Strings can collide.
//!
//! Lookups are `O(log n)` with no bucket scan. Building the set is slower
//! than filling a hash table, so prefer the hash engine unless collision
//! freedom of the set key is known for the data at hand.

use std::collections::BTreeSet;

use crate::key::SetKey;

/// Collect the set keys of every element of `items`.
pub fn key_set_from<T: SetKey>(items: &[T]) -> BTreeSet<u64> {
    items.iter().map(SetKey::set_key).collect()
}

/// Keep the first element for each distinct set key among `items`.
fn dedup_iter<'a, T, I>(n: usize, items: I) -> Vec<T>
where
    T: SetKey + Clone + 'a,
    I: Iterator<Item = &'a T>,
{
    let mut seen = BTreeSet::new();
    let mut result = Vec::with_capacity(n);
    for value in items {
        if seen.insert(value.set_key()) {
            result.push(value.clone());
        }
    }
    tracing::trace!(input = n, unique = result.len(), "removed duplicates by tree");
    result
}

/// Remove duplicates from `items`, keeping first occurrences in order.
pub fn dedup_by_tree<T: SetKey + Clone>(items: &[T]) -> Vec<T> {
    dedup_iter(items.len(), items.iter())
}

/// Distinct values of `a` followed by `b`, in first-occurrence order.
pub fn union_by_tree<T: SetKey + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    dedup_iter(a.len() + b.len(), a.iter().chain(b))
}

/// Values present in both `a` and `b`, each reported once.
///
/// Like [`crate::intersection_by_hash()`], the result follows the order of
/// the smaller collection, and `b` when both have the same length.
pub fn intersection_by_tree<T: SetKey + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let (small, big) = if a.len() < b.len() { (a, b) } else { (b, a) };
    let big_keys = key_set_from(big);
    let mut emitted = BTreeSet::new();
    let mut result = Vec::new();
    for value in small {
        let key = value.set_key();
        if big_keys.contains(&key) && emitted.insert(key) {
            result.push(value.clone());
        }
    }
    tracing::trace!(
        small = small.len(),
        big = big.len(),
        common = result.len(),
        "intersected by tree"
    );
    result
}
