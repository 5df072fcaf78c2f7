//! Dedup, histogram, intersection and union over hash tables
//!
//! Every operation here follows the same pattern: derive the element's key
//! with the current table's bucket count, scan the one bucket it selects,
//! and compare against the elements at the stored positions. The first
//! occurrence of a value always claims its position; later duplicates never
//! change an existing entry.

use crate::config::{key_width, TableOptions};
use crate::err::{Error, Operation};
use crate::key::HashKey;
use crate::lookup::{lookup, HashIndex};
use crate::table::BucketTable;

/// Unique values of a collection, in first-occurrence order
///
/// Carries the table mapping each value to its position in
/// [`Dedup::values()`], so the result doubles as a hash set.
#[derive(Debug)]
pub struct Dedup<T> {
    /// Unique values
    values: Vec<T>,
    /// Positions in `values`, keyed by value
    table: BucketTable<usize>,
    /// Bucket count, at the width the key functions take
    nbuckets: u32,
}

impl<T: HashKey> Dedup<T> {
    /// The unique values, in first-occurrence order
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Number of unique values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the source collection was empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Position of `value` in [`Dedup::values()`], if present.
    pub fn find(&self, value: &T) -> Option<usize> {
        lookup(&self.values, &self.table, self.nbuckets, value)
    }

    /// True if `value` occurred in the source collection.
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// The table of positions in [`Dedup::values()`]
    pub fn table(&self) -> &BucketTable<usize> {
        &self.table
    }

    /// Keep the unique values and drop the table.
    pub fn into_values(self) -> Vec<T> {
        self.values
    }

    /// Split into the unique values and their table.
    ///
    /// The table can still be queried with [`crate::find_by_hash()`].
    pub fn into_parts(self) -> (Vec<T>, BucketTable<usize>) {
        (self.values, self.table)
    }
}

/// Occurrence counts of each distinct value of a collection
///
/// Values and counts are aligned and in first-occurrence order.
#[derive(Debug)]
pub struct Histogram<T> {
    /// Distinct values
    values: Vec<T>,
    /// Occurrences of the value at the same position
    counts: Vec<usize>,
    /// Positions in `values`, keyed by value
    table: BucketTable<usize>,
    /// Bucket count, at the width the key functions take
    nbuckets: u32,
}

impl<T: HashKey> Histogram<T> {
    /// The distinct values, in first-occurrence order
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Occurrence counts, aligned with [`Histogram::values()`]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Number of distinct values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: a histogram is only built from a non-empty collection.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(value, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&T, usize)> + '_ {
        self.values.iter().zip(self.counts.iter().copied())
    }

    /// Position of `value` in [`Histogram::values()`], if present.
    pub fn find(&self, value: &T) -> Option<usize> {
        lookup(&self.values, &self.table, self.nbuckets, value)
    }

    /// Number of times `value` occurred in the source collection.
    pub fn count_of(&self, value: &T) -> usize {
        self.find(value).map_or(0, |index| self.counts[index])
    }

    /// Sum of all counts, the length of the source collection.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// The table of positions in [`Histogram::values()`]
    pub fn table(&self) -> &BucketTable<usize> {
        &self.table
    }

    /// Split into values, counts and their table.
    pub fn into_parts(self) -> (Vec<T>, Vec<usize>, BucketTable<usize>) {
        (self.values, self.counts, self.table)
    }
}

/// Reserve room for `additional` more elements, or report which operation
/// ran out of memory.
fn reserve<T>(vec: &mut Vec<T>, additional: usize, op: Operation) -> Result<(), Error> {
    vec.try_reserve(additional).map_err(|e| Error::alloc(op, e))
}

/// Remove duplicates from the `n` elements produced by `items`.
pub(crate) fn dedup<'a, T, I>(
    options: &TableOptions,
    n: usize,
    items: I,
    op: Operation,
) -> Result<Dedup<T>, Error>
where
    T: HashKey + Clone + 'a,
    I: Iterator<Item = &'a T>,
{
    let bucket_count = options.bucket_count_for(n)?;
    let nbuckets = key_width(bucket_count, op)?;
    let mut table = BucketTable::new(bucket_count, options.bucket_capacity)?;
    let mut values = Vec::new();
    reserve(&mut values, n, op)?;

    for value in items {
        if lookup(&values, &table, nbuckets, value).is_none() {
            table.add(value.bucket_key(nbuckets), values.len())?;
            values.push(value.clone());
        }
    }

    tracing::trace!(%op, input = n, unique = values.len(), bucket_count, "removed duplicates");
    Ok(Dedup {
        values,
        table,
        nbuckets,
    })
}

/// Count the occurrences of each distinct value of `source`.
pub(crate) fn histogram<T>(options: &TableOptions, source: &[T]) -> Result<Histogram<T>, Error>
where
    T: HashKey + Clone,
{
    if source.is_empty() {
        return Err(Error::invalid(Operation::Histogram, "no data in source"));
    }
    let n = source.len();
    let bucket_count = options.bucket_count_for(n)?;
    let nbuckets = key_width(bucket_count, Operation::Histogram)?;
    let mut table = BucketTable::new(bucket_count, options.bucket_capacity)?;
    let mut values = Vec::new();
    let mut counts = Vec::new();
    reserve(&mut values, n, Operation::Histogram)?;
    reserve(&mut counts, n, Operation::Histogram)?;

    for value in source {
        match lookup(&values, &table, nbuckets, value) {
            Some(index) => counts[index] += 1,
            None => {
                table.add(value.bucket_key(nbuckets), values.len())?;
                values.push(value.clone());
                counts.push(1);
            }
        }
    }

    tracing::trace!(input = n, distinct = values.len(), bucket_count, "built histogram");
    Ok(Histogram {
        values,
        counts,
        table,
        nbuckets,
    })
}

/// Values present in both `a` and `b`, each reported once.
///
/// The larger collection is indexed and the smaller one scanned, so the
/// result follows the smaller collection's order. When the lengths are
/// equal, `b` is the one scanned.
pub(crate) fn intersection<T>(options: &TableOptions, a: &[T], b: &[T]) -> Result<Vec<T>, Error>
where
    T: HashKey + Clone,
{
    let (small, big) = if a.len() < b.len() { (a, b) } else { (b, a) };
    let big_index = HashIndex::with_options(big, options)?;

    // Positions in `small` of the values emitted so far
    let bucket_count = options.bucket_count_for(small.len())?;
    let nbuckets = key_width(bucket_count, Operation::Intersection)?;
    let mut emitted = BucketTable::new(bucket_count, 0)?;

    let mut result = Vec::new();
    for (index, value) in small.iter().enumerate() {
        if big_index.contains(value) && lookup(small, &emitted, nbuckets, value).is_none() {
            emitted.add(value.bucket_key(nbuckets), index)?;
            reserve(&mut result, 1, Operation::Intersection)?;
            result.push(value.clone());
        }
    }

    tracing::trace!(
        small = small.len(),
        big = big.len(),
        common = result.len(),
        "intersected by hash"
    );
    Ok(result)
}

/// Distinct values of `a` followed by `b`, in first-occurrence order.
pub(crate) fn union<T>(options: &TableOptions, a: &[T], b: &[T]) -> Result<Vec<T>, Error>
where
    T: HashKey + Clone,
{
    let n = a.len() + b.len();
    Ok(dedup(options, n, a.iter().chain(b), Operation::Union)?.into_values())
}

#[cfg(test)]
mod test {
    use super::*;

    /// Integer wrapper whose bucket key ignores the value entirely
    #[derive(Clone, Debug, PartialEq)]
    struct Colliding(u32);

    impl HashKey for Colliding {
        fn bucket_key(&self, _nbuckets: u32) -> u64 {
            42
        }

        fn exact_eq(&self, other: &Self) -> bool {
            self.0 == other.0
        }
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let src = [3.0, 1.0, 3.0, 2.0, 1.0, 1.0];
        let opts = TableOptions::default();
        let dedup = dedup(&opts, src.len(), src.iter(), Operation::Dedup).unwrap();
        assert_eq!(dedup.values(), &[3.0, 1.0, 2.0]);
        assert_eq!(dedup.table().total_entry_count(), 3);
        assert_eq!(dedup.find(&2.0), Some(2));
    }

    #[test]
    fn colliding_keys_are_disambiguated() {
        let src: Vec<Colliding> = [5, 6, 5, 7, 6].into_iter().map(Colliding).collect();
        let opts = TableOptions::default();
        let dedup = dedup(&opts, src.len(), src.iter(), Operation::Dedup).unwrap();
        assert_eq!(dedup.values(), &[Colliding(5), Colliding(6), Colliding(7)]);
        assert_eq!(dedup.table().occupied_bucket_count(), 1);
        assert_eq!(dedup.find(&Colliding(8)), None);

        let histo = histogram(&opts, &src).unwrap();
        assert_eq!(histo.counts(), &[2, 2, 1]);

        let other: Vec<Colliding> = [7, 9, 5].into_iter().map(Colliding).collect();
        assert_eq!(
            intersection(&opts, &src, &other).unwrap(),
            vec![Colliding(7), Colliding(5)]
        );
    }

    #[test]
    fn empty_histogram_rejected() {
        let empty: [f64; 0] = [];
        assert!(matches!(
            histogram(&TableOptions::default(), &empty),
            Err(Error::InvalidArgument {
                op: Operation::Histogram,
                ..
            })
        ));
    }

    #[test]
    fn union_is_dedup_of_join() {
        let a = [1.0, 2.0, 2.0];
        let b = [3.0, 1.0, 4.0];
        let opts = TableOptions::default();
        assert_eq!(union(&opts, &a, &b).unwrap(), vec![1.0, 2.0, 3.0, 4.0]);
    }
}
