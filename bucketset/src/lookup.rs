//! Membership queries against a collection and its index table
//!
//! The index tables built here store positions into a collection the caller
//! owns, keyed by each element's bucket key. A lookup re-derives the key of
//! the candidate, scans that one bucket, and compares the candidate against
//! the element at each stored position. Sharing a key is never taken as
//! proof of equality.

use crate::config::{key_width, TableOptions};
use crate::err::{Error, Operation};
use crate::key::HashKey;
use crate::table::BucketTable;

/// Find `value` in `source`, using a `table` of positions into `source`.
///
/// Returns the position of the first matching element that was added to
/// the table, or `Ok(None)` if there is none. Fails with
/// [`Error::InvalidArgument`] if the table holds a position that's outside
/// `source`, which means the table was built for some other collection.
pub fn find_by_hash<T: HashKey>(
    source: &[T],
    table: &BucketTable<usize>,
    value: &T,
) -> Result<Option<usize>, Error> {
    let nbuckets = key_width(table.bucket_count(), Operation::FindByHash)?;
    let Some(bucket) = table.bucket(value.bucket_key(nbuckets)) else {
        return Ok(None);
    };
    for index in bucket.iter() {
        let stored = source.get(index).ok_or_else(|| {
            Error::invalid(Operation::FindByHash, "table entry outside the collection")
        })?;
        if stored.exact_eq(value) {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

/// Lookup for tables built alongside `source` by this crate.
///
/// Those never hold an out-of-range position, so this skips the check
/// [`find_by_hash()`] makes and takes the key width precomputed.
#[inline(always)]
pub(crate) fn lookup<T: HashKey>(
    source: &[T],
    table: &BucketTable<usize>,
    nbuckets: u32,
    value: &T,
) -> Option<usize> {
    table
        .bucket(value.bucket_key(nbuckets))?
        .iter()
        .find(|&index| source.get(index).is_some_and(|stored| stored.exact_eq(value)))
}

/// A borrowed collection with a table of all its positions
///
/// Supports fast repeated membership queries against a fixed reference
/// collection. Duplicate elements all get entries; [`HashIndex::find()`]
/// reports the earliest one.
#[derive(Debug)]
pub struct HashIndex<'a, T> {
    /// The indexed collection
    source: &'a [T],
    /// Positions in `source`, keyed by element
    table: BucketTable<usize>,
    /// Bucket count, at the width the key functions take
    nbuckets: u32,
}

impl<'a, T: HashKey> HashIndex<'a, T> {
    /// Index every element of `source`, with default [`TableOptions`].
    pub fn new(source: &'a [T]) -> Result<Self, Error> {
        Self::with_options(source, &TableOptions::default())
    }

    /// Index every element of `source`.
    ///
    /// The table gets about `options.occupancy` entries per bucket.
    pub fn with_options(source: &'a [T], options: &TableOptions) -> Result<Self, Error> {
        let bucket_count = options.bucket_count_for(source.len())?;
        let nbuckets = key_width(bucket_count, Operation::BuildIndex)?;
        let mut table = BucketTable::new(bucket_count, options.bucket_capacity)?;
        for (index, value) in source.iter().enumerate() {
            table.add(value.bucket_key(nbuckets), index)?;
        }
        tracing::trace!(
            len = source.len(),
            bucket_count,
            "indexed collection by hash"
        );
        Ok(Self {
            source,
            table,
            nbuckets,
        })
    }

    /// Position of the first element equal to `value`, if any.
    pub fn find(&self, value: &T) -> Option<usize> {
        lookup(self.source, &self.table, self.nbuckets, value)
    }

    /// True if some element equals `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// The indexed collection
    pub fn source(&self) -> &'a [T] {
        self.source
    }

    /// The table of positions
    pub fn table(&self) -> &BucketTable<usize> {
        &self.table
    }

    /// Release the borrow, keeping only the table of positions.
    pub fn into_table(self) -> BucketTable<usize> {
        self.table
    }
}
