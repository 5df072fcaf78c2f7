//! Individual buckets and the handles used to hand them out

use std::ops::{Deref, Index};
use std::rc::Rc;

use crate::err::{Error, Operation};

/// One append-only bucket of a [`crate::BucketTable`]
///
/// Entries keep their insertion order. Buckets don't enforce uniqueness;
/// that's layered on top by the set operations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bucket<V: Copy> {
    /// Entries in insertion order
    entries: Vec<V>,
}

impl<V: Copy> Bucket<V> {
    /// Allocate an empty bucket with room for `capacity` entries.
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self, Error> {
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(capacity)
            .map_err(|e| Error::alloc(Operation::TableAdd, e))?;
        Ok(Self { entries })
    }

    /// Append one entry.
    ///
    /// On allocation failure the bucket is left unchanged.
    pub(crate) fn push(&mut self, value: V) -> Result<(), Error> {
        self.entries
            .try_reserve(1)
            .map_err(|e| Error::alloc(Operation::TableAdd, e))?;
        self.entries.push(value);
        Ok(())
    }

    /// Number of entries in this bucket
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been added to this bucket.
    ///
    /// Buckets are only created by an insertion, so this only holds for
    /// buckets built outside a table.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries this bucket can hold before reallocating
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Look up one entry by position.
    pub fn get(&self, item: usize) -> Option<V> {
        self.entries.get(item).copied()
    }

    /// Entries in insertion order
    pub fn as_slice(&self) -> &[V] {
        &self.entries
    }

    /// Iterate over the entries, by value.
    pub fn iter(&self) -> impl Iterator<Item = V> + '_ {
        self.entries.iter().copied()
    }
}

impl<V: Copy> Index<usize> for Bucket<V> {
    type Output = V;

    fn index(&self, item: usize) -> &V {
        &self.entries[item]
    }
}

/// How [`crate::BucketTable::get_bucket()`] should hand out a bucket
#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[non_exhaustive]
pub enum CopyPolicy {
    /// Borrow the live bucket. No allocation.
    #[default]
    NoCopy,
    /// Deep copy of the bucket's current entries.
    Copy,
    /// Shared handle to the bucket.
    ///
    /// No entries are copied when the handle is made. The handle is not a
    /// live view, though: a later insertion into that bucket copies it
    /// first, so the handle keeps the entries it saw. This is [`Self::Copy`]
    /// with the copy deferred until the table changes. Use [`Self::NoCopy`]
    /// to see the bucket as it is now.
    Clone,
}

/// A bucket returned under some [`CopyPolicy`]
///
/// Dereferences to [`Bucket`] whichever policy produced it.
#[derive(Debug)]
#[non_exhaustive]
pub enum BucketHandle<'a, V: Copy> {
    /// Result of [`CopyPolicy::NoCopy`]
    Live(&'a Bucket<V>),
    /// Result of [`CopyPolicy::Copy`]
    Copied(Bucket<V>),
    /// Result of [`CopyPolicy::Clone`]
    Shared(Rc<Bucket<V>>),
}

impl<'a, V: Copy> BucketHandle<'a, V> {
    /// Take ownership of the handle's entries, copying if necessary.
    pub fn into_owned(self) -> Bucket<V> {
        match self {
            BucketHandle::Live(bucket) => bucket.clone(),
            BucketHandle::Copied(bucket) => bucket,
            BucketHandle::Shared(bucket) => Rc::unwrap_or_clone(bucket),
        }
    }
}

impl<'a, V: Copy> Deref for BucketHandle<'a, V> {
    type Target = Bucket<V>;

    fn deref(&self) -> &Bucket<V> {
        match self {
            BucketHandle::Live(bucket) => bucket,
            BucketHandle::Copied(bucket) => bucket,
            BucketHandle::Shared(bucket) => bucket,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn push_preserves_order() {
        let mut bucket = Bucket::with_capacity(2).unwrap();
        for v in [5_u32, 1, 5, 9] {
            bucket.push(v).unwrap();
        }
        assert_eq!(bucket.len(), 4);
        assert_eq!(bucket.as_slice(), &[5, 1, 5, 9]);
        assert_eq!(bucket.get(3), Some(9));
        assert_eq!(bucket.get(4), None);
        assert_eq!(bucket[1], 1);
    }

    #[test]
    fn policy_names() {
        assert_eq!(CopyPolicy::default(), CopyPolicy::NoCopy);
        assert_eq!(CopyPolicy::from_str("clone").unwrap(), CopyPolicy::Clone);
        assert_eq!(CopyPolicy::NoCopy.to_string(), "no_copy");
        assert!(CopyPolicy::from_str("borrow").is_err());
    }

    #[test]
    fn handles_deref_to_the_same_entries() {
        let mut bucket = Bucket::with_capacity(0).unwrap();
        bucket.push(1.5_f64).unwrap();
        let shared = Rc::new(bucket.clone());

        let handles = [
            BucketHandle::Live(&bucket),
            BucketHandle::Copied(bucket.clone()),
            BucketHandle::Shared(Rc::clone(&shared)),
        ];
        for handle in handles {
            assert_eq!(handle.as_slice(), &[1.5]);
            assert_eq!(handle.into_owned(), bucket);
        }
    }
}
