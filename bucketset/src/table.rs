//! A fixed-size bucketed hash table
//!
//! [`BucketTable`] maps 64-bit keys to buckets by `key % bucket_count`. Each
//! bucket is an append-only list of small [`Copy`] entries, usually indices
//! into some collection the caller owns. The table never looks at the values
//! a key was derived from, and never checks entries for uniqueness. Both of
//! those are the job of the layer above, see [`crate::find_by_hash()`].
//!
//! The bucket count is chosen once, at creation, and never changes. Callers
//! size the table for the data they expect, typically around twenty entries
//! per bucket, and the table keeps that shape for its whole lifetime. There
//! is no rehashing.
//!
//! Buckets are allocated lazily on their first insertion. The slot array is
//! a single contiguous block of optional reference counted buckets, so that
//! a bucket can be handed out as a shared snapshot ([`CopyPolicy::Clone`])
//! which stays valid after the table is dropped.

mod bucket;

use std::rc::Rc;

use num_traits::ToPrimitive;

use crate::err::{Error, Operation};

pub use bucket::{Bucket, BucketHandle, CopyPolicy};

/// Hash table with a fixed number of lazily allocated buckets
///
/// The bucket count should be prime. That isn't enforced, but keys from
/// [`keyhash`] are only well distributed modulo a prime.
#[derive(Clone, Debug)]
pub struct BucketTable<V: Copy> {
    /// One slot per bucket, `None` until the first insertion there
    buckets: Vec<Option<Rc<Bucket<V>>>>,
    /// Capacity reserved by each newly created bucket
    initial_capacity: usize,
}

impl<V: Copy> BucketTable<V> {
    /// Make a new table with `bucket_count` empty bucket slots.
    ///
    /// `initial_capacity` is reserved in each bucket as it's created. Zero
    /// leaves buckets to grow on demand.
    ///
    /// Fails with [`Error::InvalidArgument`] if `bucket_count` is zero, or
    /// [`Error::Allocation`] if the slot array can't be allocated.
    pub fn new(bucket_count: usize, initial_capacity: usize) -> Result<Self, Error> {
        if bucket_count == 0 {
            return Err(Error::invalid(
                Operation::TableCreate,
                "bucket count must be positive",
            ));
        }
        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(bucket_count)
            .map_err(|e| Error::alloc(Operation::TableCreate, e))?;
        buckets.resize(bucket_count, None);
        tracing::trace!(bucket_count, initial_capacity, "created bucket table");
        Ok(Self {
            buckets,
            initial_capacity,
        })
    }

    /// Number of buckets, fixed at creation
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Per-bucket capacity hint this table was created with
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// The bucket index a key maps to: `key % bucket_count`.
    #[inline(always)]
    pub fn bucket_index(&self, key: u64) -> usize {
        // The remainder is below the bucket count, which is itself a usize.
        (key % self.buckets.len() as u64) as usize
    }

    /// Total number of entries, summed over every bucket.
    pub fn total_entry_count(&self) -> usize {
        self.iter().map(Bucket::len).sum()
    }

    /// Number of buckets that have been created by an insertion
    pub fn occupied_bucket_count(&self) -> usize {
        self.buckets.iter().filter(|slot| slot.is_some()).count()
    }

    /// Average number of entries per bucket, counting empty buckets.
    pub fn load_factor(&self) -> f64 {
        let entries = self.total_entry_count().to_f64().unwrap_or(f64::INFINITY);
        let buckets = self.bucket_count().to_f64().unwrap_or(f64::INFINITY);
        entries / buckets
    }

    /// Borrow the live bucket for `key`, if it exists.
    ///
    /// This is the allocation-free path used by lookups, equivalent to
    /// [`Self::get_bucket()`] with [`CopyPolicy::NoCopy`].
    #[inline(always)]
    pub fn bucket(&self, key: u64) -> Option<&Bucket<V>> {
        self.buckets[self.bucket_index(key)].as_deref()
    }

    /// Get the bucket for `key` under the requested [`CopyPolicy`].
    ///
    /// Returns `None` if nothing was ever added to that bucket. That's an
    /// ordinary outcome, not an error.
    pub fn get_bucket(&self, key: u64, policy: CopyPolicy) -> Option<BucketHandle<'_, V>> {
        let slot = self.buckets[self.bucket_index(key)].as_ref()?;
        Some(match policy {
            CopyPolicy::NoCopy => BucketHandle::Live(slot),
            CopyPolicy::Copy => BucketHandle::Copied(Bucket::clone(slot)),
            CopyPolicy::Clone => BucketHandle::Shared(Rc::clone(slot)),
        })
    }

    /// Append `value` to the bucket for `key`, creating the bucket if needed.
    ///
    /// If a shared handle to that bucket is outstanding, the bucket is copied
    /// first and the handle keeps the old contents. On failure the table is
    /// unchanged.
    pub fn add(&mut self, key: u64, value: V) -> Result<(), Error> {
        let index = self.bucket_index(key);
        if let Some(bucket) = self.buckets[index].as_mut() {
            return Rc::make_mut(bucket).push(value);
        }
        let mut bucket = Bucket::with_capacity(self.initial_capacity)?;
        bucket.push(value)?;
        self.buckets[index] = Some(Rc::new(bucket));
        Ok(())
    }

    /// Iterate over the buckets that exist, in bucket index order.
    pub fn iter(&self) -> impl Iterator<Item = &Bucket<V>> + '_ {
        self.buckets.iter().filter_map(Option::as_deref)
    }
}
