//! Sizing options for the tables built by the set operations

use serde::{Deserialize, Serialize};

use crate::err::{Error, Operation};

/// Default average number of entries per bucket
pub const DEFAULT_OCCUPANCY: usize = 20;

/// Default capacity reserved by each bucket of an index table
pub const DEFAULT_BUCKET_CAPACITY: usize = 8;

/// How the set operations size their tables
///
/// Tables are sized once, from the number of elements they will index,
/// and never grow. About twenty entries per bucket is a good trade between
/// the bucket array's footprint and the length of the scan within a bucket.
///
/// Missing fields take their defaults when deserializing.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[non_exhaustive]
pub struct TableOptions {
    /// Target average number of entries per bucket
    pub occupancy: usize,
    /// Capacity reserved by each bucket of an index, dedup or histogram table
    pub bucket_capacity: usize,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            occupancy: DEFAULT_OCCUPANCY,
            bucket_capacity: DEFAULT_BUCKET_CAPACITY,
        }
    }
}

impl TableOptions {
    /// Bucket count for a table that will hold `n` entries.
    ///
    /// This is the smallest prime larger than `n / occupancy`, so it's
    /// never less than two.
    pub fn bucket_count_for(&self, n: usize) -> Result<usize, Error> {
        if self.occupancy == 0 {
            return Err(Error::invalid(
                Operation::TableSizing,
                "occupancy must be positive",
            ));
        }
        let target = u32::try_from(n / self.occupancy).map_err(|_| {
            Error::invalid(Operation::TableSizing, "collection too large to index")
        })?;
        let prime = keyhash::next_larger_prime(target).ok_or_else(|| {
            Error::invalid(Operation::TableSizing, "collection too large to index")
        })?;
        usize::try_from(prime)
            .map_err(|_| Error::invalid(Operation::TableSizing, "bucket count exceeds usize"))
    }
}

/// Narrow a table's bucket count to the width the key functions take.
///
/// Every table built here was sized through [`TableOptions`], so this only
/// fails for tables a caller built by hand with more than `u32::MAX` buckets.
pub(crate) fn key_width(bucket_count: usize, op: Operation) -> Result<u32, Error> {
    u32::try_from(bucket_count).map_err(|_| Error::invalid(op, "too many buckets for key width"))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bucket_counts() {
        let opts = TableOptions::default();
        assert_eq!(opts.bucket_count_for(0).unwrap(), 2);
        assert_eq!(opts.bucket_count_for(19).unwrap(), 2);
        assert_eq!(opts.bucket_count_for(40).unwrap(), 3);
        assert_eq!(opts.bucket_count_for(1000).unwrap(), 53);
        assert_eq!(opts.bucket_count_for(1_000_000).unwrap(), 50_021);
    }

    #[test]
    fn zero_occupancy_rejected() {
        let opts = TableOptions {
            occupancy: 0,
            ..Default::default()
        };
        assert!(matches!(
            opts.bucket_count_for(10),
            Err(Error::InvalidArgument {
                op: Operation::TableSizing,
                ..
            })
        ));
    }

    #[test]
    fn wide_bucket_counts() {
        assert_eq!(key_width(53, Operation::Dedup).unwrap(), 53);
        assert!(key_width(usize::MAX, Operation::Dedup).is_err());
    }
}
