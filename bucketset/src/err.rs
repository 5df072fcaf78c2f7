//! Error types for the `bucketset` crate

use std::collections::TryReserveError;

/// Operations that can report an [`Error`]
///
/// Every error carries one of these, naming the entry point that failed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[non_exhaustive]
pub enum Operation {
    /// [`crate::BucketTable::new()`]
    TableCreate,
    /// [`crate::BucketTable::add()`]
    TableAdd,
    /// Choosing a bucket count for a collection
    TableSizing,
    /// [`crate::HashIndex::new()`]
    BuildIndex,
    /// [`crate::find_by_hash()`]
    FindByHash,
    /// [`crate::dedup_by_hash()`]
    Dedup,
    /// [`crate::histogram_by_hash()`]
    Histogram,
    /// [`crate::intersection_by_hash()`]
    Intersection,
    /// [`crate::union_by_hash()`]
    Union,
    /// [`crate::Pta::join()`]
    Join,
    /// [`crate::Pta::sort_by_index()`]
    SortByIndex,
}

/// Errors from building or querying bucket tables
#[derive(Clone, Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The arguments to an operation were unusable.
    ///
    /// Nothing was modified before this was detected.
    #[error("invalid argument to {op}: {reason}")]
    InvalidArgument {
        /// Operation that rejected its arguments
        op: Operation,
        /// What was wrong with them
        reason: &'static str,
    },

    /// Memory for a table, bucket or result could not be reserved.
    ///
    /// Anything partially allocated by the failing call has been released.
    #[error("allocation failed in {op}")]
    Allocation {
        /// Operation that ran out of memory
        op: Operation,
        /// Underlying reservation failure
        #[source]
        source: TryReserveError,
    },
}

impl Error {
    /// Build an [`Error::InvalidArgument`] and log it.
    pub(crate) fn invalid(op: Operation, reason: &'static str) -> Self {
        tracing::debug!(%op, reason, "rejected arguments");
        Error::InvalidArgument { op, reason }
    }

    /// Build an [`Error::Allocation`] and log it.
    pub(crate) fn alloc(op: Operation, source: TryReserveError) -> Self {
        tracing::debug!(%op, %source, "allocation failed");
        Error::Allocation { op, source }
    }

    /// The operation that reported this error.
    pub fn operation(&self) -> Operation {
        match self {
            Error::InvalidArgument { op, .. } | Error::Allocation { op, .. } => *op,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn operation_names() {
        assert_eq!(Operation::TableCreate.to_string(), "table_create");
        let name: &'static str = Operation::FindByHash.into();
        assert_eq!(name, "find_by_hash");
    }

    #[test]
    fn invalid_argument_display() {
        let err = Error::invalid(Operation::Histogram, "no data");
        assert_eq!(err.to_string(), "invalid argument to histogram: no data");
        assert_eq!(err.operation(), Operation::Histogram);
    }

    #[test]
    #[traced_test]
    fn rejections_are_logged() {
        let err = crate::BucketTable::<u32>::new(0, 0).unwrap_err();
        assert_eq!(err.operation(), Operation::TableCreate);
        assert!(logs_contain("rejected arguments"));
        assert!(logs_contain("bucket count must be positive"));
    }
}
