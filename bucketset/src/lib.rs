#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]
#![doc = include_str!("../README.md")]
// @@ begin lint list @@
#![warn(missing_docs)]
#![warn(noop_method_call)]
#![warn(unreachable_pub)]
#![warn(clippy::all)]
#![deny(clippy::cargo_common_metadata)]
#![deny(clippy::cast_lossless)]
#![deny(clippy::checked_conversions)]
#![warn(clippy::cognitive_complexity)]
#![deny(clippy::debug_assert_with_mut_call)]
#![deny(clippy::exhaustive_enums)]
#![deny(clippy::exhaustive_structs)]
#![deny(clippy::expl_impl_clone_on_copy)]
#![deny(clippy::fallible_impl_from)]
#![deny(clippy::implicit_clone)]
#![deny(clippy::large_stack_arrays)]
#![warn(clippy::manual_ok_or)]
#![deny(clippy::missing_docs_in_private_items)]
#![warn(clippy::needless_borrow)]
#![warn(clippy::needless_pass_by_value)]
#![warn(clippy::option_option)]
#![deny(clippy::print_stderr)]
#![deny(clippy::print_stdout)]
#![warn(clippy::rc_buffer)]
#![deny(clippy::ref_option_ref)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::trait_duplication_in_bounds)]
#![deny(clippy::unnecessary_wraps)]
#![warn(clippy::unseparated_literal_suffix)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::mod_module_files)]
#![allow(clippy::let_unit_value)] // This can reasonably be done for explicitness
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::needless_lifetimes)]
//! <!-- @@ end lint list @@ -->

mod config;
mod err;
mod key;
mod lookup;
mod ops;
mod pta;
mod table;
pub mod tree;

pub use config::{TableOptions, DEFAULT_BUCKET_CAPACITY, DEFAULT_OCCUPANCY};
pub use err::{Error, Operation};
pub use key::{HashKey, SetKey};
pub use lookup::{find_by_hash, HashIndex};
pub use ops::{Dedup, Histogram};
pub use pta::{Point, Pta, SortBy, SortOrder};
pub use table::{Bucket, BucketHandle, BucketTable, CopyPolicy};
pub use tree::{dedup_by_tree, intersection_by_tree, key_set_from, union_by_tree};

/// Entry point for the hash-backed set operations, with custom sizing
///
/// Each operation builds its own tables, sized from the length of its input
/// according to the [`TableOptions`] held here. The free functions such as
/// [`dedup_by_hash()`] are equivalent to calling the same method on
/// [`HashSetBuilder::new()`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HashSetBuilder {
    /// Sizing for every table this builder makes
    options: TableOptions,
}

impl HashSetBuilder {
    /// Create a new [`HashSetBuilder`] with default settings.
    pub fn new() -> Self {
        Self::from_options(TableOptions::default())
    }

    /// Create a [`HashSetBuilder`] using previously loaded options.
    pub fn from_options(options: TableOptions) -> Self {
        Self { options }
    }

    /// Select the target average number of entries per bucket.
    ///
    /// Zero is accepted here but makes every operation fail with
    /// [`Error::InvalidArgument`].
    pub fn occupancy(&mut self, occupancy: usize) -> &mut Self {
        self.options.occupancy = occupancy;
        self
    }

    /// Select the capacity reserved by each new bucket.
    pub fn bucket_capacity(&mut self, capacity: usize) -> &mut Self {
        self.options.bucket_capacity = capacity;
        self
    }

    /// The options in effect
    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Index every element of `source` for repeated lookups.
    pub fn index<'a, T: HashKey>(&self, source: &'a [T]) -> Result<HashIndex<'a, T>, Error> {
        HashIndex::with_options(source, &self.options)
    }

    /// Remove duplicates from `source`, keeping first occurrences in order.
    pub fn dedup<T: HashKey + Clone>(&self, source: &[T]) -> Result<Dedup<T>, Error> {
        ops::dedup(&self.options, source.len(), source.iter(), Operation::Dedup)
    }

    /// Count occurrences of each distinct value in `source`.
    ///
    /// Fails with [`Error::InvalidArgument`] if `source` is empty.
    pub fn histogram<T: HashKey + Clone>(&self, source: &[T]) -> Result<Histogram<T>, Error> {
        ops::histogram(&self.options, source)
    }

    /// Values present in both `a` and `b`, each reported once.
    ///
    /// The result follows the order of the shorter input, or `b` if the
    /// inputs have the same length. Runs in `O(a.len() + b.len())`.
    pub fn intersection<T: HashKey + Clone>(&self, a: &[T], b: &[T]) -> Result<Vec<T>, Error> {
        ops::intersection(&self.options, a, b)
    }

    /// Distinct values of `a` followed by `b`, in first-occurrence order.
    pub fn union<T: HashKey + Clone>(&self, a: &[T], b: &[T]) -> Result<Vec<T>, Error> {
        ops::union(&self.options, a, b)
    }
}

impl Default for HashSetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove duplicates from `source`, using default [`HashSetBuilder`] options.
///
/// The result keeps the first occurrence of each value, in order, and can
/// answer membership queries through [`Dedup::find()`].
pub fn dedup_by_hash<T: HashKey + Clone>(source: &[T]) -> Result<Dedup<T>, Error> {
    HashSetBuilder::new().dedup(source)
}

/// Count occurrences of each distinct value in `source`, using default
/// [`HashSetBuilder`] options.
///
/// Fails with [`Error::InvalidArgument`] if `source` is empty.
pub fn histogram_by_hash<T: HashKey + Clone>(source: &[T]) -> Result<Histogram<T>, Error> {
    HashSetBuilder::new().histogram(source)
}

/// Values present in both `a` and `b`, using default [`HashSetBuilder`]
/// options.
pub fn intersection_by_hash<T: HashKey + Clone>(a: &[T], b: &[T]) -> Result<Vec<T>, Error> {
    HashSetBuilder::new().intersection(a, b)
}

/// Distinct values of `a` followed by `b`, using default [`HashSetBuilder`]
/// options.
pub fn union_by_hash<T: HashKey + Clone>(a: &[T], b: &[T]) -> Result<Vec<T>, Error> {
    HashSetBuilder::new().union(a, b)
}
