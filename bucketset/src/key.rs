//! Traits connecting element types to the key functions in [`keyhash`]

/// Element types usable with the hash engine
///
/// A bucket key only selects a bucket. Membership is decided by
/// [`HashKey::exact_eq()`], so the two must agree: values that are
/// `exact_eq` must produce the same key for every bucket count. Values that
/// aren't `exact_eq` may still share a key.
pub trait HashKey {
    /// Key for this value in a table with `nbuckets` buckets
    fn bucket_key(&self, nbuckets: u32) -> u64;

    /// Exact equality, as used to resolve collisions within a bucket
    fn exact_eq(&self, other: &Self) -> bool;
}

/// Element types usable with the tree engine
///
/// The tree engine treats values with equal set keys as equal, without ever
/// comparing the values themselves.
pub trait SetKey {
    /// Key for this value, independent of any table size
    fn set_key(&self) -> u64;
}

/// Floats compare by bit pattern: `0.0` and `-0.0` differ, and a NaN
/// matches any NaN with the same bits. Callers that want tolerance should
/// quantize before hashing.
impl HashKey for f64 {
    fn bucket_key(&self, nbuckets: u32) -> u64 {
        keyhash::float64_key(nbuckets, *self)
    }

    fn exact_eq(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }
}

impl SetKey for f64 {
    fn set_key(&self) -> u64 {
        keyhash::float64_set_key(*self)
    }
}

impl HashKey for str {
    fn bucket_key(&self, nbuckets: u32) -> u64 {
        keyhash::string_key(nbuckets, self)
    }

    fn exact_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl SetKey for str {
    fn set_key(&self) -> u64 {
        keyhash::string_set_key(self)
    }
}

impl HashKey for String {
    fn bucket_key(&self, nbuckets: u32) -> u64 {
        self.as_str().bucket_key(nbuckets)
    }

    fn exact_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl SetKey for String {
    fn set_key(&self) -> u64 {
        self.as_str().set_key()
    }
}

impl<T: HashKey + ?Sized> HashKey for &T {
    fn bucket_key(&self, nbuckets: u32) -> u64 {
        (**self).bucket_key(nbuckets)
    }

    fn exact_eq(&self, other: &Self) -> bool {
        (**self).exact_eq(*other)
    }
}

impl<T: SetKey + ?Sized> SetKey for &T {
    fn set_key(&self) -> u64 {
        (**self).set_key()
    }
}
