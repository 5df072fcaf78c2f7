//! Key functions for numbers, pixel locations and strings
//!
//! Bucket keys mix the bucket count into the key before the final avalanche
//! step. The bucket index a table derives from a key is `key % nbuckets`, so
//! without that mixing a key that happens to be a multiple of the bucket
//! count would pile every such value into bucket zero.
//!
//! Set keys skip the bucket count entirely. They're compared directly as
//! integers, so two different values with the same set key are
//! indistinguishable to anything that only looks at the key.

/// Multiplier for the x coordinate of a pixel location
const POINT_X_FACTOR: u64 = 2_173_249_142;

/// Multiplier for the y coordinate of a pixel location
const POINT_Y_FACTOR: u64 = 3_763_193_258;

/// Odd multiplier that spreads the bucket count over all 64 bits
const BUCKET_SEED_FACTOR: u64 = 0x9e37_79b9_7f4a_7c15;

/// FNV-1a 64-bit offset basis
const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;

/// FNV-1a 64-bit prime
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Final avalanche step, the output mixer from SplitMix64.
#[inline(always)]
fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Spread a bucket count so it can be folded into a key.
#[inline(always)]
fn bucket_seed(nbuckets: u32) -> u64 {
    u64::from(nbuckets).wrapping_mul(BUCKET_SEED_FACTOR)
}

/// Linear combination of pixel coordinates, wrapping on overflow.
#[inline(always)]
fn point_combination(x: i32, y: i32) -> u64 {
    (i64::from(x) as u64)
        .wrapping_mul(POINT_X_FACTOR)
        .wrapping_add((i64::from(y) as u64).wrapping_mul(POINT_Y_FACTOR))
}

/// FNV-1a over a byte string, starting from an arbitrary basis.
#[inline(always)]
fn fnv1a(basis: u64, bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(basis, |h, &b| (h ^ u64::from(b)).wrapping_mul(FNV_PRIME))
}

/// Bucket key for a double precision value.
///
/// The key depends on the exact bit pattern, so `0.0` and `-0.0` are
/// different values here, and every NaN with the same payload is the
/// same value.
pub fn float64_key(nbuckets: u32, val: f64) -> u64 {
    mix64(val.to_bits() ^ bucket_seed(nbuckets))
}

/// Set key for a double precision value: its bit pattern.
///
/// Unlike the other set keys, this one is collision free.
pub fn float64_set_key(val: f64) -> u64 {
    val.to_bits()
}

/// Bucket key for an integer pixel location.
///
/// Neighboring pixels land in unrelated buckets.
pub fn point_key_fast(nbuckets: u32, x: i32, y: i32) -> u64 {
    mix64(point_combination(x, y) ^ bucket_seed(nbuckets))
}

/// Set key for an integer pixel location.
///
/// This is a plain linear combination of the two coordinates modulo 2^64.
/// It's collision free for coordinates of ordinary image sizes, but
/// locations far apart in the full `i32` range can share a key.
pub fn point_key(x: i32, y: i32) -> u64 {
    point_combination(x, y)
}

/// Bucket key for a string, computed over its UTF-8 bytes.
pub fn string_key(nbuckets: u32, s: &str) -> u64 {
    mix64(fnv1a(FNV_OFFSET ^ bucket_seed(nbuckets), s.as_bytes()))
}

/// Set key for a string: 64-bit FNV-1a over its UTF-8 bytes.
pub fn string_set_key(s: &str) -> u64 {
    fnv1a(FNV_OFFSET, s.as_bytes())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn keys_are_reproducible() {
        for val in [0.0, 1.0, -3.25, 1e300, f64::MIN_POSITIVE] {
            assert_eq!(float64_key(53, val), float64_key(53, val));
        }
        assert_eq!(point_key_fast(7, -4, 19), point_key_fast(7, -4, 19));
        assert_eq!(string_key(101, "abc"), string_key(101, "abc"));
    }

    #[test]
    fn float_keys_follow_bit_patterns() {
        assert_ne!(float64_set_key(0.0), float64_set_key(-0.0));
        assert_eq!(float64_set_key(f64::NAN), float64_set_key(f64::NAN));
        assert_eq!(float64_set_key(1.5), 1.5f64.to_bits());
    }

    #[test]
    fn bucket_count_changes_keys() {
        assert_ne!(float64_key(53, 2.0), float64_key(59, 2.0));
        assert_ne!(point_key_fast(53, 1, 2), point_key_fast(59, 1, 2));
        assert_ne!(string_key(53, "x"), string_key(59, "x"));
    }

    #[test]
    fn point_set_key_is_linear() {
        assert_eq!(point_key(0, 0), 0);
        assert_eq!(point_key(1, 0), POINT_X_FACTOR);
        assert_eq!(point_key(0, 1), POINT_Y_FACTOR);
        assert_eq!(
            point_key(-1, 0),
            0u64.wrapping_sub(POINT_X_FACTOR),
            "negative coordinates wrap"
        );
        assert_ne!(point_key(1, 2), point_key(2, 1));
    }

    #[test]
    fn adjacent_pixels_spread_over_buckets() {
        // A 100x100 block of pixels in 499 buckets is about 20 per bucket.
        let nbuckets = 499_u32;
        let mut counts = vec![0_u32; nbuckets as usize];
        for y in 0..100 {
            for x in 0..100 {
                let key = point_key_fast(nbuckets, x, y);
                counts[(key % u64::from(nbuckets)) as usize] += 1;
            }
        }
        assert_eq!(counts.iter().sum::<u32>(), 10_000);
        assert!(counts.iter().all(|&c| c > 0));
        assert!(counts.iter().all(|&c| c < 60));
    }

    #[test]
    fn string_keys_use_every_byte() {
        assert_ne!(string_set_key("ab"), string_set_key("ba"));
        assert_ne!(string_set_key(""), string_set_key("\0"));
        assert_eq!(string_set_key(""), FNV_OFFSET);
    }
}
