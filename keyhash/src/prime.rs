//! Prime sizing for bucket counts

use num_traits::PrimInt;

/// Check whether `n` is prime, by trial division.
///
/// Values below two, including every negative value, are not prime.
pub fn is_prime<T: PrimInt>(n: T) -> bool {
    let one = T::one();
    let two = one + one;
    let three = two + one;
    let six = three + three;

    if n <= one {
        return false;
    }
    if n <= three {
        return true;
    }
    if n % two == T::zero() || n % three == T::zero() {
        return false;
    }

    // Remaining candidates are of the form 6k - 1 and 6k + 1.
    let mut i = three + two;
    while i <= n / i {
        if n % i == T::zero() || n % (i + two) == T::zero() {
            return false;
        }
        i = match i.checked_add(&six) {
            Some(next) => next,
            None => break,
        };
    }
    true
}

/// Find the smallest prime strictly larger than `start`.
///
/// Returns `None` if no such prime fits in `T`.
pub fn next_larger_prime<T: PrimInt>(start: T) -> Option<T> {
    let mut candidate = start.checked_add(&T::one())?;
    loop {
        if is_prime(candidate) {
            return Some(candidate);
        }
        candidate = candidate.checked_add(&T::one())?;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn small_primes() {
        let primes: Vec<u32> = (0..50).filter(|&n| is_prime(n)).collect();
        assert_eq!(
            primes,
            [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47]
        );
        assert!(!is_prime(-7_i32));
        assert!(!is_prime(1_u8));
    }

    #[test]
    fn larger_values() {
        assert!(is_prime(1_000_003_u32));
        assert!(!is_prime(1_000_001_u32));
        assert!(is_prime(4_294_967_291_u32));
        assert!(!is_prime(4_294_967_295_u32));
    }

    #[test]
    fn next_prime_is_strictly_larger() {
        assert_eq!(next_larger_prime(0_u32), Some(2));
        assert_eq!(next_larger_prime(2_u32), Some(3));
        assert_eq!(next_larger_prime(20_u32), Some(23));
        assert_eq!(next_larger_prime(23_u32), Some(29));
        assert_eq!(next_larger_prime(1_000_000_u32), Some(1_000_003));
        assert_eq!(next_larger_prime(-10_i64), Some(2));
    }

    #[test]
    fn next_prime_overflow() {
        assert_eq!(next_larger_prime(250_u8), Some(251));
        assert_eq!(next_larger_prime(251_u8), None);
        assert_eq!(next_larger_prime(u32::MAX), None);
    }
}
