// Deterministic Miller-Rabin. {2, 7, 61} is exact for every 32-bit value and
// the first twelve primes are exact over the full 64-bit range, with early
// exits at the published bounds for shorter witness prefixes.

use std::collections::BTreeSet;

const WITNESSES_32: [u64; 3] = [2, 7, 61];

const WITNESSES_64: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

// n below BOUNDS[i] is proven prime once WITNESSES_64[..=i] all pass
const BOUNDS: [u64; 12] = [
    2_047,
    1_373_653,
    25_326_001,
    3_215_031_751,
    2_152_302_898_747,
    3_474_749_660_383,
    341_550_071_728_321,
    341_550_071_728_321,
    3_825_123_056_546_413_051,
    3_825_123_056_546_413_051,
    3_825_123_056_546_413_051,
    u64::MAX,
];

fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1 % m;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    result
}

/// One Miller-Rabin round for odd `n` with `n - 1 = d * 2^s`
fn passes(n: u64, a: u64, d: u64, s: u32) -> bool {
    let a = a % n;
    if a == 0 {
        return true;
    }
    let mut x = pow_mod(a, d, n);
    if x == 1 || x == n - 1 {
        return true;
    }
    for _ in 1..s {
        x = mul_mod(x, x, n);
        if x == n - 1 {
            return true;
        }
    }
    false
}

/// Handles small and even inputs, returns the answer if it is already known
fn trivial(n: u64) -> Option<bool> {
    if n < 2 {
        return Some(false);
    }
    for p in WITNESSES_64 {
        if n == p {
            return Some(true);
        }
        if n % p == 0 {
            return Some(false);
        }
    }
    None
}

fn decompose(n: u64) -> (u64, u32) {
    let s = (n - 1).trailing_zeros();
    ((n - 1) >> s, s)
}

pub fn is_prime_u32(n: u32) -> bool {
    let n = n as u64;
    if let Some(known) = trivial(n) {
        return known;
    }
    let (d, s) = decompose(n);
    WITNESSES_32.iter().all(|&a| passes(n, a, d, s))
}

pub fn is_prime(n: u64) -> bool {
    if n <= u32::MAX as u64 {
        return is_prime_u32(n as u32);
    }
    if let Some(known) = trivial(n) {
        return known;
    }
    let (d, s) = decompose(n);
    for (i, &a) in WITNESSES_64.iter().enumerate() {
        if !passes(n, a, d, s) {
            return false;
        }
        if n < BOUNDS[i] {
            return true;
        }
    }
    true
}

/// Longest digit string `prime_arrangements` will rearrange. Work grows with
/// the factorial of the length, ten digits is already about 3.6 million orders.
pub const MAX_ARRANGED_DIGITS: usize = 10;

/// Distinct primes that can be spelled by rearranging the given digits.
/// Arrangements with a leading zero are skipped, non-digits are ignored.
/// Inputs with more than `MAX_ARRANGED_DIGITS` digits give no primes.
pub fn prime_arrangements(digits: &str) -> Vec<u64> {
    let mut digits: Vec<u8> = digits
        .chars()
        .filter_map(|c| c.to_digit(10).map(|d| d as u8))
        .collect();
    if digits.is_empty() || digits.len() > MAX_ARRANGED_DIGITS {
        return Vec::new();
    }
    digits.sort_unstable();

    let mut found = BTreeSet::new();
    loop {
        if digits[0] != 0 || digits.len() == 1 {
            let value = digits.iter().fold(0u64, |acc, &d| acc * 10 + d as u64);
            if is_prime(value) {
                found.insert(value);
            }
        }
        if !next_permutation(&mut digits) {
            break;
        }
    }
    found.into_iter().collect()
}

/// Rearranges into the next lexicographic permutation, false after the last one
fn next_permutation(items: &mut [u8]) -> bool {
    let Some(i) = items.windows(2).rposition(|w| w[0] < w[1]) else {
        return false;
    };
    let j = items.iter().rposition(|&x| x > items[i]).unwrap_or(i);
    items.swap(i, j);
    items[i + 1..].reverse();
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trial_division(n: u64) -> bool {
        if n < 2 {
            return false;
        }
        let mut d = 2;
        while d * d <= n {
            if n % d == 0 {
                return false;
            }
            d += 1;
        }
        true
    }

    #[test]
    fn test_matches_trial_division() {
        for n in 0..=10_000u64 {
            assert_eq!(is_prime(n), trial_division(n), "{}", n);
        }
    }

    #[test]
    fn test_known_large_values() {
        assert!(is_prime(4_294_967_291)); // largest 32-bit prime
        assert!(is_prime(4_294_967_311)); // smallest prime above 2^32
        assert!(is_prime(1_000_000_007));
        assert!(is_prime(2_305_843_009_213_693_951)); // 2^61 - 1
        assert!(is_prime(18_446_744_073_709_551_557)); // largest 64-bit prime
        assert!(!is_prime(u64::MAX));
        assert!(!is_prime(4_294_967_297)); // 641 * 6700417
    }

    #[test]
    fn test_strong_pseudoprimes_are_rejected() {
        // strong pseudoprimes to the smaller witness prefixes
        assert!(!is_prime(3_215_031_751));
        assert!(!is_prime(2_152_302_898_747));
        assert!(!is_prime(3_474_749_660_383));
        assert!(!is_prime(341_550_071_728_321));
        assert!(!is_prime(3_825_123_056_546_413_051));
        assert!(!is_prime_u32(25_326_001));
    }

    #[test]
    fn test_prime_arrangements() {
        assert_eq!(prime_arrangements("13"), vec![13, 31]);
        assert_eq!(prime_arrangements("2"), vec![2]);
        assert_eq!(prime_arrangements("0"), Vec::<u64>::new());
        // 011 -> 101, 110 is even and leading zeros are not allowed
        assert_eq!(prime_arrangements("011"), vec![101]);
        assert!(prime_arrangements("").is_empty());
    }

    #[test]
    fn test_prime_arrangements_digit_cap() {
        // ten digits are still rearranged
        assert!(prime_arrangements("1000000007").contains(&1_000_000_007));
        // past the cap nothing is enumerated, even when the digits spell a prime
        assert_eq!(prime_arrangements("10000000019"), Vec::<u64>::new());
        assert!(prime_arrangements(&"7".repeat(19)).is_empty());
        assert_eq!(prime_arrangements("1 3"), vec![13, 31]);
    }
}
