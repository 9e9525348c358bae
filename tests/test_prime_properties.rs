// Property-based checks of the primality test

use proptest::prelude::*;

use tilecraft::prime::{is_prime, prime_arrangements};

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

proptest! {
    #[test]
    fn agrees_with_trial_division(n in 0u64..5_000_000) {
        prop_assert_eq!(is_prime(n), trial_division(n));
    }

    // products of two 32-bit factors cover the wide witness path
    #[test]
    fn products_are_composite(a in 2u64..=u32::MAX as u64, b in 2u64..=u32::MAX as u64) {
        prop_assert!(!is_prime(a * b));
    }

    #[test]
    fn arrangements_are_prime_and_use_the_digits(digits in "[0-9]{1,6}") {
        let mut expected: Vec<char> = digits.chars().collect();
        expected.sort_unstable();
        for p in prime_arrangements(&digits) {
            prop_assert!(trial_division(p));
            let mut got: Vec<char> = p.to_string().chars().collect();
            got.sort_unstable();
            prop_assert_eq!(&got, &expected);
        }
    }
}
