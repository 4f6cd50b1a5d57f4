//! Primality testing and modulus selection.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::RngCore;

use crate::config::PrimeStrategy;
use crate::error::Result;
use crate::random::BigRandom;

/// Trial divisors, reused as Miller–Rabin bases.
/// The first thirteen alone make the test exact below 3.3·10^24.
const SMALL_PRIMES: [u32; 20] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71,
];

/// Miller–Rabin over [`SMALL_PRIMES`], after trial division by the same set.
pub fn is_probable_prime(n: &BigUint) -> bool {
    if *n < BigUint::from(2u8) {
        return false;
    }
    for &p in SMALL_PRIMES.iter() {
        let p = BigUint::from(p);
        if *n == p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }

    // n - 1 = d * 2^s with d odd
    let n_minus_one = n - 1u32;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    'witness: for &a in SMALL_PRIMES.iter() {
        let mut x = BigUint::from(a).modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Smallest probable prime strictly greater than `n`.
pub fn next_prime(n: &BigUint) -> BigUint {
    let two = BigUint::from(2u8);
    let mut candidate = n + 1u32;
    if candidate <= two {
        return two;
    }
    if candidate.is_even() {
        candidate += 1u32;
    }
    let mut tested = 1usize;
    while !is_probable_prime(&candidate) {
        candidate += 2u32;
        tested += 1;
    }
    tracing::trace!(tested, bits = candidate.bits(), "prime search finished");
    candidate
}

/// Picks a prime strictly greater than `bound`.
pub fn choose_modulus<R: RngCore>(
    bound: &BigUint,
    strategy: PrimeStrategy,
    rng: &mut BigRandom<R>,
) -> Result<BigUint> {
    match strategy {
        PrimeStrategy::Incremental => Ok(next_prime(bound)),
        PrimeStrategy::Randomized => {
            // Bertrand's postulate keeps a prime inside (m, 2m), so the search stays short.
            let low = bound + 1u32;
            let high = &low << 1u32;
            let start = rng.next_uint_between(&low, &high)?;
            Ok(next_prime(&(start - 1u32)))
        }
    }
}
