//! Uniform sampling of integers wider than any native random primitive.
//!
//! Values are assembled one decimal digit at a time from the wrapped source and
//! accepted only when they fall below the bound, so there is no modulo bias.
//! Any [`RngCore`] can sit underneath; the default thread RNG is fine for tests
//! and demos, an OS-backed source (`OsRng.unwrap_err()`) for real secrets.

use std::collections::BTreeSet;

use num_bigint::{BigInt, BigUint};
use num_traits::{Signed, Zero};
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, RngCore, SeedableRng};

use crate::error::{Error, Result};

pub struct BigRandom<R> {
    rng: R,
}

impl BigRandom<ThreadRng> {
    pub fn from_thread() -> Self {
        Self::new(rand::rng())
    }
}

impl BigRandom<StdRng> {
    /// Deterministic generator, handy for reproducible splits in tests.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> BigRandom<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Uniform integer in `[0, max)`.
    pub fn next_int(&mut self, max: &BigInt) -> Result<BigInt> {
        if max.is_negative() {
            return Err(Error::NegativeBound(max.clone()));
        }
        self.next_uint(max.magnitude()).map(BigInt::from)
    }

    /// Uniform integer in `[min, max)`.
    pub fn next_int_between(&mut self, min: &BigInt, max: &BigInt) -> Result<BigInt> {
        if min >= max {
            return Err(Error::EmptyRange {
                min: min.clone(),
                max: max.clone(),
            });
        }
        let width = max - min;
        Ok(min + self.next_int(&width)?)
    }

    /// `count` distinct integers from `[0, max)`.
    pub fn next_int_set(&mut self, count: usize, max: &BigInt) -> Result<BTreeSet<BigInt>> {
        if max.is_negative() {
            return Err(Error::NegativeBound(max.clone()));
        }
        self.next_int_between_set(count, &BigInt::zero(), max)
    }

    /// `count` distinct integers from `[min, max)`.
    ///
    /// Fails up front when the range holds fewer than `count` values, since the
    /// sampling loop would otherwise never finish.
    pub fn next_int_between_set(
        &mut self,
        count: usize,
        min: &BigInt,
        max: &BigInt,
    ) -> Result<BTreeSet<BigInt>> {
        let mut drawn = BTreeSet::new();
        if count == 0 {
            return Ok(drawn);
        }
        let available = if max > min { max - min } else { BigInt::zero() };
        if BigInt::from(count) > available {
            return Err(Error::SetTooLarge { count, available });
        }
        while drawn.len() < count {
            drawn.insert(self.next_int_between(min, max)?);
        }
        Ok(drawn)
    }

    /// Uniform integer in `[0, max)` over unsigned values.
    pub fn next_uint(&mut self, max: &BigUint) -> Result<BigUint> {
        if max.is_zero() {
            return Err(Error::EmptyRange {
                min: BigInt::zero(),
                max: BigInt::zero(),
            });
        }
        let digits = max.to_str_radix(10).len();
        let mut rounds = 0usize;
        loop {
            rounds += 1;
            let candidate = self.draw_digits(digits);
            if &candidate < max {
                tracing::trace!(digits, rounds, "sampled big integer");
                return Ok(candidate);
            }
        }
    }

    /// Uniform integer in `[min, max)` over unsigned values.
    pub fn next_uint_between(&mut self, min: &BigUint, max: &BigUint) -> Result<BigUint> {
        if min >= max {
            return Err(Error::EmptyRange {
                min: BigInt::from(min.clone()),
                max: BigInt::from(max.clone()),
            });
        }
        let width = max - min;
        Ok(min + self.next_uint(&width)?)
    }

    fn draw_digits(&mut self, digits: usize) -> BigUint {
        let mut value = BigUint::zero();
        for _ in 0..digits {
            let digit: u8 = self.rng.random_range(0..10);
            value = value * 10u32 + digit;
        }
        value
    }
}
