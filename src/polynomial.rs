use std::cmp::max;
use std::fmt;

use num_bigint::BigUint;
use num_traits::One;
use rand::RngCore;

use crate::config::SplitConfig;
use crate::error::{Error, Result};
use crate::field::PrimeField;
use crate::point::Point;
use crate::prime::choose_modulus;
use crate::random::BigRandom;
use crate::sharing::ShareSet;

/// The dealer's polynomial f(x) = s + a1*x + ... + a_{k-1}*x^{k-1} over F_p.
///
/// Shares are minted by consuming the polynomial, so the coefficient vector is
/// gone as soon as they exist.
pub struct SecretPolynomial {
    field: PrimeField,
    /// Coefficients a0 (the secret), a1, ..., a_{k-1}
    coeffs: Vec<BigUint>,
}

impl SecretPolynomial {
    /// Picks a fresh prime above `secret` and draws `threshold - 1` random coefficients.
    pub fn new<R: RngCore>(
        secret: &BigUint,
        threshold: usize,
        config: &SplitConfig,
        rng: &mut BigRandom<R>,
    ) -> Result<Self> {
        Self::above(secret, threshold, &BigUint::one(), config, rng)
    }

    /// Like [`SecretPolynomial::new`], with the modulus also forced above `bound`.
    pub(crate) fn above<R: RngCore>(
        secret: &BigUint,
        threshold: usize,
        bound: &BigUint,
        config: &SplitConfig,
        rng: &mut BigRandom<R>,
    ) -> Result<Self> {
        check_threshold(threshold)?;
        let floor = BigUint::one() << config.modulus_floor_bits;
        let bound = max(max(secret, bound), &floor);
        let prime = choose_modulus(bound, config.prime_strategy, rng)?;
        Self::random(secret, threshold, PrimeField::trusted(prime), rng)
    }

    /// Uses a caller-supplied modulus, which must be prime and exceed the secret.
    pub fn with_modulus<R: RngCore>(
        secret: &BigUint,
        threshold: usize,
        modulus: BigUint,
        rng: &mut BigRandom<R>,
    ) -> Result<Self> {
        check_threshold(threshold)?;
        let field = PrimeField::new(modulus)?;
        check_secret_fits(secret, &field)?;
        Self::random(secret, threshold, field, rng)
    }

    /// Construct a polynomial from explicit coefficients, constant term first.
    pub fn from_coefficients(coeffs: Vec<BigUint>, modulus: BigUint) -> Result<Self> {
        check_threshold(coeffs.len())?;
        let field = PrimeField::new(modulus)?;
        check_secret_fits(&coeffs[0], &field)?;
        let coeffs = coeffs.into_iter().map(|c| c % field.prime()).collect();
        Ok(Self { field, coeffs })
    }

    fn random<R: RngCore>(
        secret: &BigUint,
        threshold: usize,
        field: PrimeField,
        rng: &mut BigRandom<R>,
    ) -> Result<Self> {
        let mut coeffs = Vec::with_capacity(threshold);
        coeffs.push(secret.clone());
        for _ in 1..threshold {
            coeffs.push(rng.next_uint(field.prime())?);
        }
        Ok(Self { field, coeffs })
    }

    pub fn modulus(&self) -> &BigUint {
        self.field.prime()
    }

    /// Threshold (number of coefficients).
    pub fn threshold(&self) -> usize {
        self.coeffs.len()
    }

    /// Degree of the polynomial (k-1 if threshold is k).
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Evaluate the polynomial at x using Horner's method.
    pub fn evaluate(&self, x: &BigUint) -> BigUint {
        let x = self.field.element(x.clone());
        let mut result = self.field.zero();
        for coeff in self.coeffs.iter().rev() {
            result = result * &x + &self.field.element(coeff.clone());
        }
        result.into_value()
    }

    /// Evaluates at x = 1..=share_count and drops the coefficients.
    pub fn into_shares(self, share_count: usize) -> Result<ShareSet<Point>> {
        let threshold = self.threshold();
        if share_count < threshold {
            return Err(Error::NotEnoughShares {
                threshold,
                share_count,
            });
        }
        let count = BigUint::from(share_count);
        if count >= *self.modulus() {
            return Err(Error::ModulusTooSmall {
                modulus: self.modulus().clone(),
                bound: count,
            });
        }

        let points = (1..=share_count)
            .map(|i| {
                let x = BigUint::from(i);
                let y = self.evaluate(&x);
                Point::new(x, y)
            })
            .collect();
        Ok(ShareSet::new(self.modulus().clone(), threshold, points))
    }
}

impl fmt::Debug for SecretPolynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretPolynomial")
            .field("modulus", self.modulus())
            .field("threshold", &self.threshold())
            .finish_non_exhaustive()
    }
}

pub(crate) fn check_threshold(threshold: usize) -> Result<()> {
    if threshold < 2 {
        return Err(Error::ThresholdTooSmall(threshold));
    }
    Ok(())
}

fn check_secret_fits(secret: &BigUint, field: &PrimeField) -> Result<()> {
    if field.prime() <= secret {
        return Err(Error::ModulusTooSmall {
            modulus: field.prime().clone(),
            bound: secret.clone(),
        });
    }
    Ok(())
}
