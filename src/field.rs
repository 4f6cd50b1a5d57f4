use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{Error, Result};
use crate::field_element::FieldElement;
use crate::prime::is_probable_prime;

/// The prime field F_p for a modulus chosen at run time.
///
/// Unlike a compile-time curve field, every split picks its own `p`, so the
/// modulus travels with the value instead of living in a marker type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeField {
    prime: BigUint,
}

impl PrimeField {
    /// Wraps `prime` after checking that it really is prime.
    pub fn new(prime: BigUint) -> Result<Self> {
        if !is_probable_prime(&prime) {
            return Err(Error::NonPrimeModulus(prime));
        }
        Ok(Self { prime })
    }

    /// Skips the primality check; callers must have produced `prime` through the prime search.
    pub(crate) fn trusted(prime: BigUint) -> Self {
        Self { prime }
    }

    pub fn prime(&self) -> &BigUint {
        &self.prime
    }

    pub fn element(&self, value: BigUint) -> FieldElement<'_> {
        FieldElement::new(value, self)
    }

    /// Maps a signed integer to its residue in `[0, p)`.
    pub fn from_signed(&self, value: &BigInt) -> FieldElement<'_> {
        let modulus = BigInt::from(self.prime.clone());
        let residue = value.mod_floor(&modulus);
        let (_, magnitude) = residue.into_parts();
        self.element(magnitude)
    }

    pub fn zero(&self) -> FieldElement<'_> {
        self.element(BigUint::zero())
    }

    pub fn one(&self) -> FieldElement<'_> {
        self.element(BigUint::one())
    }

    /// Inverse of `value` modulo p via the extended Euclidean algorithm.
    pub(crate) fn invert(&self, value: &BigUint) -> Result<BigUint> {
        let (gcd, x, _) = Self::extended_gcd(value % &self.prime, self.prime.clone());
        if !gcd.is_one() {
            return Err(Error::NotInvertible(value.clone()));
        }
        Ok(self.from_signed(&x).into_value())
    }

    /// Extended GCD: returns (gcd, x, y) such that a·x + b·y = gcd
    fn extended_gcd(mut a: BigUint, mut b: BigUint) -> (BigUint, BigInt, BigInt) {
        let mut x0 = BigInt::one();
        let mut x1 = BigInt::zero();
        let mut y0 = BigInt::zero();
        let mut y1 = BigInt::one();

        while !b.is_zero() {
            let (quotient, remainder) = a.div_rem(&b);
            a = b;
            b = remainder;

            let quotient = BigInt::from_biguint(Sign::Plus, quotient);

            let temp_x = &x0 - &quotient * &x1;
            x0 = x1;
            x1 = temp_x;

            let temp_y = &y0 - &quotient * &y1;
            y0 = y1;
            y1 = temp_y;
        }

        (a, x0, y0)
    }
}
