use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::Result;
use crate::field::PrimeField;

// Borrowing the field keeps a single copy of p per split instead of one per element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldElement<'a> {
    value: BigUint,
    field: &'a PrimeField,
}

impl<'a> FieldElement<'a> {
    /// Construct an element reduced modulo the field prime
    pub fn new(value: BigUint, field: &'a PrimeField) -> Self {
        Self {
            value: value % field.prime(),
            field,
        }
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn field(&self) -> &'a PrimeField {
        self.field
    }

    pub fn into_value(self) -> BigUint {
        self.value
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn pow(&self, exponent: &BigUint) -> Self {
        Self::new(self.value.modpow(exponent, self.field.prime()), self.field)
    }

    /// Multiplicative inverse; fails only for zero.
    pub fn inverse(&self) -> Result<Self> {
        let inv = self.field.invert(&self.value)?;
        Ok(Self::new(inv, self.field))
    }

    /// `self / rhs`, i.e. multiplication by the inverse of `rhs`.
    pub fn checked_div(self, rhs: &Self) -> Result<Self> {
        Ok(self * &rhs.inverse()?)
    }
}

impl<'a> Add<&FieldElement<'a>> for FieldElement<'a> {
    type Output = Self;

    fn add(self, rhs: &Self) -> Self::Output {
        Self::new(self.value + &rhs.value, self.field)
    }
}

impl<'a> Sub<&FieldElement<'a>> for FieldElement<'a> {
    type Output = Self;

    fn sub(self, rhs: &Self) -> Self::Output {
        if self.value >= rhs.value {
            Self::new(self.value - &rhs.value, self.field)
        } else {
            Self::new(self.value + self.field.prime() - &rhs.value, self.field)
        }
    }
}

impl<'a> Mul<&FieldElement<'a>> for FieldElement<'a> {
    type Output = Self;

    fn mul(self, rhs: &Self) -> Self::Output {
        Self::new(self.value * &rhs.value, self.field)
    }
}

impl<'a> Mul<&FieldElement<'a>> for &FieldElement<'a> {
    type Output = FieldElement<'a>;

    fn mul(self, rhs: &FieldElement<'a>) -> FieldElement<'a> {
        FieldElement::new(&self.value * &rhs.value, self.field)
    }
}

impl<'a> Neg for FieldElement<'a> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        if self.value.is_zero() {
            self
        } else {
            Self::new(self.field.prime() - self.value, self.field)
        }
    }
}

impl fmt::Display for FieldElement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use num_bigint::BigUint;
    use num_traits::FromPrimitive;
    use proptest::prelude::*;

    fn field(p: u64) -> PrimeField {
        PrimeField::new(BigUint::from_u64(p).unwrap()).unwrap()
    }

    fn fe(field: &PrimeField, x: u64) -> FieldElement<'_> {
        field.element(BigUint::from_u64(x).unwrap())
    }

    #[test]
    fn test_new_reduces_value() {
        let f7 = field(7);
        assert_eq!(fe(&f7, 8).value(), &BigUint::from(1u8)); // 8 mod 7 = 1
        assert_eq!(fe(&f7, 14).value(), &BigUint::from(0u8)); // 14 mod 7 = 0
    }

    #[test]
    fn test_add_sub_mul() {
        let f7 = field(7);
        assert_eq!(fe(&f7, 3) + &fe(&f7, 5), fe(&f7, 1)); // 8 ≡ 1
        assert_eq!(fe(&f7, 3) - &fe(&f7, 5), fe(&f7, 5)); // -2 ≡ 5
        assert_eq!(fe(&f7, 0) - &fe(&f7, 1), fe(&f7, 6)); // -1 ≡ 6
        assert_eq!(fe(&f7, 6) * &fe(&f7, 2), fe(&f7, 5)); // 12 ≡ 5
        assert_eq!(&fe(&f7, 3) * &fe(&f7, 5), fe(&f7, 1)); // 15 ≡ 1
    }

    #[test]
    fn test_neg() {
        let f7 = field(7);
        assert_eq!(-fe(&f7, 0), fe(&f7, 0));
        assert_eq!(-fe(&f7, 3), fe(&f7, 4));
    }

    #[test]
    fn test_div_mod31() {
        let f31 = field(31);
        // 3 / 24 ≡ 4  (since 24*4=96≡3 mod31)
        assert_eq!(fe(&f31, 3).checked_div(&fe(&f31, 24)).unwrap(), fe(&f31, 4));
        // 4⁻¹ = 8, 8^4 · 11 ≡ 13
        let inv4 = fe(&f31, 4).inverse().unwrap();
        assert_eq!(inv4, fe(&f31, 8));
        assert_eq!(inv4.pow(&BigUint::from(4u8)) * &fe(&f31, 11), fe(&f31, 13));
    }

    #[test]
    fn test_zero_has_no_inverse() {
        let f7 = field(7);
        assert_eq!(
            fe(&f7, 0).inverse(),
            Err(Error::NotInvertible(BigUint::from(0u8)))
        );
    }

    fn biguint_256bit_strategy() -> impl Strategy<Value = BigUint> {
        prop::array::uniform32(any::<u8>()).prop_map(|bytes| BigUint::from_bytes_be(&bytes))
    }

    proptest! {
        #[test]
        fn prop_inverse_mersenne127(x in biguint_256bit_strategy()) {
            let f = PrimeField::new((BigUint::from(1u8) << 127u32) - 1u32).unwrap();
            let a = f.element(x);
            prop_assume!(!a.is_zero());
            prop_assert_eq!(a.clone().checked_div(&a).unwrap(), f.one());
        }
    }
}
