//! Modular Lagrange interpolation over share points.

use std::collections::HashSet;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::{Error, Result};
use crate::field::PrimeField;
use crate::field_element::FieldElement;
use crate::point::PointBearing;

/// Lagrange coefficients λ_i for the abscissae `xs`, evaluated at `at`.
///
/// # Formula
/// ```text
/// λ_i = ∏_{j ≠ i} (at - x_j) / (x_i - x_j)  (mod p)
/// ```
/// These satisfy ∑ λ_i · f(x_i) = f(at) for any f of degree below `xs.len()`.
pub fn lagrange_coefficients<'a>(
    xs: &[FieldElement<'a>],
    at: &FieldElement<'a>,
) -> Result<Vec<FieldElement<'a>>> {
    let mut output = Vec::with_capacity(xs.len());
    for (i, x_i) in xs.iter().enumerate() {
        let mut num = at.field().one();
        let mut den = at.field().one();
        for (j, x_j) in xs.iter().enumerate() {
            if i == j {
                continue;
            }
            num = num * &(at.clone() - x_j);
            den = den * &(x_i.clone() - x_j);
        }
        let den_inv = den
            .inverse()
            .map_err(|_| Error::DuplicateX(x_i.value().clone()))?;
        output.push(num * &den_inv);
    }
    Ok(output)
}

/// Value at `x` of the lowest-degree polynomial through `shares`, modulo `modulus`.
///
/// With at least k genuine shares of a threshold-k split this is exactly the
/// dealer's polynomial; with fewer the result is some other field element, and
/// nothing here can tell the difference.
pub fn interpolate_at<S: PointBearing>(
    shares: &[S],
    x: &BigUint,
    modulus: &BigUint,
) -> Result<BigUint> {
    if shares.is_empty() {
        return Err(Error::NoShares);
    }
    let field = PrimeField::new(modulus.clone())?;

    let mut seen = HashSet::with_capacity(shares.len());
    let mut xs = Vec::with_capacity(shares.len());
    for share in shares {
        let x_i = field.element(share.point().x().clone());
        if !seen.insert(x_i.value().clone()) {
            return Err(Error::DuplicateX(share.point().x().clone()));
        }
        xs.push(x_i);
    }

    let at = field.element(x.clone());
    let lambdas = lagrange_coefficients(&xs, &at)?;
    let mut value = field.zero();
    for (share, lambda) in shares.iter().zip(&lambdas) {
        let y = field.element(share.point().y().clone());
        value = value + &(y * lambda);
    }
    Ok(value.into_value())
}

/// Recovers f(0), the secret, from shares that were all produced under `modulus`.
pub fn reconstruct<S: PointBearing>(shares: &[S], modulus: &BigUint) -> Result<BigUint> {
    tracing::debug!(
        shares = shares.len(),
        modulus_bits = modulus.bits(),
        "reconstructing secret"
    );
    interpolate_at(shares, &BigUint::zero(), modulus)
}
