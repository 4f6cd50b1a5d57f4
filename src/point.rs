use std::fmt;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// One share: the secret polynomial evaluated at `x`, i.e. `y = f(x) mod p`.
///
/// A point says nothing about the modulus it was computed under; that travels
/// separately in [`ShareSet`](crate::sharing::ShareSet).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    x: BigUint,
    y: BigUint,
}

impl Point {
    pub fn new(x: BigUint, y: BigUint) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> &BigUint {
        &self.x
    }

    pub fn y(&self) -> &BigUint {
        &self.y
    }

    pub fn into_parts(self) -> (BigUint, BigUint) {
        (self.x, self.y)
    }
}

impl From<(u64, u64)> for Point {
    fn from((x, y): (u64, u64)) -> Self {
        Self::new(BigUint::from(x), BigUint::from(y))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Anything that carries a share point. Reconstruction only needs this.
pub trait PointBearing {
    fn point(&self) -> &Point;
}

impl PointBearing for Point {
    fn point(&self) -> &Point {
        self
    }
}

impl<T: PointBearing + ?Sized> PointBearing for &T {
    fn point(&self) -> &Point {
        (**self).point()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_coordinates() {
        assert_eq!(Point::from((1, 5)), Point::new(BigUint::from(1u8), BigUint::from(5u8)));
        assert_ne!(Point::from((1, 5)), Point::from((5, 1)));
    }

    #[test]
    fn display_and_parts() {
        let p = Point::from((3, 900_000_000_000_000));
        assert_eq!(p.to_string(), "(3, 900000000000000)");
        let (x, y) = p.into_parts();
        assert_eq!(x, BigUint::from(3u8));
        assert_eq!(y, BigUint::from(900_000_000_000_000u64));
    }

    #[test]
    fn references_bear_points() {
        let p = Point::from((2, 7));
        let r = &p;
        assert_eq!(PointBearing::point(&r), &p);
    }
}
