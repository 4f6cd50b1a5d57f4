//! Threshold secret splitting over prime fields of arbitrary size.
//!
//! A secret integer becomes the constant term of a random polynomial of degree
//! k-1 modulo a prime p > secret; shares are its values at x = 1..=n, and any k
//! of them give the secret back through Lagrange interpolation at zero. Text is
//! lifted into integers through a [`Charset`].
//!
//! ```
//! use num_bigint::BigUint;
//! use shamir_charset::{split, BigRandom};
//!
//! let mut rng = BigRandom::from_thread();
//! let secret = BigUint::from(900_000_000_000_000u64);
//! let shares = split(&secret, 2, 3, &mut rng).unwrap();
//! assert_eq!(shares.subset(&[0, 2]).reconstruct().unwrap(), secret);
//! ```
//!
//! The default random source is not meant for protecting real secrets; wrap an
//! OS-backed generator in [`BigRandom::new`] for that.

pub mod charset;
pub mod config;
pub mod error;
pub mod field;
mod field_element;
pub mod lagrange;
pub mod point;
pub mod polynomial;
pub mod prime;
pub mod random;
pub mod sharing;

pub use charset::Charset;
pub use config::{PrimeStrategy, SplitConfig};
pub use error::{Error, Result};
pub use field_element::FieldElement;
pub use lagrange::{interpolate_at, reconstruct};
pub use point::{Point, PointBearing};
pub use polynomial::SecretPolynomial;
pub use random::BigRandom;
pub use sharing::{
    charset_decode, charset_encode, derive_alphabet, reconstruct_text, split, split_text,
    split_text_with_config, split_with_config, ShareSet, TextShare,
};
