use num_bigint::{BigInt, BigUint};
use thiserror::Error;

/// Errors raised while splitting, reconstructing or encoding secrets.
///
/// Every variant except [`Error::DuplicateX`] is an invalid-argument failure;
/// duplicate x-coordinates make the interpolation itself ill-posed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("random bound must be non-negative, got {0}")]
    NegativeBound(BigInt),

    #[error("random range [{min}, {max}) is empty")]
    EmptyRange { min: BigInt, max: BigInt },

    #[error("cannot draw {count} distinct values from a range of size {available}")]
    SetTooLarge { count: usize, available: BigInt },

    #[error("threshold must be at least 2, got {0}")]
    ThresholdTooSmall(usize),

    #[error("share count {share_count} is below the threshold {threshold}")]
    NotEnoughShares { threshold: usize, share_count: usize },

    #[error("modulus {0} is not prime")]
    NonPrimeModulus(BigUint),

    #[error("modulus {modulus} does not exceed {bound}")]
    ModulusTooSmall { modulus: BigUint, bound: BigUint },

    #[error("character {0:?} is not in the alphabet")]
    UnknownCharacter(char),

    #[error("digit {digit} is out of range for base {base}")]
    DigitOutOfRange { digit: usize, base: usize },

    #[error("alphabet must contain at least one symbol")]
    EmptyAlphabet,

    #[error("alphabet repeats symbol {0:?}")]
    DuplicateSymbol(char),

    #[error("decoded text would exceed {limit} symbols")]
    DecodedTooLong { limit: usize },

    #[error("shares were encoded under different alphabets")]
    MixedAlphabets,

    #[error("no shares supplied")]
    NoShares,

    #[error("{0} has no inverse modulo the field prime")]
    NotInvertible(BigUint),

    #[error("duplicate x-coordinate {0} among shares")]
    DuplicateX(BigUint),
}

impl Error {
    /// True when the failure comes from an ill-posed interpolation rather than a bad argument.
    pub fn is_ill_posed(&self) -> bool {
        matches!(self, Error::DuplicateX(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
