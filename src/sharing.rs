//! Split and reconstruct integer and text secrets.
//!
//! The modulus is never re-derived from the shares: every split returns it inside
//! the [`ShareSet`], and whoever stores or ships shares must keep it alongside.

use num_bigint::BigUint;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::charset::Charset;
use crate::config::SplitConfig;
use crate::error::{Error, Result};
use crate::lagrange;
use crate::point::{Point, PointBearing};
use crate::polynomial::{check_threshold, SecretPolynomial};
use crate::random::BigRandom;

pub use crate::lagrange::reconstruct;

/// The output of one split: the shares plus what is needed to combine them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareSet<S = Point> {
    modulus: BigUint,
    threshold: usize,
    shares: Vec<S>,
}

impl<S> ShareSet<S> {
    pub fn new(modulus: BigUint, threshold: usize, shares: Vec<S>) -> Self {
        Self {
            modulus,
            threshold,
            shares,
        }
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn shares(&self) -> &[S] {
        &self.shares
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn into_shares(self) -> Vec<S> {
        self.shares
    }

    /// Same modulus and threshold, keeping only the shares at `indices`.
    /// Out-of-range indices are skipped.
    pub fn subset(&self, indices: &[usize]) -> Self
    where
        S: Clone,
    {
        let shares = indices
            .iter()
            .filter_map(|&i| self.shares.get(i).cloned())
            .collect();
        Self::new(self.modulus.clone(), self.threshold, shares)
    }

    pub fn map<T, F: FnMut(S) -> T>(self, f: F) -> ShareSet<T> {
        ShareSet {
            modulus: self.modulus,
            threshold: self.threshold,
            shares: self.shares.into_iter().map(f).collect(),
        }
    }
}

impl<S: PointBearing> ShareSet<S> {
    /// Recovers the secret, refusing outright when fewer than `threshold` shares remain.
    pub fn reconstruct(&self) -> Result<BigUint> {
        if self.shares.len() < self.threshold {
            return Err(Error::NotEnoughShares {
                threshold: self.threshold,
                share_count: self.shares.len(),
            });
        }
        lagrange::reconstruct(&self.shares, &self.modulus)
    }
}

impl ShareSet<TextShare> {
    pub fn reconstruct_text(&self) -> Result<String> {
        if self.shares.len() < self.threshold {
            return Err(Error::NotEnoughShares {
                threshold: self.threshold,
                share_count: self.shares.len(),
            });
        }
        reconstruct_text(&self.shares, &self.modulus)
    }
}

/// A share of a text secret: the point plus the alphabet needed to read it back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextShare {
    point: Point,
    charset: Charset,
}

impl TextShare {
    pub fn new(point: Point, charset: Charset) -> Self {
        Self { point, charset }
    }

    pub fn charset(&self) -> &Charset {
        &self.charset
    }
}

impl PointBearing for TextShare {
    fn point(&self) -> &Point {
        &self.point
    }
}

/// Splits `secret` into `share_count` shares, any `threshold` of which recover it.
pub fn split<R: RngCore>(
    secret: &BigUint,
    threshold: usize,
    share_count: usize,
    rng: &mut BigRandom<R>,
) -> Result<ShareSet<Point>> {
    split_with_config(secret, threshold, share_count, &SplitConfig::default(), rng)
}

pub fn split_with_config<R: RngCore>(
    secret: &BigUint,
    threshold: usize,
    share_count: usize,
    config: &SplitConfig,
    rng: &mut BigRandom<R>,
) -> Result<ShareSet<Point>> {
    check_threshold(threshold)?;
    if share_count < threshold {
        return Err(Error::NotEnoughShares {
            threshold,
            share_count,
        });
    }
    tracing::debug!(threshold, share_count, strategy = ?config.prime_strategy, "splitting secret");

    // x runs over 1..=share_count, so p must exceed it as well as the secret
    let bound = BigUint::from(share_count);
    let polynomial = SecretPolynomial::above(secret, threshold, &bound, config, rng)?;
    let shares = polynomial.into_shares(share_count)?;

    tracing::debug!(modulus_bits = shares.modulus().bits(), "secret split");
    Ok(shares)
}

/// Encodes `text` with `charset` and splits the resulting integer.
pub fn split_text<R: RngCore>(
    text: &str,
    charset: &Charset,
    threshold: usize,
    share_count: usize,
    rng: &mut BigRandom<R>,
) -> Result<ShareSet<TextShare>> {
    split_text_with_config(
        text,
        charset,
        threshold,
        share_count,
        &SplitConfig::default(),
        rng,
    )
}

pub fn split_text_with_config<R: RngCore>(
    text: &str,
    charset: &Charset,
    threshold: usize,
    share_count: usize,
    config: &SplitConfig,
    rng: &mut BigRandom<R>,
) -> Result<ShareSet<TextShare>> {
    let secret = charset.encode(text)?;
    let shares = split_with_config(&secret, threshold, share_count, config, rng)?;
    Ok(shares.map(|point| TextShare::new(point, charset.clone())))
}

/// Recovers a text secret; all shares must carry the same alphabet.
pub fn reconstruct_text(shares: &[TextShare], modulus: &BigUint) -> Result<String> {
    let first = shares.first().ok_or(Error::NoShares)?;
    if shares.iter().any(|share| share.charset != first.charset) {
        return Err(Error::MixedAlphabets);
    }
    let secret = lagrange::reconstruct(shares, modulus)?;
    first.charset.decode(&secret)
}

pub fn charset_encode(text: &str, alphabet: &Charset) -> Result<BigUint> {
    alphabet.encode(text)
}

pub fn charset_decode(value: &BigUint, alphabet: &Charset) -> Result<String> {
    alphabet.decode(value)
}

/// The smallest alphabet able to spell `text`.
pub fn derive_alphabet(text: &str) -> Result<Charset> {
    Charset::derive(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PrimeStrategy;
    use crate::prime::is_probable_prime;
    use proptest::prelude::*;

    fn b(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn split_then_reconstruct_every_pair() {
        let mut rng = BigRandom::seeded(21);
        let secret = b(900_000_000_000_000);
        let shares = split(&secret, 2, 3, &mut rng).unwrap();
        assert_eq!(shares.len(), 3);
        assert!(is_probable_prime(shares.modulus()));
        assert!(shares.modulus() > &secret);
        for pair in [[0, 1], [0, 2], [1, 2], [2, 0]] {
            assert_eq!(shares.subset(&pair).reconstruct().unwrap(), secret);
        }
    }

    #[test]
    fn x_coordinates_run_from_one() {
        let mut rng = BigRandom::seeded(22);
        let shares = split(&b(5), 3, 6, &mut rng).unwrap();
        let xs: Vec<BigUint> = shares.shares().iter().map(|p| p.x().clone()).collect();
        assert_eq!(xs, (1..=6u64).map(b).collect::<Vec<_>>());
    }

    #[test]
    fn modulus_exceeds_share_count_for_tiny_secrets() {
        let mut rng = BigRandom::seeded(23);
        let config = SplitConfig::incremental();
        let shares = split_with_config(&b(0), 2, 10, &config, &mut rng).unwrap();
        assert_eq!(shares.modulus(), &b(11));
        assert_eq!(shares.subset(&[3, 9]).reconstruct().unwrap(), b(0));
    }

    #[test]
    fn configuration_errors_come_first() {
        let mut rng = BigRandom::seeded(24);
        assert_eq!(
            split(&b(1), 1, 3, &mut rng),
            Err(Error::ThresholdTooSmall(1))
        );
        assert_eq!(
            split(&b(1), 4, 3, &mut rng),
            Err(Error::NotEnoughShares {
                threshold: 4,
                share_count: 3
            })
        );
    }

    #[test]
    fn share_set_refuses_short_input() {
        let mut rng = BigRandom::seeded(25);
        let shares = split(&b(77), 3, 5, &mut rng).unwrap();
        assert_eq!(
            shares.subset(&[0, 4]).reconstruct(),
            Err(Error::NotEnoughShares {
                threshold: 3,
                share_count: 2
            })
        );
        // out-of-range indices are dropped
        assert_eq!(shares.subset(&[0, 9]).len(), 1);
    }

    #[test]
    fn text_round_trip_with_default_alphabet() {
        let mut rng = BigRandom::seeded(26);
        let shares = split_text("Test", &Charset::default(), 2, 3, &mut rng).unwrap();
        for pair in [[0, 1], [1, 2], [0, 2]] {
            assert_eq!(shares.subset(&pair).reconstruct_text().unwrap(), "Test");
        }
    }

    #[test]
    fn text_shares_must_agree_on_alphabet() {
        let mut rng = BigRandom::seeded(27);
        let shares = split_text("abc", &derive_alphabet("abc").unwrap(), 2, 3, &mut rng).unwrap();
        let mut mixed = shares.clone().into_shares();
        mixed[1] = TextShare::new(mixed[1].point().clone(), derive_alphabet("cba").unwrap());
        assert_eq!(
            reconstruct_text(&mixed, shares.modulus()),
            Err(Error::MixedAlphabets)
        );
        assert_eq!(reconstruct_text(&[], shares.modulus()), Err(Error::NoShares));
    }

    #[test]
    fn text_with_unknown_character_is_rejected() {
        let mut rng = BigRandom::seeded(28);
        assert_eq!(
            split_text("héllo", &Charset::printable(), 2, 3, &mut rng),
            Err(Error::UnknownCharacter('é'))
        );
    }

    #[test]
    fn short_text_gets_a_wide_modulus_from_config() {
        let mut rng = BigRandom::seeded(29);
        let alphabet = derive_alphabet("a").unwrap();
        let config = SplitConfig::incremental().with_floor_bits(64);
        let shares = split_text_with_config("a", &alphabet, 3, 5, &config, &mut rng).unwrap();
        assert!(shares.modulus() > &(b(1) << 64u32));
        assert!(is_probable_prime(shares.modulus()));
        assert_eq!(shares.subset(&[0, 2, 4]).reconstruct_text().unwrap(), "a");

        // below threshold the interpolated value is noise far past any sane length
        assert_eq!(
            reconstruct_text(&shares.clone().into_shares()[..2], shares.modulus()),
            Err(Error::DecodedTooLong {
                limit: crate::charset::MAX_DECODED_LEN
            })
        );
    }

    #[test]
    fn helpers_delegate_to_charset() {
        let alphabet = derive_alphabet("hello").unwrap();
        let n = charset_encode("hole", &alphabet).unwrap();
        assert_eq!(charset_decode(&n, &alphabet).unwrap(), "hole");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn any_threshold_subset_recovers(
            secret in any::<u128>(),
            threshold in 2usize..6,
            extra in 0usize..4,
            seed in any::<u64>(),
            incremental in any::<bool>(),
        ) {
            let share_count = threshold + extra;
            let config = if incremental {
                SplitConfig::incremental()
            } else {
                SplitConfig { prime_strategy: PrimeStrategy::Randomized, modulus_floor_bits: 0 }
            };
            let mut rng = BigRandom::seeded(seed);
            let secret = BigUint::from(secret);
            let shares = split_with_config(&secret, threshold, share_count, &config, &mut rng).unwrap();

            // last `threshold` shares, reversed
            let picked: Vec<usize> = (extra..share_count).rev().collect();
            prop_assert_eq!(shares.subset(&picked).reconstruct().unwrap(), secret.clone());
            // first `threshold` shares
            let picked: Vec<usize> = (0..threshold).collect();
            prop_assert_eq!(shares.subset(&picked).reconstruct().unwrap(), secret);
        }
    }
}
