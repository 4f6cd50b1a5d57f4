//! Alphabets that turn text secrets into integers and back.
//!
//! A string is read as a numeral in base `b = alphabet size`, most significant
//! symbol first. Digits run from 1 to b (bijective numeration) rather than 0 to b-1,
//! so a leading first-symbol is never swallowed and a one-symbol alphabet still works.
//! The empty string encodes to 0.

use std::collections::HashMap;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const PRINTABLE_FIRST: u8 = 0x20;
const PRINTABLE_LAST: u8 = 0x7e;

/// Longest text, in symbols, that [`Charset::decode`] will produce.
pub const MAX_DECODED_LEN: usize = 1 << 20;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Charset {
    symbols: Vec<char>,
    index: HashMap<char, usize>,
}

impl Charset {
    /// Printable ASCII, space through tilde (base 95).
    pub fn printable() -> Self {
        let symbols = (PRINTABLE_FIRST..=PRINTABLE_LAST).map(char::from).collect();
        Self::indexed(symbols)
    }

    /// Exactly the characters of `text`, in order of first occurrence.
    pub fn derive(text: &str) -> Result<Self> {
        let mut symbols = Vec::new();
        let mut index = HashMap::new();
        for c in text.chars() {
            if !index.contains_key(&c) {
                index.insert(c, symbols.len());
                symbols.push(c);
            }
        }
        if symbols.is_empty() {
            return Err(Error::EmptyAlphabet);
        }
        Ok(Self { symbols, index })
    }

    /// Builds an alphabet from an explicit ordered list; symbols must be unique.
    pub fn from_symbols<I: IntoIterator<Item = char>>(symbols: I) -> Result<Self> {
        let symbols: Vec<char> = symbols.into_iter().collect();
        if symbols.is_empty() {
            return Err(Error::EmptyAlphabet);
        }
        let mut index = HashMap::with_capacity(symbols.len());
        for (i, &c) in symbols.iter().enumerate() {
            if index.insert(c, i).is_some() {
                return Err(Error::DuplicateSymbol(c));
            }
        }
        Ok(Self { symbols, index })
    }

    /// Inverse of [`Charset::representation`].
    pub fn from_representation(representation: &str) -> Result<Self> {
        Self::from_symbols(representation.chars())
    }

    /// The alphabet as a plain string of its symbols, in order.
    pub fn representation(&self) -> String {
        self.symbols.iter().collect()
    }

    fn indexed(symbols: Vec<char>) -> Self {
        let index = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self { symbols, index }
    }

    pub fn base(&self) -> usize {
        self.symbols.len()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn index_of(&self, c: char) -> Result<usize> {
        self.index.get(&c).copied().ok_or(Error::UnknownCharacter(c))
    }

    pub fn symbol(&self, digit: usize) -> Result<char> {
        self.symbols
            .get(digit)
            .copied()
            .ok_or(Error::DigitOutOfRange {
                digit,
                base: self.base(),
            })
    }

    pub fn encode(&self, text: &str) -> Result<BigUint> {
        let base = BigUint::from(self.base());
        let mut value = BigUint::zero();
        for c in text.chars() {
            let digit = self.index_of(c)? + 1;
            value = value * &base + digit;
        }
        Ok(value)
    }

    /// Inverse of [`Charset::encode`].
    ///
    /// Refuses values whose text would exceed [`MAX_DECODED_LEN`] symbols before
    /// building anything. Remainders of the bijective division are always below the
    /// base, so a digit past the alphabet can only reach [`Charset::symbol`] directly.
    pub fn decode(&self, value: &BigUint) -> Result<String> {
        let too_long = Error::DecodedTooLong {
            limit: MAX_DECODED_LEN,
        };
        if self.base() == 1 {
            // every digit is 1, so the value is the length
            let len = value
                .to_usize()
                .filter(|&len| len <= MAX_DECODED_LEN)
                .ok_or(too_long)?;
            let symbol = self.symbol(0)?;
            return Ok(std::iter::repeat(symbol).take(len).collect());
        }

        // value < b^(len+1), so len >= (bits - 1) / ceil(log2 b) - 1
        let digit_bits = u64::from(usize::BITS - (self.base() - 1).leading_zeros());
        let min_len = (value.bits().saturating_sub(1) / digit_bits).saturating_sub(1);
        if min_len > MAX_DECODED_LEN as u64 {
            return Err(too_long);
        }

        let base = BigUint::from(self.base());
        let mut rest = value.clone();
        let mut reversed = Vec::new();
        while !rest.is_zero() {
            if reversed.len() == MAX_DECODED_LEN {
                return Err(too_long);
            }
            rest -= 1u32;
            let (quotient, remainder) = rest.div_rem(&base);
            let digit = remainder
                .to_usize()
                .ok_or_else(|| Error::DigitOutOfRange {
                    digit: self.base(),
                    base: self.base(),
                })?;
            reversed.push(self.symbol(digit)?);
            rest = quotient;
        }
        Ok(reversed.into_iter().rev().collect())
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self::printable()
    }
}

impl From<Charset> for String {
    fn from(charset: Charset) -> Self {
        charset.representation()
    }
}

impl TryFrom<String> for Charset {
    type Error = Error;

    fn try_from(representation: String) -> Result<Self> {
        Self::from_representation(&representation)
    }
}
