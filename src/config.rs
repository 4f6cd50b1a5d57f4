//! Parameters that steer how a split picks its field.

use serde::{Deserialize, Serialize};

/// How the prime modulus is chosen above its lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimeStrategy {
    /// Smallest prime strictly greater than the bound. Reproducible from the bound alone.
    Incremental,
    /// First prime at or after a uniformly random start in `(bound, 2·bound + 2)`.
    #[default]
    Randomized,
}

/// Split-time configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    pub prime_strategy: PrimeStrategy,
    /// The modulus always exceeds `2^modulus_floor_bits`.
    pub modulus_floor_bits: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            prime_strategy: PrimeStrategy::default(),
            modulus_floor_bits: 0,
        }
    }
}

impl SplitConfig {
    pub fn incremental() -> Self {
        Self {
            prime_strategy: PrimeStrategy::Incremental,
            ..Self::default()
        }
    }

    pub fn with_floor_bits(mut self, bits: u64) -> Self {
        self.modulus_floor_bits = bits;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_randomized_without_floor() {
        let config = SplitConfig::default();
        assert_eq!(config.prime_strategy, PrimeStrategy::Randomized);
        assert_eq!(config.modulus_floor_bits, 0);
    }

    #[test]
    fn builders_compose() {
        let config = SplitConfig::incremental().with_floor_bits(128);
        assert_eq!(config.prime_strategy, PrimeStrategy::Incremental);
        assert_eq!(config.modulus_floor_bits, 128);
    }
}
