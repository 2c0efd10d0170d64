//! Outranking construction settings

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::outranking::{OutrankingStrategy, StochasticSettings, WeightDistribution};

/// Construction variant selected by configuration
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Electre3,
    #[default]
    Bipolar,
    BipolarInteger,
    Median,
    Stochastic,
    Robust,
}

/// Outranking construction configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutrankingConfig {
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Quantile of the median variant
    #[serde(default = "default_median_quantile")]
    pub median_quantile: Decimal,
}

impl OutrankingConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.median_quantile < Decimal::ZERO || self.median_quantile > Decimal::ONE {
            return Err(ValidationError::InvalidQuantile(self.median_quantile));
        }
        Ok(())
    }

    /// Strategy value consumed by the outranking constructor.
    pub fn strategy(&self, stochastic: &StochasticConfig) -> OutrankingStrategy {
        match self.strategy {
            StrategyKind::Electre3 => OutrankingStrategy::Electre3,
            StrategyKind::Bipolar => OutrankingStrategy::BipolarStandard,
            StrategyKind::BipolarInteger => OutrankingStrategy::BipolarInteger,
            StrategyKind::Median => OutrankingStrategy::Median {
                quantile: self.median_quantile,
            },
            StrategyKind::Stochastic => OutrankingStrategy::Stochastic(stochastic.settings()),
            StrategyKind::Robust => OutrankingStrategy::Robust,
        }
    }
}

impl Default for OutrankingConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            median_quantile: default_median_quantile(),
        }
    }
}

fn default_median_quantile() -> Decimal {
    dec!(0.5)
}

/// Weight sampling of the stochastic variant
#[derive(Debug, Clone, Deserialize)]
pub struct StochasticConfig {
    #[serde(default = "default_samples")]
    pub samples: usize,

    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Pairs whose sign likelihood stays below `1 - error_level` become Med
    #[serde(default = "default_error_level")]
    pub error_level: Decimal,

    #[serde(default)]
    pub distribution: WeightDistribution,
}

impl StochasticConfig {
    pub fn settings(&self) -> StochasticSettings {
        StochasticSettings {
            distribution: self.distribution,
            samples: self.samples,
            seed: self.seed,
            error_level: self.error_level,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.samples == 0 {
            return Err(ValidationError::ZeroSamples);
        }
        if self.error_level < Decimal::ZERO || self.error_level >= dec!(0.5) {
            return Err(ValidationError::InvalidErrorLevel(self.error_level));
        }
        Ok(())
    }
}

impl Default for StochasticConfig {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            seed: default_seed(),
            error_level: default_error_level(),
            distribution: WeightDistribution::default(),
        }
    }
}

fn default_samples() -> usize {
    100
}

fn default_seed() -> u64 {
    1
}

fn default_error_level() -> Decimal {
    dec!(0.1)
}
