//! Outranking construction variants.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::ConcordanceKind;
use crate::domain::foundation::OutrankingError;

/// Distribution of sampled weights around the given weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightDistribution {
    /// Uniform on [0, 2w].
    Uniform,
    /// Symmetric triangular on [0, 2w] with mode w.
    #[default]
    Triangular,
    /// Beta(2, 2) stretched onto [0, 2w].
    Beta,
}

/// Parameters of the stochastic outranking variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StochasticSettings {
    pub distribution: WeightDistribution,
    pub samples: usize,
    pub seed: u64,
    /// Pairs whose sign likelihood falls below `1 - error_level` become Med.
    pub error_level: Decimal,
}

impl StochasticSettings {
    /// Checks sample count and error level.
    pub fn validate(&self) -> Result<(), OutrankingError> {
        if self.samples == 0 {
            return Err(OutrankingError::invalid_tableau(
                "stochastic outranking needs at least one sample",
            ));
        }
        if self.error_level < Decimal::ZERO || self.error_level >= dec!(0.5) {
            return Err(OutrankingError::invalid_tableau(format!(
                "error level {} outside [0, 0.5)",
                self.error_level
            )));
        }
        Ok(())
    }
}

impl Default for StochasticSettings {
    fn default() -> Self {
        Self {
            distribution: WeightDistribution::Triangular,
            samples: 100,
            seed: 1,
            error_level: dec!(0.1),
        }
    }
}

/// How pairwise credibilities are aggregated from local characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum OutrankingStrategy {
    /// Unipolar concordance with multiplicative veto discounting.
    Electre3,
    /// Bipolar concordance with vetoes and counter-vetoes on (-1, 0, +1).
    #[default]
    BipolarStandard,
    /// Bipolar concordance on the integer domain (-W, 0, +W).
    BipolarInteger,
    /// Weighted quantile of local characteristics, bounded by vetoes.
    Median { quantile: Decimal },
    /// Median over sampled weight vectors, cut by sign likelihood.
    Stochastic(StochasticSettings),
    /// Unanimous, ordinal and cardinal evidence on (-3, 0, +3).
    Robust,
}

impl OutrankingStrategy {
    /// Local concordance semantics used by this strategy.
    pub fn concordance_kind(&self) -> ConcordanceKind {
        match self {
            OutrankingStrategy::Electre3 => ConcordanceKind::Electre3,
            _ => ConcordanceKind::Bipolar,
        }
    }

    /// Short name used in digraph names and logs.
    pub fn label(&self) -> &'static str {
        match self {
            OutrankingStrategy::Electre3 => "electre3",
            OutrankingStrategy::BipolarStandard => "bipolar",
            OutrankingStrategy::BipolarInteger => "bipolar-integer",
            OutrankingStrategy::Median { .. } => "median",
            OutrankingStrategy::Stochastic(_) => "stochastic",
            OutrankingStrategy::Robust => "robust",
        }
    }

    /// Checks strategy parameters.
    pub fn validate(&self) -> Result<(), OutrankingError> {
        match self {
            OutrankingStrategy::Median { quantile } => {
                if *quantile < Decimal::ZERO || *quantile > Decimal::ONE {
                    return Err(OutrankingError::invalid_tableau(format!(
                        "quantile {} outside [0, 1]",
                        quantile
                    )));
                }
                Ok(())
            }
            OutrankingStrategy::Stochastic(settings) => settings.validate(),
            _ => Ok(()),
        }
    }
}
