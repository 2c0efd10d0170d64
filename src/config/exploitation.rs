//! Ranking and rating settings

use rust_decimal::Decimal;
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::digraph::FusionOperator;
use crate::domain::ranking::DEFAULT_CUT_CEILING;
use crate::domain::rating::{IntraClassOrder, SortingMode};

/// Ranking-by-choosing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RankingConfig {
    /// Rank the prudent cut of the relation
    #[serde(default = "default_prudent")]
    pub prudent: bool,

    /// Ceiling of the prudent cut, as a fraction of the domain amplitude
    #[serde(default = "default_cut_ceiling")]
    pub prudent_cut_ceiling: Decimal,

    /// Choose on the codual relation
    #[serde(default)]
    pub codual: bool,

    #[serde(default)]
    pub fusion: FusionOperator,
}

impl RankingConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.prudent_cut_ceiling < Decimal::ZERO || self.prudent_cut_ceiling > Decimal::new(5, 1) {
            return Err(ValidationError::InvalidCutCeiling(self.prudent_cut_ceiling));
        }
        Ok(())
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            prudent: default_prudent(),
            prudent_cut_ceiling: default_cut_ceiling(),
            codual: false,
            fusion: FusionOperator::default(),
        }
    }
}

fn default_prudent() -> bool {
    true
}

fn default_cut_ceiling() -> Decimal {
    DEFAULT_CUT_CEILING
}

/// Rating-by-sorting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RatingConfig {
    /// Number of equal quantile categories
    #[serde(default = "default_categories")]
    pub categories: usize,

    #[serde(default)]
    pub mode: SortingMode,

    #[serde(default)]
    pub order: IntraClassOrder,
}

impl RatingConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.categories == 0 {
            return Err(ValidationError::ZeroCategories);
        }
        Ok(())
    }
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            mode: SortingMode::default(),
            order: IntraClassOrder::default(),
        }
    }
}

fn default_categories() -> usize {
    4
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn ranking_defaults() {
        let config = RankingConfig::default();
        assert!(config.prudent);
        assert_eq!(config.prudent_cut_ceiling, dec!(0.2));
        assert_eq!(config.fusion, FusionOperator::OMin);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn fusion_deserializes_from_its_code() {
        let config: RankingConfig = serde_json::from_str(r#"{"fusion": "o_max", "codual": true}"#).unwrap();
        assert_eq!(config.fusion, FusionOperator::OMax);
        assert!(config.codual);
    }

    #[test]
    fn negative_ceiling_is_rejected() {
        let config = RankingConfig {
            prudent_cut_ceiling: dec!(-0.1),
            ..RankingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rating_needs_categories() {
        let config = RatingConfig {
            categories: 0,
            ..RatingConfig::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::ZeroCategories)));
    }
}
