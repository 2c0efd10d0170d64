//! Analysis configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `BIPOLAR_OUTRANKING`
//! prefix and `__` between nested keys; every value has a default.
//!
//! # Example
//!
//! ```no_run
//! use bipolar_outranking::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Ranking with {:?}", config.strategy());
//! ```

mod engine;
mod error;
mod exploitation;
mod logging;
mod outranking;

pub use engine::{CircuitsConfig, KernelsConfig, PrecisionConfig};
pub use error::{ConfigError, ValidationError};
pub use exploitation::{RankingConfig, RatingConfig};
pub use logging::LoggingConfig;
pub use outranking::{OutrankingConfig, StochasticConfig, StrategyKind};

use serde::Deserialize;

use crate::domain::foundation::ComputeContext;
use crate::domain::outranking::OutrankingStrategy;
use crate::domain::ranking::RankingSettings;
use crate::domain::rating::SortingSettings;

/// Root analysis configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub precision: PrecisionConfig,

    #[serde(default)]
    pub outranking: OutrankingConfig,

    #[serde(default)]
    pub circuits: CircuitsConfig,

    #[serde(default)]
    pub kernels: KernelsConfig,

    #[serde(default)]
    pub ranking: RankingConfig,

    #[serde(default)]
    pub rating: RatingConfig,

    #[serde(default)]
    pub stochastic: StochasticConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AnalysisConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present
    /// 2. Reads environment variables with `BIPOLAR_OUTRANKING` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// - `BIPOLAR_OUTRANKING__KERNELS__STEP_BUDGET=5000` -> `kernels.step_budget = 5000`
    /// - `BIPOLAR_OUTRANKING__OUTRANKING__STRATEGY=robust` -> `outranking.strategy = robust`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("BIPOLAR_OUTRANKING")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.precision.validate()?;
        self.outranking.validate()?;
        self.circuits.validate()?;
        self.kernels.validate()?;
        self.ranking.validate()?;
        self.rating.validate()?;
        self.stochastic.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Context carrying the configured precision.
    pub fn compute_context(&self) -> ComputeContext {
        ComputeContext::new(self.precision.precision())
    }

    /// Configured outranking construction variant.
    pub fn strategy(&self) -> OutrankingStrategy {
        self.outranking.strategy(&self.stochastic)
    }

    pub fn ranking_settings(&self) -> RankingSettings {
        RankingSettings {
            codual: self.ranking.codual,
            fusion: self.ranking.fusion,
            circuit_cap: self.circuits.enumeration_cap,
            step_budget: self.kernels.step_budget,
        }
    }

    pub fn sorting_settings(&self) -> SortingSettings {
        SortingSettings {
            categories: self.rating.categories,
            mode: self.rating.mode,
            order: self.rating.order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::digraph::FusionOperator;
    use crate::domain::outranking::WeightDistribution;
    use crate::domain::rating::SortingMode;
    use rust_decimal_macros::dec;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 7] = [
        "BIPOLAR_OUTRANKING__PRECISION__DECIMAL_PLACES",
        "BIPOLAR_OUTRANKING__OUTRANKING__STRATEGY",
        "BIPOLAR_OUTRANKING__KERNELS__STEP_BUDGET",
        "BIPOLAR_OUTRANKING__RANKING__FUSION",
        "BIPOLAR_OUTRANKING__RATING__MODE",
        "BIPOLAR_OUTRANKING__STOCHASTIC__DISTRIBUTION",
        "BIPOLAR_OUTRANKING__STOCHASTIC__ERROR_LEVEL",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_defaults_without_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AnalysisConfig::load().unwrap();

        assert_eq!(config.precision.decimal_places, 9);
        assert_eq!(config.strategy(), OutrankingStrategy::BipolarStandard);
        assert_eq!(config.ranking_settings(), RankingSettings::default());
        assert_eq!(config.logging.filter, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("BIPOLAR_OUTRANKING__PRECISION__DECIMAL_PLACES", "4");
        env::set_var("BIPOLAR_OUTRANKING__OUTRANKING__STRATEGY", "stochastic");
        env::set_var("BIPOLAR_OUTRANKING__KERNELS__STEP_BUDGET", "5000");
        env::set_var("BIPOLAR_OUTRANKING__RANKING__FUSION", "o_max");
        env::set_var("BIPOLAR_OUTRANKING__RATING__MODE", "upper_closed");
        env::set_var("BIPOLAR_OUTRANKING__STOCHASTIC__DISTRIBUTION", "beta");
        let result = AnalysisConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.compute_context().precision.decimal_places(), 4);
        assert_eq!(config.kernels.step_budget, 5000);
        assert_eq!(config.ranking_settings().fusion, FusionOperator::OMax);
        assert_eq!(config.sorting_settings().mode, SortingMode::UpperClosed);
        match config.strategy() {
            OutrankingStrategy::Stochastic(settings) => {
                assert_eq!(settings.distribution, WeightDistribution::Beta);
                assert_eq!(settings.samples, 100);
            }
            other => panic!("unexpected strategy {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_bad_error_level() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("BIPOLAR_OUTRANKING__STOCHASTIC__ERROR_LEVEL", "0.7");
        let result = AnalysisConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.stochastic.error_level, dec!(0.7));
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidErrorLevel(_))
        ));
    }
}
