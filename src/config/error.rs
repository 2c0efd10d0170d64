//! Configuration error types

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Decimal places {0} exceed the supported maximum of 28")]
    PrecisionTooLarge(u32),

    #[error("Circuit enumeration cap must be positive")]
    ZeroCircuitCap,

    #[error("Kernel step budget must be positive")]
    ZeroStepBudget,

    #[error("Prudent cut ceiling {0} outside [0, 0.5]")]
    InvalidCutCeiling(Decimal),

    #[error("Median quantile {0} outside [0, 1]")]
    InvalidQuantile(Decimal),

    #[error("Stochastic sample count must be positive")]
    ZeroSamples,

    #[error("Stochastic error level {0} outside [0, 0.5)")]
    InvalidErrorLevel(Decimal),

    #[error("Rating needs at least one category")]
    ZeroCategories,

    #[error("Invalid log filter directive: {0}")]
    InvalidLogFilter(String),
}
