//! Precision and enumeration limits

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::circuits::DEFAULT_CIRCUIT_CAP;
use crate::domain::foundation::Precision;
use crate::domain::kernels::DEFAULT_STEP_BUDGET;

/// Decimal precision of credibility arithmetic
#[derive(Debug, Clone, Deserialize)]
pub struct PrecisionConfig {
    /// Decimal places kept after each division (banker's rounding)
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

impl PrecisionConfig {
    pub fn precision(&self) -> Precision {
        Precision::new(self.decimal_places)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.decimal_places > Precision::MAX_PLACES {
            return Err(ValidationError::PrecisionTooLarge(self.decimal_places));
        }
        Ok(())
    }
}

impl Default for PrecisionConfig {
    fn default() -> Self {
        Self {
            decimal_places: default_decimal_places(),
        }
    }
}

fn default_decimal_places() -> u32 {
    Precision::DEFAULT_PLACES
}

/// Chordless circuit enumeration limits
#[derive(Debug, Clone, Deserialize)]
pub struct CircuitsConfig {
    #[serde(default = "default_enumeration_cap")]
    pub enumeration_cap: usize,
}

impl CircuitsConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.enumeration_cap == 0 {
            return Err(ValidationError::ZeroCircuitCap);
        }
        Ok(())
    }
}

impl Default for CircuitsConfig {
    fn default() -> Self {
        Self {
            enumeration_cap: default_enumeration_cap(),
        }
    }
}

fn default_enumeration_cap() -> usize {
    DEFAULT_CIRCUIT_CAP
}

/// Kernel enumeration limits
#[derive(Debug, Clone, Deserialize)]
pub struct KernelsConfig {
    /// Branch steps allowed per weak component
    #[serde(default = "default_step_budget")]
    pub step_budget: u64,
}

impl KernelsConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.step_budget == 0 {
            return Err(ValidationError::ZeroStepBudget);
        }
        Ok(())
    }
}

impl Default for KernelsConfig {
    fn default() -> Self {
        Self {
            step_budget: default_step_budget(),
        }
    }
}

fn default_step_budget() -> u64 {
    DEFAULT_STEP_BUDGET
}
