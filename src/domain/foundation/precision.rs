//! Fixed decimal precision policy for credibility arithmetic.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places kept after every division, rounded half-to-even.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Precision(u32);

impl Precision {
    /// Default number of kept decimal places.
    pub const DEFAULT_PLACES: u32 = 9;

    /// Largest scale supported by the decimal representation.
    pub const MAX_PLACES: u32 = 28;

    /// Creates a precision policy, clamping to the supported scale.
    pub fn new(decimal_places: u32) -> Self {
        Self(decimal_places.min(Self::MAX_PLACES))
    }

    /// Returns the number of kept decimal places.
    pub fn decimal_places(&self) -> u32 {
        self.0
    }

    /// Rounds a value with banker's rounding.
    pub fn round(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.0, RoundingStrategy::MidpointNearestEven)
    }

    /// Divides and rounds; a zero divisor yields zero.
    pub fn divide(&self, numerator: Decimal, denominator: Decimal) -> Decimal {
        if denominator.is_zero() {
            return Decimal::ZERO;
        }
        self.round(numerator / denominator)
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self(Self::DEFAULT_PLACES)
    }
}
