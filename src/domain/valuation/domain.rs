//! Bipolar valuation domain value object.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{OutrankingError, Precision};

/// Serialized form of a valuation domain, validated on conversion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DomainTriple {
    min: Decimal,
    med: Decimal,
    max: Decimal,
}

/// Symmetric ordered interval [Min, Max] with neutral median Med.
///
/// Max reads "certainly true", Min "certainly false" and Med
/// "logically undetermined".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DomainTriple", into = "DomainTriple")]
pub struct ValuationDomain {
    min: Decimal,
    med: Decimal,
    max: Decimal,
}

impl ValuationDomain {
    /// Creates the domain [min, max]; the median is their midpoint.
    pub fn new(min: Decimal, max: Decimal) -> Result<Self, OutrankingError> {
        if min >= max {
            return Err(OutrankingError::invalid_domain(format!(
                "minimum {} must be lower than maximum {}",
                min, max
            )));
        }
        Ok(Self {
            min,
            med: (min + max) / dec!(2),
            max,
        })
    }

    /// Creates a domain from an explicit triple, checking its symmetry.
    pub fn from_triple(min: Decimal, med: Decimal, max: Decimal) -> Result<Self, OutrankingError> {
        if !(min < med && med < max) {
            return Err(OutrankingError::invalid_domain(format!(
                "expected min < med < max, got ({}, {}, {})",
                min, med, max
            )));
        }
        if med - min != max - med {
            return Err(OutrankingError::invalid_domain(format!(
                "asymmetric domain ({}, {}, {})",
                min, med, max
            )));
        }
        Ok(Self { min, med, max })
    }

    /// The normalized bipolar domain (-1, 0, +1).
    pub fn bipolar() -> Self {
        Self {
            min: dec!(-1),
            med: Decimal::ZERO,
            max: dec!(1),
        }
    }

    /// The graded robust domain (-3, 0, +3).
    pub fn robust() -> Self {
        Self {
            min: dec!(-3),
            med: Decimal::ZERO,
            max: dec!(3),
        }
    }

    /// The integer domain (-W, 0, +W) for a positive total weight W.
    pub fn integer(total_weight: Decimal) -> Result<Self, OutrankingError> {
        Self::new(-total_weight, total_weight)
    }

    pub fn min(&self) -> Decimal {
        self.min
    }

    pub fn med(&self) -> Decimal {
        self.med
    }

    pub fn max(&self) -> Decimal {
        self.max
    }

    /// Half-width of the domain: Max - Med.
    pub fn amplitude(&self) -> Decimal {
        self.max - self.med
    }

    /// Logical negation: reflection around the median.
    pub fn negate(&self, r: Decimal) -> Decimal {
        self.max + self.min - r
    }

    /// Returns true when `r` lies within [Min, Max].
    pub fn contains(&self, r: Decimal) -> bool {
        r >= self.min && r <= self.max
    }

    /// Credibility strictly above the median.
    pub fn is_affirmed(&self, r: Decimal) -> bool {
        r > self.med
    }

    /// Credibility strictly below the median.
    pub fn is_denied(&self, r: Decimal) -> bool {
        r < self.med
    }

    /// Credibility equal to the median.
    pub fn is_undetermined(&self, r: Decimal) -> bool {
        r == self.med
    }

    /// Maps `r` onto [-1, 1].
    pub fn normalize(&self, r: Decimal, precision: Precision) -> Decimal {
        precision.divide(r - self.med, self.amplitude())
    }

    /// Maps a normalized characteristic in [-1, 1] back onto this domain.
    pub fn denormalize(&self, c: Decimal) -> Decimal {
        self.med + c * self.amplitude()
    }

    /// Affine recoding of `r` from this domain onto `target`.
    pub fn recode(&self, r: Decimal, target: &ValuationDomain, precision: Precision) -> Decimal {
        if r == self.min {
            return target.min;
        }
        if r == self.max {
            return target.max;
        }
        if r == self.med {
            return target.med;
        }
        let scaled = precision.round((r - self.med) * target.amplitude() / self.amplitude());
        target.med + scaled
    }

    /// Fails unless both domains are identical.
    pub fn ensure_same(&self, other: &ValuationDomain) -> Result<(), OutrankingError> {
        if self != other {
            return Err(OutrankingError::invalid_domain(format!(
                "mismatched domains {} and {}",
                self, other
            )));
        }
        Ok(())
    }
}

impl Default for ValuationDomain {
    fn default() -> Self {
        Self::bipolar()
    }
}

impl TryFrom<DomainTriple> for ValuationDomain {
    type Error = OutrankingError;

    fn try_from(triple: DomainTriple) -> Result<Self, Self::Error> {
        Self::from_triple(triple.min, triple.med, triple.max)
    }
}

impl From<ValuationDomain> for DomainTriple {
    fn from(domain: ValuationDomain) -> Self {
        Self {
            min: domain.min,
            med: domain.med,
            max: domain.max,
        }
    }
}

impl fmt::Display for ValuationDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}; {}; {}]", self.min, self.med, self.max)
    }
}
