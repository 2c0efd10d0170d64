//! Performance evaluations with an explicit missing-data sentinel.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Token written for missing evaluations.
pub const MISSING_TOKEN: &str = "NA";

/// Legacy numeric token read as a missing evaluation.
pub const LEGACY_MISSING_TOKEN: &str = "-999";

/// Exact evaluation of an action on a criterion, or missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Evaluation {
    Value(Decimal),
    #[default]
    Missing,
}

impl Evaluation {
    /// Returns the value, or `None` when missing.
    pub fn value(&self) -> Option<Decimal> {
        match self {
            Evaluation::Value(v) => Some(*v),
            Evaluation::Missing => None,
        }
    }

    /// Returns true for the missing sentinel.
    pub fn is_missing(&self) -> bool {
        matches!(self, Evaluation::Missing)
    }

    /// Applies a sign, keeping the missing sentinel.
    pub fn signed(&self, sign: Decimal) -> Self {
        match self {
            Evaluation::Value(v) => Evaluation::Value(*v * sign),
            Evaluation::Missing => Evaluation::Missing,
        }
    }
}

impl From<Decimal> for Evaluation {
    fn from(value: Decimal) -> Self {
        Evaluation::Value(value)
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // An exact -999 would read back as the legacy missing token.
            Evaluation::Value(v) if v.to_string() == LEGACY_MISSING_TOKEN => write!(f, "{}.0", v),
            Evaluation::Value(v) => write!(f, "{}", v),
            Evaluation::Missing => write!(f, "{}", MISSING_TOKEN),
        }
    }
}

impl FromStr for Evaluation {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == MISSING_TOKEN || s == LEGACY_MISSING_TOKEN {
            return Ok(Evaluation::Missing);
        }
        Decimal::from_str_exact(s)
            .or_else(|_| Decimal::from_str(s))
            .map(Evaluation::Value)
            .map_err(|e| ValidationError::invalid_format("evaluation", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn missing_tokens_parse_to_the_sentinel() {
        assert!("NA".parse::<Evaluation>().unwrap().is_missing());
        assert!("-999".parse::<Evaluation>().unwrap().is_missing());
    }

    #[test]
    fn decimals_keep_their_scale() {
        let e: Evaluation = "12.50".parse().unwrap();
        assert_eq!(e.to_string(), "12.50");
        assert_eq!(e.value(), Some(dec!(12.50)));
    }

    #[test]
    fn value_at_the_legacy_token_stays_a_value() {
        let e = Evaluation::Value(dec!(-999));
        assert_eq!(e.to_string(), "-999.0");
        assert_eq!(e.to_string().parse::<Evaluation>().unwrap(), e);
        assert_eq!(Evaluation::Value(dec!(-999.00)).to_string(), "-999.00");
    }

    #[test]
    fn signing_preserves_missing() {
        assert_eq!(Evaluation::Missing.signed(dec!(-1)), Evaluation::Missing);
        assert_eq!(
            Evaluation::Value(dec!(3.0)).signed(dec!(-1)),
            Evaluation::Value(dec!(-3.0))
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert!("abc".parse::<Evaluation>().is_err());
    }
}
