//! Criteria: scale, preference direction, weight and discrimination thresholds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{CriterionId, OutrankingError, ValidationError};

/// Preference direction of a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Larger evaluations are better.
    #[default]
    Max,
    /// Smaller evaluations are better.
    Min,
}

impl Direction {
    /// Sign applied to evaluations so larger is always better.
    pub fn sign(&self) -> Decimal {
        match self {
            Direction::Max => Decimal::ONE,
            Direction::Min => Decimal::NEGATIVE_ONE,
        }
    }

    /// Returns the textual code used in tableau files.
    pub fn code(&self) -> &'static str {
        match self {
            Direction::Max => "max",
            Direction::Min => "min",
        }
    }
}

impl FromStr for Direction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "max" => Ok(Direction::Max),
            "min" => Ok(Direction::Min),
            other => Err(ValidationError::invalid_format(
                "direction",
                format!("expected 'max' or 'min', got '{}'", other),
            )),
        }
    }
}

/// Kind of discrimination threshold, in increasing order of magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdKind {
    Indifference,
    WeakPreference,
    Preference,
    WeakVeto,
    Veto,
}

impl ThresholdKind {
    /// All kinds in increasing order.
    pub const ALL: [ThresholdKind; 5] = [
        ThresholdKind::Indifference,
        ThresholdKind::WeakPreference,
        ThresholdKind::Preference,
        ThresholdKind::WeakVeto,
        ThresholdKind::Veto,
    ];

    /// Short code used in tableau files.
    pub fn code(&self) -> &'static str {
        match self {
            ThresholdKind::Indifference => "ind",
            ThresholdKind::WeakPreference => "wp",
            ThresholdKind::Preference => "p",
            ThresholdKind::WeakVeto => "wv",
            ThresholdKind::Veto => "v",
        }
    }
}

impl fmt::Display for ThresholdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for ThresholdKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ind" => Ok(ThresholdKind::Indifference),
            "wp" => Ok(ThresholdKind::WeakPreference),
            "p" | "pref" => Ok(ThresholdKind::Preference),
            "wv" | "weakVeto" => Ok(ThresholdKind::WeakVeto),
            "v" | "veto" => Ok(ThresholdKind::Veto),
            other => Err(ValidationError::invalid_format(
                "threshold kind",
                format!("unknown threshold '{}'", other),
            )),
        }
    }
}

/// Affine variable threshold `alpha + beta * |e|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Threshold {
    pub alpha: Decimal,
    pub beta: Decimal,
}

impl Threshold {
    /// Creates an affine threshold.
    pub fn new(alpha: Decimal, beta: Decimal) -> Self {
        Self { alpha, beta }
    }

    /// Creates a constant threshold.
    pub fn constant(alpha: Decimal) -> Self {
        Self::new(alpha, Decimal::ZERO)
    }

    /// Symmetric value for a pair of evaluations: uses the larger magnitude.
    pub fn symmetric(&self, x: Decimal, y: Decimal) -> Decimal {
        self.at(x.abs().max(y.abs()))
    }

    /// Asymmetric value anchored on the first evaluation.
    pub fn asymmetric(&self, x: Decimal) -> Decimal {
        self.at(x.abs())
    }

    /// Value at a given performance magnitude.
    pub fn at(&self, magnitude: Decimal) -> Decimal {
        self.alpha + self.beta * magnitude
    }
}

/// Closed performance scale [min, max] in the criterion's own orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scale {
    pub min: Decimal,
    pub max: Decimal,
}

impl Scale {
    /// Creates a scale, rejecting inverted or empty intervals.
    pub fn new(min: Decimal, max: Decimal) -> Result<Self, ValidationError> {
        if min >= max {
            return Err(ValidationError::invalid_format(
                "scale",
                format!("minimum {} must be lower than maximum {}", min, max),
            ));
        }
        Ok(Self { min, max })
    }

    /// Smallest and largest magnitude reachable on the scale.
    pub fn magnitude_bounds(&self) -> (Decimal, Decimal) {
        let low = if self.min <= Decimal::ZERO && self.max >= Decimal::ZERO {
            Decimal::ZERO
        } else {
            self.min.abs().min(self.max.abs())
        };
        (low, self.min.abs().max(self.max.abs()))
    }

    /// Width of the scale.
    pub fn range(&self) -> Decimal {
        self.max - self.min
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self {
            min: Decimal::ZERO,
            max: Decimal::ONE_HUNDRED,
        }
    }
}

/// A weighted performance criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: CriterionId,
    pub name: String,
    pub comment: String,
    pub scale: Scale,
    pub direction: Direction,
    pub weight: Decimal,
    pub thresholds: BTreeMap<ThresholdKind, Threshold>,
}

impl Criterion {
    /// Creates a criterion of weight 1 on the default [0, 100] scale.
    pub fn new(id: CriterionId) -> Self {
        Self {
            name: id.to_string(),
            id,
            comment: String::new(),
            scale: Scale::default(),
            direction: Direction::Max,
            weight: Decimal::ONE,
            thresholds: BTreeMap::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Sets the scale.
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the preference direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the significance weight.
    pub fn with_weight(mut self, weight: Decimal) -> Self {
        self.weight = weight;
        self
    }

    /// Adds or replaces a threshold.
    pub fn with_threshold(mut self, kind: ThresholdKind, threshold: Threshold) -> Self {
        self.thresholds.insert(kind, threshold);
        self
    }

    /// Returns the threshold of the given kind, if present.
    pub fn threshold(&self, kind: ThresholdKind) -> Option<&Threshold> {
        self.thresholds.get(&kind)
    }

    /// Returns true when a veto or weak veto threshold is defined.
    pub fn has_veto(&self) -> bool {
        self.thresholds.contains_key(&ThresholdKind::Veto)
            || self.thresholds.contains_key(&ThresholdKind::WeakVeto)
    }

    /// Checks weight and threshold invariants.
    ///
    /// Thresholds must be nonnegative and ordered `ind <= wp <= p <= wv <= v`
    /// over the whole scale; as they are affine in the magnitude it is
    /// enough to check both ends of the reachable magnitude range.
    pub fn validate(&self) -> Result<(), OutrankingError> {
        if self.weight < Decimal::ZERO {
            return Err(OutrankingError::invalid_tableau(format!(
                "criterion '{}' has negative weight {}",
                self.id, self.weight
            )));
        }
        if self.thresholds.contains_key(&ThresholdKind::Indifference)
            && self.thresholds.contains_key(&ThresholdKind::WeakPreference)
        {
            return Err(OutrankingError::invalid_tableau(format!(
                "criterion '{}' defines both 'ind' and 'wp' thresholds",
                self.id
            )));
        }
        let (low, high) = self.scale.magnitude_bounds();
        for magnitude in [low, high] {
            let mut previous: Option<(ThresholdKind, Decimal)> = None;
            for (kind, threshold) in &self.thresholds {
                let value = threshold.at(magnitude);
                if value < Decimal::ZERO {
                    return Err(OutrankingError::invalid_tableau(format!(
                        "criterion '{}': threshold '{}' is negative ({}) at magnitude {}",
                        self.id, kind, value, magnitude
                    )));
                }
                if let Some((previous_kind, previous_value)) = previous {
                    if value < previous_value {
                        return Err(OutrankingError::invalid_tableau(format!(
                            "criterion '{}': threshold '{}' ({}) is lower than '{}' ({}) at magnitude {}",
                            self.id, kind, value, previous_kind, previous_value, magnitude
                        )));
                    }
                }
                previous = Some((*kind, value));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn criterion() -> Criterion {
        Criterion::new(CriterionId::new("g1").unwrap())
    }

    #[test]
    fn symmetric_threshold_uses_the_larger_magnitude() {
        let t = Threshold::new(dec!(1), dec!(0.1));
        assert_eq!(t.symmetric(dec!(20), dec!(-50)), dec!(6));
        assert_eq!(t.asymmetric(dec!(20)), dec!(3));
    }

    #[test]
    fn scale_magnitude_bounds_cover_zero_crossing() {
        let s = Scale::new(dec!(-10), dec!(30)).unwrap();
        assert_eq!(s.magnitude_bounds(), (dec!(0), dec!(30)));
        let s = Scale::new(dec!(5), dec!(30)).unwrap();
        assert_eq!(s.magnitude_bounds(), (dec!(5), dec!(30)));
    }

    #[test]
    fn inverted_scale_is_rejected() {
        assert!(Scale::new(dec!(100), dec!(0)).is_err());
    }

    #[test]
    fn ordered_thresholds_validate() {
        let c = criterion()
            .with_threshold(ThresholdKind::Indifference, Threshold::constant(dec!(10)))
            .with_threshold(ThresholdKind::Preference, Threshold::constant(dec!(20)))
            .with_threshold(ThresholdKind::Veto, Threshold::constant(dec!(50)));
        assert!(c.validate().is_ok());
        assert!(c.has_veto());
    }

    #[test]
    fn unordered_thresholds_are_rejected() {
        let c = criterion()
            .with_threshold(ThresholdKind::Indifference, Threshold::constant(dec!(30)))
            .with_threshold(ThresholdKind::Preference, Threshold::constant(dec!(20)));
        assert!(matches!(c.validate(), Err(OutrankingError::InvalidTableau(_))));
    }

    #[test]
    fn affine_thresholds_are_checked_at_both_scale_ends() {
        // ind overtakes p at large magnitudes.
        let c = criterion()
            .with_threshold(ThresholdKind::Indifference, Threshold::new(dec!(0), dec!(0.5)))
            .with_threshold(ThresholdKind::Preference, Threshold::constant(dec!(20)));
        assert!(c.validate().is_err());
    }

    #[test]
    fn both_ind_and_wp_are_rejected() {
        let c = criterion()
            .with_threshold(ThresholdKind::Indifference, Threshold::constant(dec!(1)))
            .with_threshold(ThresholdKind::WeakPreference, Threshold::constant(dec!(2)));
        assert!(c.validate().is_err());
    }

    #[test]
    fn negative_weight_is_rejected() {
        assert!(criterion().with_weight(dec!(-1)).validate().is_err());
    }

    #[test]
    fn threshold_kind_codes_parse() {
        for kind in ThresholdKind::ALL {
            assert_eq!(kind.code().parse::<ThresholdKind>().unwrap(), kind);
        }
        assert!("x".parse::<ThresholdKind>().is_err());
    }

    #[test]
    fn direction_sign() {
        assert_eq!(Direction::Min.sign(), dec!(-1));
        assert_eq!("max".parse::<Direction>().unwrap(), Direction::Max);
    }
}
