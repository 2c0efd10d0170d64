//! Per-criterion characteristics of an ordered pair of actions.
//!
//! Every characteristic is expressed on the bipolar range [-1, +1]:
//! +1 asserts, -1 denies and 0 leaves the statement undetermined.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OutrankingError, Precision};
use crate::domain::performance::{PerformanceTableau, ThresholdKind};

/// Concordance semantics used for the middle preference band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcordanceKind {
    /// Three-valued: +1, 0 or -1.
    Bipolar,
    /// Linear ramp between indifference and preference, negative-side
    /// discordance on a linear ramp up to the veto.
    Electre3,
}

/// Thresholds active for one ordered pair on one criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PairThresholds {
    pub indifference: Option<Decimal>,
    pub weak_preference: Option<Decimal>,
    pub preference: Option<Decimal>,
    pub weak_veto: Option<Decimal>,
    pub veto: Option<Decimal>,
}

impl PairThresholds {
    /// Symmetric thresholds of the pair (x, y) on criterion `g`.
    pub fn of(tableau: &PerformanceTableau, g: usize, x: usize, y: usize) -> Self {
        Self {
            indifference: tableau.threshold(g, ThresholdKind::Indifference, x, y),
            weak_preference: tableau.threshold(g, ThresholdKind::WeakPreference, x, y),
            preference: tableau.threshold(g, ThresholdKind::Preference, x, y),
            weak_veto: tableau.threshold(g, ThresholdKind::WeakVeto, x, y),
            veto: tableau.threshold(g, ThresholdKind::Veto, x, y),
        }
    }

    fn lower_bound(&self) -> Decimal {
        self.indifference
            .or(self.weak_preference)
            .unwrap_or(Decimal::ZERO)
    }

    /// True when `d` lies in the indifference band (or above).
    fn indifferent_or_better(&self, d: Decimal) -> bool {
        match self.weak_preference {
            Some(wp) if self.indifference.is_none() => d > -wp,
            _ => d >= -self.indifference.unwrap_or(Decimal::ZERO),
        }
    }

    fn preference_bound(&self) -> Decimal {
        self.preference.unwrap_or_else(|| self.lower_bound())
    }
}

/// Local concordance, veto and counter-veto of one ordered pair on one criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalCharacteristic {
    /// Signed performance difference `e(x) - e(y)`.
    pub difference: Decimal,
    pub concordance: Decimal,
    pub veto: Decimal,
    pub counter_veto: Decimal,
}

impl LocalCharacteristic {
    /// Computes the characteristic of a difference under the given thresholds.
    pub fn from_difference(
        difference: Decimal,
        thresholds: &PairThresholds,
        kind: ConcordanceKind,
        precision: Precision,
    ) -> Self {
        match kind {
            ConcordanceKind::Bipolar => Self {
                difference,
                concordance: bipolar_concordance(difference, thresholds),
                veto: local_veto(difference, thresholds),
                counter_veto: local_counter_veto(difference, thresholds),
            },
            ConcordanceKind::Electre3 => Self {
                difference,
                concordance: precision.round(
                    electre_concordance(difference, thresholds, precision) * Decimal::TWO - Decimal::ONE,
                ),
                veto: precision.round(
                    electre_discordance(difference, thresholds, precision) * Decimal::TWO - Decimal::ONE,
                ),
                counter_veto: Decimal::NEGATIVE_ONE,
            },
        }
    }

    /// Characteristic of the pair (x, y) on criterion `g` of a tableau.
    ///
    /// # Errors
    ///
    /// `MissingEvaluation` when either evaluation is missing.
    pub fn compute(
        tableau: &PerformanceTableau,
        g: usize,
        x: usize,
        y: usize,
        kind: ConcordanceKind,
        precision: Precision,
    ) -> Result<Self, OutrankingError> {
        let missing = |a: usize| OutrankingError::MissingEvaluation {
            criterion: tableau.criteria()[g].id.to_string(),
            action: tableau.actions()[a].id.to_string(),
        };
        let ex = tableau.evaluation(g, x).value().ok_or_else(|| missing(x))?;
        let ey = tableau.evaluation(g, y).value().ok_or_else(|| missing(y))?;
        let thresholds = PairThresholds::of(tableau, g, x, y);
        Ok(Self::from_difference(ex - ey, &thresholds, kind, precision))
    }

    /// True when the veto is asserted.
    pub fn is_veto(&self) -> bool {
        self.veto == Decimal::ONE
    }

    /// True when the counter-veto is asserted.
    pub fn is_counter_veto(&self) -> bool {
        self.counter_veto == Decimal::ONE
    }
}

/// Three-valued concordance of a difference.
pub fn bipolar_concordance(d: Decimal, t: &PairThresholds) -> Decimal {
    if t.indifferent_or_better(d) {
        Decimal::ONE
    } else if d <= -t.preference_bound() {
        Decimal::NEGATIVE_ONE
    } else {
        Decimal::ZERO
    }
}

/// Unipolar Electre III concordance in [0, 1].
pub fn electre_concordance(d: Decimal, t: &PairThresholds, precision: Precision) -> Decimal {
    if t.indifferent_or_better(d) {
        return Decimal::ONE;
    }
    let p = t.preference_bound();
    if d <= -p {
        return Decimal::ZERO;
    }
    let lower = t.lower_bound();
    precision.divide(p + d, p - lower)
}

/// Unipolar Electre III discordance in [0, 1].
pub fn electre_discordance(d: Decimal, t: &PairThresholds, precision: Precision) -> Decimal {
    let Some(v) = t.veto else {
        return Decimal::ZERO;
    };
    if d <= -v {
        return Decimal::ONE;
    }
    let start = t.weak_veto.or(t.preference).unwrap_or(v);
    if d > -start || start >= v {
        return Decimal::ZERO;
    }
    precision.divide(-d - start, v - start)
}

/// Negative-side veto: +1 asserted, 0 weak veto, -1 not asserted.
pub fn local_veto(d: Decimal, t: &PairThresholds) -> Decimal {
    match (t.veto, t.weak_veto) {
        (Some(v), _) if d <= -v => Decimal::ONE,
        (_, Some(wv)) if d <= -wv => Decimal::ZERO,
        _ => Decimal::NEGATIVE_ONE,
    }
}

/// Positive-side counter-veto: +1 asserted, 0 weak, -1 not asserted.
pub fn local_counter_veto(d: Decimal, t: &PairThresholds) -> Decimal {
    match (t.veto, t.weak_veto) {
        (Some(v), _) if d >= v => Decimal::ONE,
        (_, Some(wv)) if d >= wv => Decimal::ZERO,
        _ => Decimal::NEGATIVE_ONE,
    }
}
