//! Descriptive statistics and derived views of a performance tableau.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{Evaluation, PerformanceTableau, Threshold, ThresholdKind};
use crate::domain::foundation::{CriterionId, ObjectiveId, OutrankingError, Precision};

/// Criteria sharing the same significance weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightClass {
    pub weight: Decimal,
    pub criteria: Vec<CriterionId>,
}

/// Percentiles of the performance differences used for default thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdPercentiles {
    pub indifference: Decimal,
    pub preference: Decimal,
    pub weak_veto: Decimal,
    pub veto: Decimal,
}

impl Default for ThresholdPercentiles {
    fn default() -> Self {
        Self {
            indifference: dec!(10),
            preference: dec!(20),
            weak_veto: dec!(60),
            veto: dec!(80),
        }
    }
}

/// Linear interpolation of the `percentile` (0-100) of sorted values.
pub fn interpolated_percentile(sorted: &[Decimal], percentile: Decimal, precision: Precision) -> Option<Decimal> {
    let last = sorted.len().checked_sub(1)?;
    let clamped = percentile.max(Decimal::ZERO).min(Decimal::ONE_HUNDRED);
    let position = Decimal::from(last) * clamped / Decimal::ONE_HUNDRED;
    let lower = position.floor();
    let fraction = position - lower;
    let index = lower.to_usize()?;
    let low = sorted[index.min(last)];
    let high = sorted[(index + 1).min(last)];
    Some(precision.round(low + fraction * (high - low)))
}

impl PerformanceTableau {
    /// Criteria grouped by increasing weight.
    pub fn weight_preorder(&self) -> Vec<WeightClass> {
        let mut weights: Vec<Decimal> = self.criteria().iter().map(|c| c.weight).collect();
        weights.sort();
        weights.dedup();
        weights
            .into_iter()
            .map(|weight| WeightClass {
                weight,
                criteria: self
                    .criteria()
                    .iter()
                    .filter(|c| c.weight == weight)
                    .map(|c| c.id.clone())
                    .collect(),
            })
            .collect()
    }

    /// Sum of the weights of the criteria grouped under an objective.
    pub fn objective_weight(&self, objective: &ObjectiveId) -> Option<Decimal> {
        let objective = self.objectives().iter().find(|o| &o.id == objective)?;
        Some(
            objective
                .criteria
                .iter()
                .filter_map(|c| self.criterion_index(c.as_str()))
                .map(|g| self.criteria()[g].weight)
                .sum(),
        )
    }

    /// Lowest and highest present evaluation on `g`, in the criterion's orientation.
    pub fn min_max_evaluations(&self, g: usize) -> Option<(Decimal, Decimal)> {
        let values: Vec<Decimal> = (0..self.action_count())
            .filter_map(|x| self.original_evaluation(g, x).value())
            .collect();
        let min = values.iter().min()?;
        let max = values.iter().max()?;
        Some((*min, *max))
    }

    /// Share of missing evaluations over the whole tableau.
    pub fn missing_data_proportion(&self) -> Decimal {
        let cells = self.action_count() * self.criterion_count();
        let missing = (0..self.criterion_count())
            .flat_map(|g| (0..self.action_count()).map(move |x| (g, x)))
            .filter(|&(g, x)| self.evaluation(g, x).is_missing())
            .count();
        Decimal::from(missing) / Decimal::from(cells)
    }

    /// Evaluations rescaled from each criterion scale onto [low, high], larger is better.
    ///
    /// The result is indexed `[criterion][action]`.
    pub fn normalized_evaluations(
        &self,
        low: Decimal,
        high: Decimal,
        precision: Precision,
    ) -> Vec<Vec<Evaluation>> {
        self.criteria()
            .iter()
            .enumerate()
            .map(|(g, criterion)| {
                let sign = criterion.direction.sign();
                let (worst, best) = if sign.is_sign_positive() {
                    (criterion.scale.min, criterion.scale.max)
                } else {
                    (-criterion.scale.max, -criterion.scale.min)
                };
                (0..self.action_count())
                    .map(|x| match self.evaluation(g, x) {
                        Evaluation::Value(v) => Evaluation::Value(
                            low + precision.divide((v - worst) * (high - low), best - worst),
                        ),
                        Evaluation::Missing => Evaluation::Missing,
                    })
                    .collect()
            })
            .collect()
    }

    /// Weighted mean of the evaluations of `x` normalized onto [0, 100].
    ///
    /// Missing evaluations are skipped; `None` when all are missing.
    pub fn weighted_average_performance(&self, x: usize, precision: Precision) -> Option<Decimal> {
        let normalized = self.normalized_evaluations(Decimal::ZERO, Decimal::ONE_HUNDRED, precision);
        let mut total = Decimal::ZERO;
        let mut weights = Decimal::ZERO;
        for (g, criterion) in self.criteria().iter().enumerate() {
            if let Some(v) = normalized[g][x].value() {
                total += criterion.weight * v;
                weights += criterion.weight;
            }
        }
        if weights.is_zero() {
            return None;
        }
        Some(precision.divide(total, weights))
    }

    /// Share of performance differences on `g` not exceeding the `kind` threshold.
    pub fn threshold_percentile(&self, g: usize, kind: ThresholdKind) -> Option<Decimal> {
        let threshold = self.criteria()[g].threshold(kind)?;
        let present: Vec<Decimal> = (0..self.action_count())
            .filter_map(|x| self.evaluation(g, x).value())
            .collect();
        let mut pairs = 0u64;
        let mut covered = 0u64;
        for (i, a) in present.iter().enumerate() {
            for b in &present[i + 1..] {
                pairs += 1;
                if (*a - *b).abs() <= threshold.symmetric(*a, *b) {
                    covered += 1;
                }
            }
        }
        if pairs == 0 {
            return None;
        }
        Some(Decimal::from(covered) / Decimal::from(pairs))
    }

    /// Installs constant `ind`, `p`, `wv` and `v` thresholds on criteria without thresholds.
    ///
    /// Each threshold is the interpolated percentile of the sorted
    /// performance differences of its criterion.
    pub fn with_default_thresholds(
        &self,
        percentiles: &ThresholdPercentiles,
        precision: Precision,
    ) -> Result<Self, OutrankingError> {
        let mut criteria = self.criteria().to_vec();
        for (g, criterion) in criteria.iter_mut().enumerate() {
            if !criterion.thresholds.is_empty() {
                continue;
            }
            let differences = self.performance_differences(g);
            let levels = [
                (ThresholdKind::Indifference, percentiles.indifference),
                (ThresholdKind::Preference, percentiles.preference),
                (ThresholdKind::WeakVeto, percentiles.weak_veto),
                (ThresholdKind::Veto, percentiles.veto),
            ];
            for (kind, percentile) in levels {
                if let Some(value) = interpolated_percentile(&differences, percentile, precision) {
                    criterion.thresholds.insert(kind, Threshold::constant(value));
                }
            }
            tracing::debug!(
                criterion = %criterion.id,
                thresholds = criterion.thresholds.len(),
                "default thresholds installed"
            );
        }
        self.with_criteria(criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ActionId;
    use crate::domain::performance::{Action, Criterion, Direction, Scale};

    fn tableau() -> PerformanceTableau {
        let mut builder = PerformanceTableau::builder()
            .criterion(Criterion::new(CriterionId::new("g1").unwrap()))
            .criterion(
                Criterion::new(CriterionId::new("g2").unwrap())
                    .with_weight(dec!(3))
                    .with_direction(Direction::Min)
                    .with_scale(Scale::new(dec!(0), dec!(10)).unwrap()),
            );
        for (id, g1, g2) in [("a", dec!(10), dec!(2)), ("b", dec!(20), dec!(5)), ("c", dec!(40), dec!(8))] {
            builder = builder
                .action(Action::new(ActionId::new(id).unwrap()))
                .evaluation("g1", id, g1)
                .evaluation("g2", id, g2);
        }
        builder.build().unwrap()
    }

    #[test]
    fn percentile_interpolates_between_order_statistics() {
        let values = [dec!(0), dec!(10), dec!(20)];
        let p = Precision::default();
        assert_eq!(interpolated_percentile(&values, dec!(50), p), Some(dec!(10)));
        assert_eq!(interpolated_percentile(&values, dec!(25), p), Some(dec!(5)));
        assert_eq!(interpolated_percentile(&values, dec!(100), p), Some(dec!(20)));
        assert_eq!(interpolated_percentile(&[], dec!(50), p), None);
    }

    #[test]
    fn weight_preorder_groups_equal_weights() {
        let preorder = tableau().weight_preorder();
        assert_eq!(preorder.len(), 2);
        assert_eq!(preorder[0].weight, dec!(1));
        assert_eq!(preorder[1].criteria[0].as_str(), "g2");
    }

    #[test]
    fn min_max_uses_original_orientation() {
        assert_eq!(tableau().min_max_evaluations(1), Some((dec!(2), dec!(8))));
    }

    #[test]
    fn normalization_inverts_minimized_criteria() {
        let n = tableau().normalized_evaluations(dec!(0), dec!(1), Precision::default());
        assert_eq!(n[1][0], Evaluation::Value(dec!(0.8)));
        assert_eq!(n[0][2], Evaluation::Value(dec!(0.4)));
    }

    #[test]
    fn weighted_average_combines_normalized_values() {
        // a: g1 -> 10, g2 -> 80; (10 + 3 * 80) / 4 = 62.5
        assert_eq!(
            tableau().weighted_average_performance(0, Precision::default()),
            Some(dec!(62.5))
        );
    }

    #[test]
    fn default_thresholds_follow_the_differences() {
        let t = tableau()
            .with_default_thresholds(&ThresholdPercentiles::default(), Precision::default())
            .unwrap();
        // g1 differences: 10, 20, 30.
        let g1 = &t.criteria()[0];
        assert_eq!(g1.threshold(ThresholdKind::Indifference).unwrap().alpha, dec!(12));
        assert_eq!(g1.threshold(ThresholdKind::Veto).unwrap().alpha, dec!(26));
        assert!(t.threshold_percentile(0, ThresholdKind::Veto).is_some());
    }

    #[test]
    fn missing_proportion_counts_cells() {
        assert_eq!(tableau().missing_data_proportion(), dec!(0));
    }
}
