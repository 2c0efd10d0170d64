//! Per-criterion explanation of an outranking statement.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ConcordanceKind, LocalCharacteristic, PairThresholds};
use crate::domain::foundation::{ActionId, CriterionId, OutrankingError, Precision};
use crate::domain::performance::{Evaluation, PerformanceTableau};

/// How one criterion contributes to "x outranks y".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionComparison {
    pub criterion: CriterionId,
    pub weight: Decimal,
    pub source_evaluation: Evaluation,
    pub target_evaluation: Evaluation,
    pub thresholds: PairThresholds,
    /// `None` when either evaluation is missing.
    pub characteristic: Option<LocalCharacteristic>,
    /// Weighted local concordance `w * lc`, zero for missing data.
    pub contribution: Decimal,
}

/// Explanation of the pair (source, target).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairwiseComparison {
    pub source: ActionId,
    pub target: ActionId,
    pub criteria: Vec<CriterionComparison>,
    /// Normalized concordance before vetoes, in [-1, 1].
    pub concordance: Decimal,
    pub vetoing: Vec<CriterionId>,
    pub counter_vetoing: Vec<CriterionId>,
}

impl PerformanceTableau {
    /// Explains "x outranks y" criterion by criterion.
    pub fn pairwise_comparison(
        &self,
        x: &str,
        y: &str,
        kind: ConcordanceKind,
        precision: Precision,
    ) -> Result<PairwiseComparison, OutrankingError> {
        let unknown = |id: &str| OutrankingError::invalid_tableau(format!("unknown action '{}'", id));
        let xi = self.action_index(x).ok_or_else(|| unknown(x))?;
        let yi = self.action_index(y).ok_or_else(|| unknown(y))?;

        let criteria: Vec<CriterionComparison> = self
            .criteria()
            .iter()
            .enumerate()
            .map(|(g, criterion)| {
                let characteristic = LocalCharacteristic::compute(self, g, xi, yi, kind, precision).ok();
                CriterionComparison {
                    criterion: criterion.id.clone(),
                    weight: criterion.weight,
                    source_evaluation: self.original_evaluation(g, xi),
                    target_evaluation: self.original_evaluation(g, yi),
                    thresholds: PairThresholds::of(self, g, xi, yi),
                    characteristic,
                    contribution: characteristic.map_or(Decimal::ZERO, |c| c.concordance * criterion.weight),
                }
            })
            .collect();

        let total: Decimal = criteria.iter().map(|c| c.contribution).sum();
        let collect_ids = |pred: fn(&LocalCharacteristic) -> bool| -> Vec<CriterionId> {
            criteria
                .iter()
                .filter(|c| c.characteristic.as_ref().is_some_and(pred))
                .map(|c| c.criterion.clone())
                .collect()
        };
        Ok(PairwiseComparison {
            source: self.actions()[xi].id.clone(),
            target: self.actions()[yi].id.clone(),
            concordance: precision.divide(total, self.total_weight()),
            vetoing: collect_ids(LocalCharacteristic::is_veto),
            counter_vetoing: collect_ids(LocalCharacteristic::is_counter_veto),
            criteria,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::performance::{Action, Criterion, Direction, Threshold, ThresholdKind};
    use rust_decimal_macros::dec;

    fn tableau() -> PerformanceTableau {
        PerformanceTableau::builder()
            .name("cmp")
            .action(Action::new(ActionId::new("a").unwrap()))
            .action(Action::new(ActionId::new("b").unwrap()))
            .criterion(Criterion::new(CriterionId::new("quality").unwrap()).with_weight(dec!(2)))
            .criterion(
                Criterion::new(CriterionId::new("cost").unwrap())
                    .with_direction(Direction::Min)
                    .with_threshold(ThresholdKind::Veto, Threshold::constant(dec!(50))),
            )
            .evaluation("quality", "a", dec!(70))
            .evaluation("quality", "b", dec!(40))
            .evaluation("cost", "a", dec!(90))
            .evaluation("cost", "b", dec!(30))
            .build()
            .unwrap()
    }

    #[test]
    fn explains_each_criterion() {
        let cmp = tableau()
            .pairwise_comparison("a", "b", ConcordanceKind::Bipolar, Precision::default())
            .unwrap();
        assert_eq!(cmp.criteria.len(), 2);
        assert_eq!(cmp.criteria[0].contribution, dec!(2));
        assert_eq!(cmp.criteria[1].source_evaluation, Evaluation::Value(dec!(90)));
        assert_eq!(cmp.criteria[1].characteristic.unwrap().difference, dec!(-60));
        assert_eq!(cmp.concordance, dec!(0.333333333));
        assert_eq!(cmp.vetoing, vec![CriterionId::new("cost").unwrap()]);
        assert!(cmp.counter_vetoing.is_empty());
    }

    #[test]
    fn unknown_actions_are_rejected() {
        assert!(tableau()
            .pairwise_comparison("a", "zz", ConcordanceKind::Bipolar, Precision::default())
            .is_err());
    }
}
