//! Quantile profiles: fictitious actions carrying category limits.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ActionId, OutrankingError, Precision};
use crate::domain::performance::{interpolated_percentile, Action, Direction, Evaluation, PerformanceTableau};

/// Limits q0..qm of `m` equal quantile categories, worst limit first.
///
/// `limits[j][g]` is the limit of profile `j` on criterion `g`, in the
/// criterion's own orientation. q0 sits at the worst end of each scale and
/// qm at the best end; interior limits interpolate the observed performances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantileProfiles {
    pub ids: Vec<ActionId>,
    pub limits: Vec<Vec<Evaluation>>,
}

impl QuantileProfiles {
    /// Learns `categories` equal quantile limits from `tableau`.
    ///
    /// # Errors
    ///
    /// `InvalidDomain` when fewer than one category is requested.
    pub fn learn(
        tableau: &PerformanceTableau,
        categories: usize,
        precision: Precision,
    ) -> Result<Self, OutrankingError> {
        if categories == 0 {
            return Err(OutrankingError::invalid_domain("at least one rating category is required"));
        }
        let columns: Vec<Vec<Evaluation>> = (0..tableau.criterion_count())
            .map(|g| criterion_limits(tableau, g, categories, precision))
            .collect();
        let limits = (0..=categories)
            .map(|j| columns.iter().map(|column| column[j]).collect())
            .collect();
        let ids = (0..=categories)
            .map(|j| unique_profile_id(tableau, j))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { ids, limits })
    }

    /// Number of categories.
    pub fn categories(&self) -> usize {
        self.ids.len().saturating_sub(1)
    }

    /// `tableau` extended with one action per profile.
    pub fn extend(&self, tableau: &PerformanceTableau) -> Result<PerformanceTableau, OutrankingError> {
        let mut builder = tableau.to_builder();
        for (id, limits) in self.ids.iter().zip(&self.limits) {
            builder = builder.action(Action::new(id.clone()).with_comment("category limit"));
            for (criterion, limit) in tableau.criteria().iter().zip(limits) {
                builder = builder.evaluation(&criterion.id, id, *limit);
            }
        }
        builder.build()
    }
}

fn criterion_limits(tableau: &PerformanceTableau, g: usize, categories: usize, precision: Precision) -> Vec<Evaluation> {
    let criterion = &tableau.criteria()[g];
    let sign = criterion.direction.sign();
    let (worst, best) = match criterion.direction {
        Direction::Max => (criterion.scale.min, criterion.scale.max),
        Direction::Min => (criterion.scale.max, criterion.scale.min),
    };
    let mut observed: Vec<Decimal> = (0..tableau.action_count())
        .filter_map(|x| tableau.evaluation(g, x).value())
        .collect();
    observed.sort();

    let steps = Decimal::from(categories as u64);
    (0..=categories)
        .map(|j| {
            let value = if j == 0 {
                worst
            } else if j == categories {
                best
            } else {
                let share = Decimal::from(j as u64) / steps;
                match interpolated_percentile(&observed, share * Decimal::ONE_HUNDRED, precision) {
                    Some(signed) => signed * sign,
                    None => precision.round(worst + share * (best - worst)),
                }
            };
            Evaluation::Value(value)
        })
        .collect()
}

fn unique_profile_id(tableau: &PerformanceTableau, j: usize) -> Result<ActionId, OutrankingError> {
    let mut candidate = format!("q{}", j);
    while tableau.action_index(&candidate).is_some() {
        candidate.insert(0, '_');
    }
    ActionId::new(candidate).map_err(OutrankingError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::CriterionId;
    use crate::domain::performance::{Criterion, Scale};
    use rust_decimal_macros::dec;

    fn tableau() -> PerformanceTableau {
        let mut builder = PerformanceTableau::builder()
            .criterion(Criterion::new(CriterionId::new("g").unwrap()))
            .criterion(
                Criterion::new(CriterionId::new("cost").unwrap())
                    .with_direction(Direction::Min)
                    .with_scale(Scale::new(dec!(0), dec!(10)).unwrap()),
            );
        for (id, g, cost) in [("a", dec!(20), dec!(2)), ("b", dec!(40), dec!(4)), ("q1", dec!(60), dec!(6))] {
            builder = builder
                .action(Action::new(ActionId::new(id).unwrap()))
                .evaluation("g", id, g)
                .evaluation("cost", id, cost);
        }
        builder.build().unwrap()
    }

    #[test]
    fn limits_span_the_scales() {
        let profiles = QuantileProfiles::learn(&tableau(), 2, Precision::default()).unwrap();
        assert_eq!(profiles.categories(), 2);
        assert_eq!(profiles.limits[0], vec![Evaluation::Value(dec!(0)), Evaluation::Value(dec!(10))]);
        assert_eq!(profiles.limits[1], vec![Evaluation::Value(dec!(40)), Evaluation::Value(dec!(4))]);
        assert_eq!(profiles.limits[2], vec![Evaluation::Value(dec!(100)), Evaluation::Value(dec!(0))]);
    }

    #[test]
    fn profile_ids_avoid_existing_actions() {
        let profiles = QuantileProfiles::learn(&tableau(), 2, Precision::default()).unwrap();
        let ids: Vec<&str> = profiles.ids.iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["q0", "_q1", "q2"]);
    }

    #[test]
    fn extension_appends_profiles() {
        let t = tableau();
        let profiles = QuantileProfiles::learn(&t, 2, Precision::default()).unwrap();
        let extended = profiles.extend(&t).unwrap();
        assert_eq!(extended.action_count(), 6);
        assert_eq!(extended.original_evaluation(1, 3), Evaluation::Value(dec!(10)));
    }

    #[test]
    fn zero_categories_are_rejected() {
        assert!(QuantileProfiles::learn(&tableau(), 0, Precision::default()).is_err());
    }
}
