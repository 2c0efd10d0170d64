//! Robust outranking: unanimous, ordinal and cardinal evidence graded on (-3, 0, +3).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::characteristics::{bipolar_value, CharacteristicTable};
use super::construction::pairwise;
use super::{ConcordanceKind, LocalCharacteristic};
use crate::domain::digraph::BipolarDigraph;
use crate::domain::foundation::{ComputeContext, OutrankingError};
use crate::domain::performance::PerformanceTableau;
use crate::domain::valuation::ValuationDomain;

/// The three bipolar relations underlying the robust outranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobustRelations {
    /// Every weighted criterion agrees.
    pub unanimous: BipolarDigraph,
    /// Holds for every weight vector compatible with the weight preorder.
    pub ordinal: BipolarDigraph,
    /// The standard bipolar outranking.
    pub cardinal: BipolarDigraph,
}

impl RobustRelations {
    /// Computes the three relations of a tableau.
    pub fn compute(tableau: &PerformanceTableau, ctx: &ComputeContext) -> Result<Self, OutrankingError> {
        if tableau.total_weight() <= Decimal::ZERO {
            return Err(OutrankingError::EmptyCoalition);
        }
        let table = CharacteristicTable::compute(tableau, ConcordanceKind::Bipolar, ctx)?;
        Self::from_table(tableau, &table, ctx)
    }

    pub(crate) fn from_table(
        tableau: &PerformanceTableau,
        table: &CharacteristicTable,
        ctx: &ComputeContext,
    ) -> Result<Self, OutrankingError> {
        let weights: Vec<Decimal> = tableau.criteria().iter().map(|c| c.weight).collect();
        let total_weight = tableau.total_weight();
        let classes = weight_classes(&weights);
        let bipolar = ValuationDomain::bipolar();
        let actions: Vec<_> = tableau.actions().iter().map(|a| a.id.clone()).collect();

        ctx.check()?;
        let unanimous = pairwise(table, bipolar.min(), |pair| unanimous_value(pair, &weights));
        let ordinal = pairwise(table, bipolar.min(), |pair| ordinal_value(pair, &classes));
        let cardinal = pairwise(table, bipolar.min(), |pair| {
            bipolar_value(pair, &weights, total_weight, &bipolar, ctx.precision)
        });

        let name = tableau.name();
        Ok(Self {
            unanimous: BipolarDigraph::from_actions(
                format!("unanimous-{}", name),
                bipolar,
                actions.clone(),
                unanimous,
            )?,
            ordinal: BipolarDigraph::from_actions(format!("ordinal-{}", name), bipolar, actions.clone(), ordinal)?,
            cardinal: BipolarDigraph::from_actions(format!("cardinal-{}", name), bipolar, actions, cardinal)?,
        })
    }

    /// Graded relation: +-3 unanimous, +-2 ordinal, +-1 cardinal, 0 otherwise.
    pub fn combined(&self) -> Vec<Vec<Decimal>> {
        let order = self.cardinal.order();
        (0..order)
            .map(|x| {
                (0..order)
                    .map(|y| {
                        if x == y {
                            return dec!(-3);
                        }
                        let levels = [
                            (self.unanimous.value(x, y), dec!(3)),
                            (self.ordinal.value(x, y), dec!(2)),
                            (self.cardinal.value(x, y), dec!(1)),
                        ];
                        levels
                            .iter()
                            .find(|(r, _)| !r.is_zero())
                            .map_or(Decimal::ZERO, |(r, grade)| {
                                if r.is_sign_positive() {
                                    *grade
                                } else {
                                    -*grade
                                }
                            })
                    })
                    .collect()
            })
            .collect()
    }
}

/// Criterion indices grouped by weight, heaviest class first; zero weights are dropped.
fn weight_classes(weights: &[Decimal]) -> Vec<Vec<usize>> {
    let mut distinct: Vec<Decimal> = weights.iter().copied().filter(|w| *w > Decimal::ZERO).collect();
    distinct.sort_by(|a, b| b.cmp(a));
    distinct.dedup();
    distinct
        .into_iter()
        .map(|weight| {
            weights
                .iter()
                .enumerate()
                .filter(|(_, w)| **w == weight)
                .map(|(g, _)| g)
                .collect()
        })
        .collect()
}

fn unanimous_value(pair: &[Option<LocalCharacteristic>], weights: &[Decimal]) -> Decimal {
    let present: Vec<&LocalCharacteristic> = pair
        .iter()
        .zip(weights)
        .filter(|(_, w)| **w > Decimal::ZERO)
        .filter_map(|(c, _)| c.as_ref())
        .collect();
    if present.is_empty() {
        return Decimal::ZERO;
    }
    let vetoed = pair.iter().flatten().any(LocalCharacteristic::is_veto);
    let countered = pair.iter().flatten().any(LocalCharacteristic::is_counter_veto);
    if !vetoed && present.iter().all(|c| c.concordance == Decimal::ONE) {
        Decimal::ONE
    } else if !countered && present.iter().all(|c| c.concordance == Decimal::NEGATIVE_ONE) {
        Decimal::NEGATIVE_ONE
    } else {
        Decimal::ZERO
    }
}

fn ordinal_value(pair: &[Option<LocalCharacteristic>], classes: &[Vec<usize>]) -> Decimal {
    let mut cumulative = Decimal::ZERO;
    let sums: Vec<Decimal> = classes
        .iter()
        .map(|class| {
            cumulative += class
                .iter()
                .filter_map(|g| pair.get(*g).copied().flatten())
                .map(|c| c.concordance)
                .sum::<Decimal>();
            cumulative
        })
        .collect();
    let vetoed = pair.iter().flatten().any(LocalCharacteristic::is_veto);
    let countered = pair.iter().flatten().any(LocalCharacteristic::is_counter_veto);
    let positive = sums.iter().all(|t| *t >= Decimal::ZERO) && sums.iter().any(|t| *t > Decimal::ZERO);
    let negative = sums.iter().all(|t| *t <= Decimal::ZERO) && sums.iter().any(|t| *t < Decimal::ZERO);
    if positive && !vetoed {
        Decimal::ONE
    } else if negative && !countered {
        Decimal::NEGATIVE_ONE
    } else {
        Decimal::ZERO
    }
}
