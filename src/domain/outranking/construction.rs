//! Outranking construction: one constructor consuming a strategy value.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::characteristics::{
    bipolar_concordance_value, bipolar_value, electre_concordance_value, electre_value,
    CharacteristicTable,
};
use super::median::median_value;
use super::robust::RobustRelations;
use super::stochastic::stochastic_relation;
use super::{OutrankingStrategy, VetoRecord};
use crate::domain::digraph::BipolarDigraph;
use crate::domain::foundation::{ComputeContext, OutrankingError};
use crate::domain::performance::PerformanceTableau;
use crate::domain::valuation::ValuationDomain;

/// An outranking relation with the evidence recorded while building it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutrankingDigraph {
    pub digraph: BipolarDigraph,
    pub strategy: OutrankingStrategy,
    pub vetoes: VetoRecord,
    /// Sign likelihood per pair, for the stochastic variant only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likelihoods: Option<Vec<Vec<Decimal>>>,
}

/// Builds outranking digraphs from performance tableaux.
pub struct OutrankingConstructor;

impl OutrankingConstructor {
    /// Constructs the outranking relation of `tableau` under `strategy`.
    ///
    /// The diagonal is always Min. Missing evaluations contribute a
    /// neutral characteristic and never trigger vetoes.
    ///
    /// # Errors
    ///
    /// - `InvalidTableau` for invalid strategy parameters
    /// - `EmptyCoalition` when the total weight is zero
    /// - `Cancelled` when the context is cancelled
    pub fn construct(
        tableau: &PerformanceTableau,
        strategy: &OutrankingStrategy,
        ctx: &ComputeContext,
    ) -> Result<OutrankingDigraph, OutrankingError> {
        strategy.validate()?;
        let total_weight = tableau.total_weight();
        if total_weight <= Decimal::ZERO {
            return Err(OutrankingError::EmptyCoalition);
        }

        let table = CharacteristicTable::compute(tableau, strategy.concordance_kind(), ctx)?;
        let weights: Vec<Decimal> = tableau.criteria().iter().map(|c| c.weight).collect();
        let precision = ctx.precision;
        let name = format!("{}-{}", strategy.label(), tableau.name());
        let actions = tableau.actions().iter().map(|a| a.id.clone()).collect::<Vec<_>>();

        let bipolar = ValuationDomain::bipolar();
        let (domain, relation, likelihoods) = match strategy {
            OutrankingStrategy::BipolarStandard => {
                let relation = pairwise(&table, bipolar.min(), |pair| {
                    bipolar_value(pair, &weights, total_weight, &bipolar, precision)
                });
                (bipolar, relation, None)
            }
            OutrankingStrategy::BipolarInteger => {
                let integer = ValuationDomain::integer(total_weight)?;
                let relation = pairwise(&table, integer.min(), |pair| {
                    bipolar_value(pair, &weights, total_weight, &integer, precision)
                });
                (integer, relation, None)
            }
            OutrankingStrategy::Electre3 => {
                let relation = pairwise(&table, bipolar.min(), |pair| {
                    electre_value(pair, &weights, total_weight, &bipolar, precision)
                });
                (bipolar, relation, None)
            }
            OutrankingStrategy::Median { quantile } => {
                let relation = pairwise(&table, bipolar.min(), |pair| {
                    median_value(pair, &weights, *quantile, &bipolar, precision)
                });
                (bipolar, relation, None)
            }
            OutrankingStrategy::Stochastic(settings) => {
                let (relation, likelihoods) =
                    stochastic_relation(tableau, &table, settings, &bipolar, ctx)?;
                (bipolar, relation, Some(likelihoods))
            }
            OutrankingStrategy::Robust => {
                let robust = RobustRelations::from_table(tableau, &table, ctx)?;
                (ValuationDomain::robust(), robust.combined(), None)
            }
        };

        let with_counter_vetoes = !matches!(strategy, OutrankingStrategy::Electre3);
        let vetoes = VetoRecord::collect(tableau, &table, with_counter_vetoes, |x, y| {
            let pair = table.pair(x, y);
            match strategy {
                OutrankingStrategy::Electre3 => {
                    let c = electre_concordance_value(pair, &weights, total_weight, precision);
                    precision.round(domain.min() + c * (domain.max() - domain.min()))
                }
                OutrankingStrategy::BipolarInteger => {
                    bipolar_concordance_value(pair, &weights, total_weight, &domain, precision)
                }
                _ => bipolar_concordance_value(pair, &weights, total_weight, &bipolar, precision),
            }
        });

        let digraph = BipolarDigraph::from_actions(name, domain, actions, relation)?;
        tracing::debug!(
            strategy = strategy.label(),
            actions = digraph.order(),
            arcs = digraph.size(),
            vetoes = vetoes.vetoes.len(),
            counter_vetoes = vetoes.counter_vetoes.len(),
            "outranking relation constructed"
        );

        Ok(OutrankingDigraph {
            digraph,
            strategy: *strategy,
            vetoes,
            likelihoods,
        })
    }
}

/// Applies `value` to every off-diagonal pair; the diagonal is `diagonal`.
pub(crate) fn pairwise<F>(table: &CharacteristicTable, diagonal: Decimal, value: F) -> Vec<Vec<Decimal>>
where
    F: Fn(&[Option<super::LocalCharacteristic>]) -> Decimal,
{
    let order = table.order();
    (0..order)
        .map(|x| {
            (0..order)
                .map(|y| if x == y { diagonal } else { value(table.pair(x, y)) })
                .collect()
        })
        .collect()
}
