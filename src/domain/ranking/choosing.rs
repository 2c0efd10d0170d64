//! Ranking by iterated best and last choosing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::WeakOrder;
use crate::domain::circuits::DEFAULT_CIRCUIT_CAP;
use crate::domain::digraph::{BipolarDigraph, FusionOperator};
use crate::domain::foundation::{ActionId, ComputeContext, Diagnostic, OutrankingError};
use crate::domain::kernels::{KernelKind, DEFAULT_STEP_BUDGET};
use crate::domain::valuation::OrdinalCorrelation;

/// Parameters of the ranking procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingSettings {
    /// Choose on the codual (strict preference) relation.
    pub codual: bool,
    pub fusion: FusionOperator,
    pub circuit_cap: usize,
    pub step_budget: u64,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            codual: false,
            fusion: FusionOperator::OMin,
            circuit_cap: DEFAULT_CIRCUIT_CAP,
            step_budget: DEFAULT_STEP_BUDGET,
        }
    }
}

/// One extracted choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingStep {
    pub credibility: Decimal,
    pub members: Vec<ActionId>,
}

/// Best-choosing, last-choosing and fused weak orders of a relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingByChoosing {
    /// Dominant choices from best to worst.
    pub best_steps: Vec<RankingStep>,
    /// Absorbent choices from worst to best.
    pub last_steps: Vec<RankingStep>,
    pub best_order: WeakOrder,
    pub last_order: WeakOrder,
    pub fused_order: WeakOrder,
    /// Correlation of the fused order with the source relation.
    pub correlation: OrdinalCorrelation,
    pub diagnostics: Vec<Diagnostic>,
}

impl RankingByChoosing {
    /// Ranks the actions of `digraph`.
    ///
    /// # Errors
    ///
    /// - `InvalidDomain` when the digraph holds fictive nodes
    /// - `Cancelled` when the context is cancelled
    pub fn compute(
        digraph: &BipolarDigraph,
        settings: &RankingSettings,
        ctx: &ComputeContext,
    ) -> Result<Self, OutrankingError> {
        if digraph.nodes().iter().any(|n| n.is_fictive()) {
            return Err(OutrankingError::invalid_domain(
                "ranking by choosing requires a digraph of original actions",
            ));
        }
        let mut diagnostics = Vec::new();
        let best_steps = choosing(digraph, KernelKind::Dominant, settings, ctx, &mut diagnostics)?;
        let last_steps = choosing(digraph, KernelKind::Absorbent, settings, ctx, &mut diagnostics)?;

        let best_order = WeakOrder::new(best_steps.iter().map(|s| s.members.clone()).collect());
        let last_order = WeakOrder::new(last_steps.iter().rev().map(|s| s.members.clone()).collect());

        let domain = *digraph.domain();
        let best_relation = best_order.to_digraph("best-choosing", domain)?;
        let last_relation = last_order.to_digraph("last-choosing", domain)?;
        let fused = best_relation.fusion(&[&last_relation], settings.fusion)?;
        let fused_order = WeakOrder::from_relation(&fused);
        let correlation = fused_order.correlation_with(digraph, ctx.precision)?;

        tracing::debug!(
            digraph = digraph.name(),
            classes = fused_order.len(),
            correlation = %correlation.correlation,
            "ranking by choosing completed"
        );
        Ok(Self {
            best_steps,
            last_steps,
            best_order,
            last_order,
            fused_order,
            correlation,
            diagnostics,
        })
    }
}

/// Iteratively extracts the recommended choice of `kind` from the remaining actions.
fn choosing(
    digraph: &BipolarDigraph,
    kind: KernelKind,
    settings: &RankingSettings,
    ctx: &ComputeContext,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<RankingStep>, OutrankingError> {
    let mut remaining: Vec<usize> = (0..digraph.order()).collect();
    let mut steps = Vec::new();
    while !remaining.is_empty() {
        ctx.check()?;
        let mut current = digraph.restricted(&remaining);
        if settings.codual {
            current = current.codual();
        }
        let collapsed = match current.coca(settings.circuit_cap, ctx) {
            Ok(coca) => coca.digraph,
            Err(OutrankingError::CircuitEnumerationOverflow { cap }) => {
                let diagnostic = Diagnostic::from_error(&OutrankingError::CircuitEnumerationOverflow { cap });
                tracing::warn!(%diagnostic, "choosing on the uncollapsed relation");
                diagnostics.push(diagnostic);
                current
            }
            Err(error) => return Err(error),
        };
        let recommendation = collapsed.recommend(kind, settings.step_budget, ctx)?;
        diagnostics.extend(recommendation.diagnostics.iter().cloned());

        let chosen: Vec<usize> = recommendation
            .choice
            .iter()
            .filter_map(|id| digraph.node_index(id.as_str()))
            .collect();
        if chosen.is_empty() {
            break;
        }
        remaining.retain(|x| !chosen.contains(x));
        let mut members = recommendation.choice;
        members.sort_by_key(|id| digraph.node_index(id.as_str()));
        tracing::debug!(?kind, step = steps.len() + 1, members = members.len(), "choice extracted");
        steps.push(RankingStep {
            credibility: recommendation.credibility,
            members,
        });
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::digraph::graph::tests::digraph;
    use rust_decimal_macros::dec;

    fn ids(names: &[&str]) -> Vec<ActionId> {
        names.iter().map(|n| ActionId::new(*n).unwrap()).collect()
    }

    #[test]
    fn dominance_chain_is_ranked_linearly() {
        let g = digraph(
            &["a", "b", "c"],
            &[
                &[dec!(-1), dec!(1), dec!(1)],
                &[dec!(-1), dec!(-1), dec!(1)],
                &[dec!(-1), dec!(-1), dec!(-1)],
            ],
        );
        let ranking = RankingByChoosing::compute(&g, &RankingSettings::default(), &ComputeContext::default()).unwrap();
        assert_eq!(ranking.best_order.classes, vec![ids(&["a"]), ids(&["b"]), ids(&["c"])]);
        assert_eq!(ranking.last_order.classes, vec![ids(&["a"]), ids(&["b"]), ids(&["c"])]);
        assert_eq!(ranking.fused_order.classes, vec![ids(&["a"]), ids(&["b"]), ids(&["c"])]);
        assert_eq!(ranking.correlation.correlation, dec!(1));
        assert!(ranking.diagnostics.is_empty());
    }

    #[test]
    fn indeterminate_relation_gives_one_class() {
        let g = digraph(
            &["a", "b", "c"],
            &[
                &[dec!(-1), dec!(0), dec!(0)],
                &[dec!(0), dec!(-1), dec!(0)],
                &[dec!(0), dec!(0), dec!(-1)],
            ],
        );
        let ranking = RankingByChoosing::compute(&g, &RankingSettings::default(), &ComputeContext::default()).unwrap();
        assert_eq!(ranking.fused_order.classes, vec![ids(&["a", "b", "c"])]);
    }

    #[test]
    fn three_cycle_is_tied_through_its_collapsed_node() {
        let g = digraph(
            &["a", "b", "c"],
            &[
                &[dec!(-1), dec!(0.3), dec!(-0.3)],
                &[dec!(-0.3), dec!(-1), dec!(0.3)],
                &[dec!(0.3), dec!(-0.3), dec!(-1)],
            ],
        );
        let ranking = RankingByChoosing::compute(&g, &RankingSettings::default(), &ComputeContext::default()).unwrap();
        assert_eq!(ranking.best_steps.len(), 1);
        assert_eq!(ranking.fused_order.classes, vec![ids(&["a", "b", "c"])]);
    }
}
