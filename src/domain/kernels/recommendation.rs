//! Best and worst choice recommendations with a heuristic fallback.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Kernel, KernelKind};
use crate::domain::digraph::BipolarDigraph;
use crate::domain::foundation::{ActionId, ComputeContext, Diagnostic, ErrorCode, OutrankingError};

/// The recommended choice and the evidence behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceRecommendation {
    pub kind: KernelKind,
    /// Sorted node indices of the chosen nodes.
    pub nodes: Vec<usize>,
    /// Original actions of the choice.
    pub choice: Vec<ActionId>,
    pub credibility: Decimal,
    /// All kernels found; empty when the heuristic was used.
    pub kernels: Vec<Kernel>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ChoiceRecommendation {
    /// True when the choice comes from the heuristic fallback.
    pub fn is_degraded(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

impl BipolarDigraph {
    /// Dominant kernel of maximal credibility.
    pub fn best_choice(&self, budget: u64, ctx: &ComputeContext) -> Result<ChoiceRecommendation, OutrankingError> {
        self.recommend(KernelKind::Dominant, budget, ctx)
    }

    /// Absorbent kernel of maximal credibility.
    pub fn worst_choice(&self, budget: u64, ctx: &ComputeContext) -> Result<ChoiceRecommendation, OutrankingError> {
        self.recommend(KernelKind::Absorbent, budget, ctx)
    }

    /// Kernel of maximal credibility, ties broken by the smallest node list.
    ///
    /// When enumeration times out or no kernel exists, a greedy independent
    /// choice ordered by net flows is returned with a diagnostic.
    ///
    /// # Errors
    ///
    /// `Cancelled` when the context is cancelled; every other failure degrades.
    pub fn recommend(
        &self,
        kind: KernelKind,
        budget: u64,
        ctx: &ComputeContext,
    ) -> Result<ChoiceRecommendation, OutrankingError> {
        let diagnostic = match self.kernels(kind, budget, ctx) {
            Ok(kernels) => {
                let best = kernels
                    .iter()
                    .enumerate()
                    .max_by(|(_, a), (_, b)| {
                        a.credibility.cmp(&b.credibility).then_with(|| b.nodes.cmp(&a.nodes))
                    })
                    .map(|(i, _)| i);
                if let Some(i) = best {
                    let kernel = &kernels[i];
                    return Ok(ChoiceRecommendation {
                        kind,
                        nodes: kernel.nodes.clone(),
                        choice: kernel.members.clone(),
                        credibility: kernel.credibility,
                        diagnostics: Vec::new(),
                        kernels,
                    });
                }
                Diagnostic::new(ErrorCode::NoKernel, format!("digraph '{}' admits no {:?} kernel", self.name(), kind))
            }
            Err(OutrankingError::Cancelled) => return Err(OutrankingError::Cancelled),
            Err(error) => Diagnostic::from_error(&error),
        };

        tracing::warn!(digraph = self.name(), %diagnostic, "falling back to net flows choice");
        let nodes = self.greedy_choice(kind);
        Ok(ChoiceRecommendation {
            kind,
            choice: self.expand(&nodes),
            credibility: self.choice_credibility(&nodes, kind),
            nodes,
            kernels: Vec::new(),
            diagnostics: vec![diagnostic],
        })
    }

    /// Greedy maximal independent choice scanning nodes by net flows.
    fn greedy_choice(&self, kind: KernelKind) -> Vec<usize> {
        let flows = self.net_flows();
        let mut order: Vec<usize> = (0..self.order()).collect();
        order.sort_by(|&x, &y| match kind {
            KernelKind::Dominant => flows[y].cmp(&flows[x]).then(x.cmp(&y)),
            KernelKind::Absorbent => flows[x].cmp(&flows[y]).then(x.cmp(&y)),
        });
        let mut chosen: Vec<usize> = Vec::new();
        for x in order {
            if chosen.iter().all(|&y| !self.arc(x, y) && !self.arc(y, x)) {
                chosen.push(x);
            }
        }
        chosen.sort_unstable();
        chosen
    }
}

#[cfg(test)]
mod tests {
    use super::super::DEFAULT_STEP_BUDGET;
    use super::*;
    use crate::domain::digraph::graph::tests::digraph;
    use rust_decimal_macros::dec;

    #[test]
    fn picks_the_most_credible_kernel() {
        // a <-> b at different strengths, both dominate c.
        let g = digraph(
            &["a", "b", "c"],
            &[
                &[dec!(-1), dec!(0.2), dec!(0.9)],
                &[dec!(0.6), dec!(-1), dec!(0.9)],
                &[dec!(-1), dec!(-1), dec!(-1)],
            ],
        );
        let rec = g.best_choice(DEFAULT_STEP_BUDGET, &ComputeContext::default()).unwrap();
        assert_eq!(rec.kernels.len(), 2);
        assert_eq!(rec.choice, vec![ActionId::new("b").unwrap()]);
        assert!(!rec.is_degraded());
    }

    #[test]
    fn odd_circuit_degrades_to_net_flows() {
        let g = digraph(
            &["a", "b", "c"],
            &[
                &[dec!(-1), dec!(0.8), dec!(-1)],
                &[dec!(-1), dec!(-1), dec!(0.4)],
                &[dec!(0.4), dec!(-1), dec!(-1)],
            ],
        );
        let rec = g.best_choice(DEFAULT_STEP_BUDGET, &ComputeContext::default()).unwrap();
        assert!(rec.is_degraded());
        assert_eq!(rec.diagnostics[0].code, ErrorCode::NoKernel);
        assert_eq!(rec.nodes, vec![0]);
    }

    #[test]
    fn timeout_degrades_with_its_own_code() {
        let g = digraph(&["a", "b"], &[&[dec!(-1), dec!(1)], &[dec!(-1), dec!(-1)]]);
        let rec = g.worst_choice(1, &ComputeContext::default()).unwrap();
        assert_eq!(rec.diagnostics[0].code, ErrorCode::KernelEnumerationTimeout);
        assert_eq!(rec.nodes, vec![1]);
    }
}
