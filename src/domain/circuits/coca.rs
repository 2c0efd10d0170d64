//! Coca digraphs: odd chordless circuits collapsed into fictive nodes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::ChordlessCircuit;
use crate::domain::digraph::{BipolarDigraph, DigraphNode};
use crate::domain::foundation::{ActionId, ComputeContext, OutrankingError};
use crate::domain::valuation::omax;

/// Result of the collapsing procedure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CocaDigraph {
    pub digraph: BipolarDigraph,
    /// Odd circuits collapsed, in collapse order, on the digraph of their round.
    pub collapsed: Vec<ChordlessCircuit>,
    pub rounds: usize,
}

impl BipolarDigraph {
    /// Repeatedly collapses disjoint odd chordless circuits until none remain.
    ///
    /// Each fictive node `~cc<k>` stands for the original actions of its
    /// members; its credibilities are the o-max of its members' credibilities.
    ///
    /// # Errors
    ///
    /// - `CircuitEnumerationOverflow` when a round finds more than `cap` circuits
    /// - `Cancelled` when the context is cancelled
    pub fn coca(&self, cap: usize, ctx: &ComputeContext) -> Result<CocaDigraph, OutrankingError> {
        let mut current = self.clone();
        let mut collapsed = Vec::new();
        let mut rounds = 0;
        let mut counter = 0usize;
        loop {
            let odd = current.odd_chordless_circuits(cap, ctx)?;
            if odd.is_empty() {
                break;
            }
            rounds += 1;
            let mut used = HashSet::new();
            let selected: Vec<ChordlessCircuit> = odd
                .into_iter()
                .filter(|c| {
                    if c.nodes.iter().any(|x| used.contains(x)) {
                        return false;
                    }
                    used.extend(c.nodes.iter().copied());
                    true
                })
                .collect();
            current = current.collapse(&selected, &mut counter)?;
            tracing::debug!(round = rounds, collapsed = selected.len(), order = current.order(), "coca round");
            collapsed.extend(selected);
        }
        Ok(CocaDigraph {
            digraph: current,
            collapsed,
            rounds,
        })
    }

    /// Replaces each circuit by one fictive node; untouched nodes keep their order.
    fn collapse(&self, circuits: &[ChordlessCircuit], counter: &mut usize) -> Result<Self, OutrankingError> {
        let in_circuit: HashSet<usize> = circuits.iter().flat_map(|c| c.nodes.iter().copied()).collect();
        let mut groups: Vec<Vec<usize>> = (0..self.order())
            .filter(|x| !in_circuit.contains(x))
            .map(|x| vec![x])
            .collect();
        let mut nodes: Vec<DigraphNode> = groups.iter().map(|g| self.nodes()[g[0]].clone()).collect();

        let mut taken: HashSet<String> = self.nodes().iter().map(|n| n.id.to_string()).collect();
        for circuit in circuits {
            let id = loop {
                *counter += 1;
                let candidate = format!("~cc{}", counter);
                if taken.insert(candidate.clone()) {
                    break candidate;
                }
            };
            let members: Vec<ActionId> = self.expand(&circuit.nodes);
            nodes.push(DigraphNode::fictive(ActionId::new(id)?, members));
            groups.push(circuit.nodes.clone());
        }

        let domain = *self.domain();
        let relation: Vec<Vec<Decimal>> = groups
            .iter()
            .enumerate()
            .map(|(i, from)| {
                groups
                    .iter()
                    .enumerate()
                    .map(|(j, to)| {
                        if i == j {
                            return domain.min();
                        }
                        omax(
                            domain.med(),
                            from.iter().flat_map(|&x| to.iter().map(move |&y| self.value(x, y))),
                        )
                    })
                    .collect()
            })
            .collect();
        BipolarDigraph::new(format!("coca-{}", self.name()), domain, nodes, relation)
    }
}

#[cfg(test)]
mod tests {
    use super::super::DEFAULT_CIRCUIT_CAP;
    use super::*;
    use crate::domain::digraph::graph::tests::digraph;
    use rust_decimal_macros::dec;

    #[test]
    fn three_cycle_collapses_into_one_fictive_node() {
        let g = digraph(
            &["a", "b", "c"],
            &[
                &[dec!(-1), dec!(0.3), dec!(-0.3)],
                &[dec!(-0.3), dec!(-1), dec!(0.3)],
                &[dec!(0.3), dec!(-0.3), dec!(-1)],
            ],
        );
        let coca = g.coca(DEFAULT_CIRCUIT_CAP, &ComputeContext::default()).unwrap();
        assert_eq!(coca.digraph.order(), 1);
        assert_eq!(coca.rounds, 1);
        let node = &coca.digraph.nodes()[0];
        assert!(node.is_fictive());
        assert_eq!(node.id.as_str(), "~cc1");
        assert_eq!(coca.digraph.expand(&[0]).len(), 3);
        assert!(coca.digraph.covers_originals_once());
    }

    #[test]
    fn outside_arcs_are_fused_with_omax() {
        let g = digraph(
            &["a", "b", "c", "d"],
            &[
                &[dec!(-1), dec!(0.3), dec!(-0.3), dec!(0.2)],
                &[dec!(-0.3), dec!(-1), dec!(0.3), dec!(0.8)],
                &[dec!(0.3), dec!(-0.3), dec!(-1), dec!(0)],
                &[dec!(-0.2), dec!(-0.8), dec!(0), dec!(-1)],
            ],
        );
        let coca = g.coca(DEFAULT_CIRCUIT_CAP, &ComputeContext::default()).unwrap();
        assert_eq!(coca.digraph.order(), 2);
        assert_eq!(coca.digraph.nodes()[0].id.as_str(), "d");
        assert_eq!(coca.digraph.value(1, 0), dec!(0.8));
        assert_eq!(coca.digraph.value(0, 1), dec!(-0.8));
    }

    #[test]
    fn conflicting_member_arcs_fuse_to_med() {
        let g = digraph(
            &["a", "b", "c", "d"],
            &[
                &[dec!(-1), dec!(0.3), dec!(-0.3), dec!(0.2)],
                &[dec!(-0.3), dec!(-1), dec!(0.3), dec!(-0.4)],
                &[dec!(0.3), dec!(-0.3), dec!(-1), dec!(0)],
                &[dec!(-0.2), dec!(0.4), dec!(0), dec!(-1)],
            ],
        );
        let coca = g.coca(DEFAULT_CIRCUIT_CAP, &ComputeContext::default()).unwrap();
        assert_eq!(coca.digraph.value(1, 0), dec!(0));
    }

    #[test]
    fn acyclic_digraphs_are_unchanged() {
        let g = digraph(&["a", "b"], &[&[dec!(-1), dec!(1)], &[dec!(-1), dec!(-1)]]);
        let coca = g.coca(DEFAULT_CIRCUIT_CAP, &ComputeContext::default()).unwrap();
        assert_eq!(coca.rounds, 0);
        assert_eq!(coca.digraph.relation(), g.relation());
    }
}
