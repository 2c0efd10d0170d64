//! Weak orders: ordered equivalence classes of actions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::digraph::BipolarDigraph;
use crate::domain::foundation::{ActionId, OutrankingError, Precision};
use crate::domain::valuation::{OrdinalCorrelation, ValuationDomain};

/// A complete preorder, best class first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeakOrder {
    pub classes: Vec<Vec<ActionId>>,
}

impl WeakOrder {
    /// Creates a weak order from classes listed best first; empty classes are dropped.
    pub fn new(classes: Vec<Vec<ActionId>>) -> Self {
        Self {
            classes: classes.into_iter().filter(|c| !c.is_empty()).collect(),
        }
    }

    /// Groups `ids` by equal score, highest score first.
    pub fn from_scores<T: Ord + Copy>(ids: &[Vec<ActionId>], scores: &[T]) -> Self {
        let mut order: Vec<usize> = (0..ids.len()).collect();
        order.sort_by(|&x, &y| scores[y].cmp(&scores[x]).then(x.cmp(&y)));
        let mut classes: Vec<Vec<ActionId>> = Vec::new();
        let mut previous: Option<T> = None;
        for x in order {
            match (previous, classes.last_mut()) {
                (Some(p), Some(class)) if p == scores[x] => class.extend(ids[x].iter().cloned()),
                _ => classes.push(ids[x].clone()),
            }
            previous = Some(scores[x]);
        }
        Self::new(classes)
    }

    /// Peels the classes of a relation: each class holds the remaining
    /// actions not outranked at Max by any other remaining action.
    ///
    /// When every remaining action is outranked, the actions of highest
    /// net flow on the remaining sub-relation form the class.
    pub fn from_relation(digraph: &BipolarDigraph) -> Self {
        let max = digraph.domain().max();
        let mut remaining: Vec<usize> = (0..digraph.order()).collect();
        let mut classes = Vec::new();
        while !remaining.is_empty() {
            let mut class: Vec<usize> = remaining
                .iter()
                .copied()
                .filter(|&x| !remaining.iter().any(|&y| y != x && digraph.value(y, x) == max))
                .collect();
            if class.is_empty() {
                let flows = digraph.restricted(&remaining).net_flows();
                let best = flows.iter().max().copied().unwrap_or(Decimal::ZERO);
                class = remaining
                    .iter()
                    .zip(&flows)
                    .filter(|(_, f)| **f == best)
                    .map(|(x, _)| *x)
                    .collect();
            }
            remaining.retain(|x| !class.contains(x));
            classes.push(digraph.expand(&class));
        }
        Self::new(classes)
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Class index of every action.
    pub fn ranks(&self) -> HashMap<&str, usize> {
        self.classes
            .iter()
            .enumerate()
            .flat_map(|(rank, class)| class.iter().map(move |id| (id.as_str(), rank)))
            .collect()
    }

    /// Class index of one action.
    pub fn rank_of(&self, id: &str) -> Option<usize> {
        self.classes
            .iter()
            .position(|class| class.iter().any(|a| a.as_str() == id))
    }

    /// Actions from best to worst.
    pub fn actions(&self) -> Vec<ActionId> {
        self.classes.iter().flatten().cloned().collect()
    }

    /// Classes listed worst first.
    pub fn reversed(&self) -> Self {
        Self::new(self.classes.iter().rev().cloned().collect())
    }

    /// The relation of this order on `domain`: Max above, Min below, Med within a class.
    pub fn to_digraph(&self, name: impl Into<String>, domain: ValuationDomain) -> Result<BipolarDigraph, OutrankingError> {
        let actions = self.actions();
        let ranks = self.ranks();
        let rank = |id: &ActionId| ranks.get(id.as_str()).copied().unwrap_or(usize::MAX);
        let relation = actions
            .iter()
            .enumerate()
            .map(|(i, x)| {
                actions
                    .iter()
                    .enumerate()
                    .map(|(j, y)| {
                        if i == j {
                            domain.min()
                        } else {
                            match rank(x).cmp(&rank(y)) {
                                std::cmp::Ordering::Less => domain.max(),
                                std::cmp::Ordering::Greater => domain.min(),
                                std::cmp::Ordering::Equal => domain.med(),
                            }
                        }
                    })
                    .collect()
            })
            .collect();
        BipolarDigraph::from_actions(name, domain, actions, relation)
    }

    /// Ordinal correlation between `source` and the relation of this order.
    pub fn correlation_with(
        &self,
        source: &BipolarDigraph,
        precision: Precision,
    ) -> Result<OrdinalCorrelation, OutrankingError> {
        let order = self.to_digraph("weak-order", *source.domain())?;
        source.correlation(&order, precision)
    }
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
    fn scores_group_ties() {
        let singletons: Vec<Vec<ActionId>> = ids(&["a", "b", "c"]).into_iter().map(|a| vec![a]).collect();
        let order = WeakOrder::from_scores(&singletons, &[1, 3, 1]);
        assert_eq!(order.classes, vec![ids(&["b"]), ids(&["a", "c"])]);
        assert_eq!(order.rank_of("c"), Some(1));
    }

    #[test]
    fn relation_of_a_weak_order() {
        let order = WeakOrder::new(vec![ids(&["a"]), ids(&["b", "c"])]);
        let g = order.to_digraph("o", ValuationDomain::bipolar()).unwrap();
        assert_eq!(g.credibility("a", "b"), Some(dec!(1)));
        assert_eq!(g.credibility("c", "a"), Some(dec!(-1)));
        assert_eq!(g.credibility("b", "c"), Some(dec!(0)));
        assert_eq!(g.credibility("b", "b"), Some(dec!(-1)));
    }

    #[test]
    fn peeling_recovers_a_linear_order() {
        let g = digraph(
            &["a", "b", "c"],
            &[
                &[dec!(-1), dec!(1), dec!(1)],
                &[dec!(-1), dec!(-1), dec!(1)],
                &[dec!(-1), dec!(-1), dec!(-1)],
            ],
        );
        let order = WeakOrder::from_relation(&g);
        assert_eq!(order.classes, vec![ids(&["a"]), ids(&["b"]), ids(&["c"])]);
        let tau = order.correlation_with(&g, Precision::default()).unwrap();
        assert_eq!(tau.correlation, dec!(1));
    }

    #[test]
    fn cycles_fall_back_to_net_flows() {
        let g = digraph(
            &["a", "b", "c"],
            &[
                &[dec!(-1), dec!(1), dec!(-1)],
                &[dec!(-1), dec!(-1), dec!(1)],
                &[dec!(1), dec!(-1), dec!(-1)],
            ],
        );
        let order = WeakOrder::from_relation(&g);
        assert_eq!(order.classes, vec![ids(&["a", "b", "c"])]);
    }
}
