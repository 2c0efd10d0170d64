//! Structural metrics and scores of a bipolar digraph.

use rust_decimal::Decimal;

use super::BipolarDigraph;
use crate::domain::foundation::Precision;

impl BipolarDigraph {
    /// Number of arcs of the median cut.
    pub fn size(&self) -> usize {
        self.gamma().iter().map(|g| g.dominant.len()).sum()
    }

    /// Mean departure of off-diagonal credibilities from Med, normalized onto [0, 1].
    pub fn determinateness(&self, precision: Precision) -> Decimal {
        let order = self.order();
        if order < 2 {
            return Decimal::ZERO;
        }
        let med = self.domain().med();
        let mut total = Decimal::ZERO;
        for x in 0..order {
            for y in 0..order {
                if x != y {
                    total += (self.value(x, y) - med).abs();
                }
            }
        }
        let pairs = Decimal::from(order * (order - 1));
        precision.divide(total, pairs * self.domain().amplitude())
    }

    /// Share of median-cut arcs whose converse arc is present.
    pub fn symmetry_degree(&self, precision: Precision) -> Decimal {
        let gamma = self.gamma();
        let arcs = self.size();
        let symmetric = (0..self.order())
            .flat_map(|x| gamma[x].dominant.iter().map(move |&y| (x, y)))
            .filter(|&(x, y)| self.arc(y, x))
            .count();
        precision.divide(Decimal::from(symmetric), Decimal::from(arcs))
    }

    /// Share of median-cut paths x -> y -> z (x != z) closed by an arc x -> z.
    ///
    /// A digraph without such paths is fully transitive.
    pub fn transitivity_degree(&self, precision: Precision) -> Decimal {
        let gamma = self.gamma();
        let mut paths = 0u64;
        let mut closed = 0u64;
        for x in 0..self.order() {
            for &y in &gamma[x].dominant {
                for &z in &gamma[y].dominant {
                    if z == x {
                        continue;
                    }
                    paths += 1;
                    if self.arc(x, z) {
                        closed += 1;
                    }
                }
            }
        }
        if paths == 0 {
            return Decimal::ONE;
        }
        precision.divide(Decimal::from(closed), Decimal::from(paths))
    }

    /// Net flows: `sum over y != x of r(x, y) - r(y, x)`.
    pub fn net_flows(&self) -> Vec<Decimal> {
        (0..self.order())
            .map(|x| {
                (0..self.order())
                    .filter(|&y| y != x)
                    .map(|y| self.value(x, y) - self.value(y, x))
                    .sum()
            })
            .collect()
    }

    /// Copeland scores: strict median-cut wins minus strict losses.
    pub fn copeland_scores(&self) -> Vec<i64> {
        (0..self.order())
            .map(|x| {
                (0..self.order())
                    .filter(|&y| y != x)
                    .map(|y| match (self.arc(x, y), self.arc(y, x)) {
                        (true, false) => 1,
                        (false, true) => -1,
                        _ => 0,
                    })
                    .sum()
            })
            .collect()
    }
}
