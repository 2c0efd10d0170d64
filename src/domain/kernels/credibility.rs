//! Credibility of a choice as a kernel.

use rust_decimal::Decimal;

use super::KernelKind;
use crate::domain::digraph::BipolarDigraph;
use crate::domain::valuation::{omax, omin};

impl BipolarDigraph {
    /// Internal stability strength: o-min of `¬r(x, y)` over distinct members.
    ///
    /// `None` for choices of fewer than two nodes.
    pub fn internal_stability(&self, choice: &[usize]) -> Option<Decimal> {
        let domain = self.domain();
        let values: Vec<Decimal> = choice
            .iter()
            .flat_map(|&x| choice.iter().filter(move |&&y| y != x).map(move |&y| (x, y)))
            .map(|(x, y)| domain.negate(self.value(x, y)))
            .collect();
        (!values.is_empty()).then(|| omin(domain.med(), values))
    }

    /// External stability strength: o-min over outsiders `z` of the o-max
    /// of their coverage by the choice.
    ///
    /// `None` when the choice holds every node.
    pub fn external_stability(&self, choice: &[usize], kind: KernelKind) -> Option<Decimal> {
        let med = self.domain().med();
        let values: Vec<Decimal> = (0..self.order())
            .filter(|z| !choice.contains(z))
            .map(|z| {
                omax(
                    med,
                    choice.iter().map(|&x| match kind {
                        KernelKind::Dominant => self.value(x, z),
                        KernelKind::Absorbent => self.value(z, x),
                    }),
                )
            })
            .collect();
        (!values.is_empty()).then(|| omin(med, values))
    }

    /// O-min of internal and external stability; Max when both are vacuous.
    pub fn choice_credibility(&self, choice: &[usize], kind: KernelKind) -> Decimal {
        let parts: Vec<Decimal> = [self.internal_stability(choice), self.external_stability(choice, kind)]
            .into_iter()
            .flatten()
            .collect();
        if parts.is_empty() {
            return self.domain().max();
        }
        omin(self.domain().med(), parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::digraph::graph::tests::digraph;
    use rust_decimal_macros::dec;

    fn sample() -> BipolarDigraph {
        digraph(
            &["a", "b", "c"],
            &[
                &[dec!(-1), dec!(0.6), dec!(-0.2)],
                &[dec!(-0.6), dec!(-1), dec!(0.4)],
                &[dec!(-0.8), dec!(0), dec!(-1)],
            ],
        )
    }

    #[test]
    fn credibility_is_the_weaker_stability() {
        let g = sample();
        // internal: not r(a,c) = 0.2, not r(c,a) = 0.8; external: r(a,b) = 0.6.
        assert_eq!(g.internal_stability(&[0, 2]), Some(dec!(0.2)));
        assert_eq!(g.external_stability(&[0, 2], KernelKind::Dominant), Some(dec!(0.6)));
        assert_eq!(g.choice_credibility(&[0, 2], KernelKind::Dominant), dec!(0.2));
    }

    #[test]
    fn vacuous_parts_are_skipped() {
        let g = sample();
        assert_eq!(g.internal_stability(&[0]), None);
        // not r(a, b) = -0.6 conflicts with not r(a, c) = 0.2.
        assert_eq!(g.choice_credibility(&[0, 1, 2], KernelKind::Dominant), dec!(0));
        let single = digraph(&["a"], &[&[dec!(-1)]]);
        assert_eq!(single.choice_credibility(&[0], KernelKind::Dominant), dec!(1));
    }

    #[test]
    fn uncovered_outsider_denies_the_choice() {
        let g = digraph(&["a", "b"], &[&[dec!(-1), dec!(-0.4)], &[dec!(-0.7), dec!(-1)]]);
        assert_eq!(g.choice_credibility(&[1], KernelKind::Dominant), dec!(-0.7));
    }
}
