//! Property-based tests for the universal relation invariants.
//!
//! Random tableaux and random valued digraphs are generated with proptest;
//! every constructed relation must satisfy the algebraic laws below.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use bipolar_outranking::adapters::{format_tableau, parse_tableau};
use bipolar_outranking::domain::digraph::BipolarDigraph;
use bipolar_outranking::domain::foundation::{ActionId, ComputeContext, CriterionId, Precision};
use bipolar_outranking::domain::kernels::{KernelKind, DEFAULT_STEP_BUDGET};
use bipolar_outranking::domain::outranking::{OutrankingConstructor, OutrankingStrategy};
use bipolar_outranking::domain::performance::{
    Action, Criterion, Evaluation, PerformanceTableau, Threshold, ThresholdKind,
};
use bipolar_outranking::domain::valuation::ValuationDomain;

// =============================================================================
// Generators
// =============================================================================

const ACTIONS: [&str; 5] = ["a", "b", "c", "d", "e"];

/// Evaluation grid `rows[x][g]`; `None` is a missing evaluation.
fn grid(missing: bool) -> impl Strategy<Value = Vec<Vec<Option<u8>>>> {
    let cell = if missing {
        prop::option::weighted(0.85, 0u8..=100).boxed()
    } else {
        (0u8..=100).prop_map(Some).boxed()
    };
    (2usize..=5, 1usize..=3).prop_flat_map(move |(actions, criteria)| {
        prop::collection::vec(prop::collection::vec(cell.clone(), criteria), actions)
    })
}

fn weights(criteria: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(1u8..=5, criteria)
}

fn build(rows: &[Vec<Option<u8>>], weights: &[u8], veto: Option<u8>) -> PerformanceTableau {
    let criteria: Vec<Criterion> = weights
        .iter()
        .enumerate()
        .map(|(g, w)| {
            let c = Criterion::new(CriterionId::new(format!("g{}", g)).unwrap()).with_weight(Decimal::from(*w));
            match veto {
                Some(v) => c.with_threshold(ThresholdKind::Veto, Threshold::constant(Decimal::from(v))),
                None => c,
            }
        })
        .collect();
    let mut builder = PerformanceTableau::builder().name("random");
    for c in &criteria {
        builder = builder.criterion(c.clone());
    }
    for (x, row) in rows.iter().enumerate() {
        builder = builder.action(Action::new(ActionId::new(ACTIONS[x]).unwrap()));
        for (c, cell) in criteria.iter().zip(row) {
            let evaluation = match cell {
                Some(v) => Evaluation::Value(Decimal::from(*v)),
                None => Evaluation::Missing,
            };
            builder = builder.evaluation(&c.id, ACTIONS[x], evaluation);
        }
    }
    builder.build().unwrap()
}

fn construct(t: &PerformanceTableau, strategy: &OutrankingStrategy) -> BipolarDigraph {
    OutrankingConstructor::construct(t, strategy, &ComputeContext::default())
        .unwrap()
        .digraph
}

/// Random relation on `n` actions with off-diagonal values from `levels`.
fn relation(levels: &'static [Decimal]) -> impl Strategy<Value = BipolarDigraph> {
    (2usize..=6).prop_flat_map(move |n| {
        prop::collection::vec(prop::sample::select(levels), n * n).prop_map(move |cells| {
            let rows = (0..n)
                .map(|x| (0..n).map(|y| if x == y { dec!(-1) } else { cells[x * n + y] }).collect())
                .collect();
            let ids = (0..n).map(|x| ActionId::new(format!("x{}", x)).unwrap()).collect();
            BipolarDigraph::from_actions("random", ValuationDomain::bipolar(), ids, rows).unwrap()
        })
    })
}

const DETERMINED: &[Decimal] = &[dec!(-1), dec!(-0.5), dec!(0.5), dec!(1)];
const ANY_LEVEL: &[Decimal] = &[dec!(-1), dec!(-0.5), dec!(0), dec!(0.5), dec!(1)];

// =============================================================================
// Construction Properties
// =============================================================================

proptest! {
    /// Diagonal is Min and every credibility lies in the domain
    #[test]
    fn prop_diagonal_and_range(rows in grid(true), seed_weights in weights(3)) {
        let t = build(&rows, &seed_weights[..rows[0].len()], None);
        for strategy in [OutrankingStrategy::BipolarStandard, OutrankingStrategy::BipolarInteger, OutrankingStrategy::Electre3] {
            let g = construct(&t, &strategy);
            let domain = *g.domain();
            for x in 0..g.order() {
                prop_assert_eq!(g.value(x, x), domain.min());
                for y in 0..g.order() {
                    prop_assert!(domain.contains(g.value(x, y)));
                }
            }
        }
    }

    /// Without vetoes the bipolar relation is skew-symmetric around Med
    #[test]
    fn prop_negation_symmetry(rows in grid(true), seed_weights in weights(3)) {
        let t = build(&rows, &seed_weights[..rows[0].len()], None);
        let g = construct(&t, &OutrankingStrategy::BipolarStandard);
        for x in 0..g.order() {
            for y in (0..g.order()).filter(|y| *y != x) {
                prop_assert_eq!(g.value(x, y) + g.value(y, x), Decimal::ZERO);
            }
        }
    }

    /// Raising the weight of a criterion won by x never lowers r(x, y)
    #[test]
    fn prop_monotone_in_concordance(rows in grid(false), seed_weights in weights(3), extra in 1u8..=5) {
        let criteria = rows[0].len();
        let base = build(&rows, &seed_weights[..criteria], None);
        let before = construct(&base, &OutrankingStrategy::BipolarStandard);
        for g in 0..criteria {
            let mut raised = seed_weights[..criteria].to_vec();
            raised[g] += extra;
            let after = construct(&build(&rows, &raised, None), &OutrankingStrategy::BipolarStandard);
            for x in 0..rows.len() {
                for y in (0..rows.len()).filter(|y| *y != x) {
                    if rows[x][g] > rows[y][g] {
                        prop_assert!(after.value(x, y) >= before.value(x, y));
                    }
                }
            }
        }
    }

    /// An active veto caps the bipolar credibility at Med
    #[test]
    fn prop_veto_caps_credibility(rows in grid(false), seed_weights in weights(3)) {
        let t = build(&rows, &seed_weights[..rows[0].len()], Some(40));
        let g = construct(&t, &OutrankingStrategy::BipolarStandard);
        for x in 0..rows.len() {
            for y in (0..rows.len()).filter(|y| *y != x) {
                let vetoed = rows[x].iter().zip(&rows[y]).any(|(ex, ey)| match (ex, ey) {
                    (Some(ex), Some(ey)) => i16::from(*ey) - i16::from(*ex) >= 40,
                    _ => false,
                });
                if vetoed {
                    prop_assert!(g.value(x, y) <= Decimal::ZERO);
                }
            }
        }
    }

    /// Both missing-data tokens yield the same relation
    #[test]
    fn prop_missing_tokens_are_interchangeable(rows in grid(true), seed_weights in weights(3)) {
        let t = build(&rows, &seed_weights[..rows[0].len()], None);
        let legacy = parse_tableau(&format_tableau(&t).replace("=NA", "=-999")).unwrap();
        let g = construct(&t, &OutrankingStrategy::BipolarStandard);
        let h = construct(&legacy, &OutrankingStrategy::BipolarStandard);
        prop_assert_eq!(g.relation(), h.relation());
    }
}

// =============================================================================
// Digraph Properties
// =============================================================================

proptest! {
    /// codual(codual(g)) = g
    #[test]
    fn prop_codual_involution(g in relation(ANY_LEVEL)) {
        let cc = g.codual().codual();
        prop_assert_eq!(cc.relation(), g.relation());
    }

    /// A relation without Med entries correlates +1 with itself and -1 with its negation
    #[test]
    fn prop_correlation_bounds(g in relation(DETERMINED)) {
        let precision = Precision::default();
        prop_assert_eq!(g.correlation(&g, precision).unwrap().correlation, Decimal::ONE);
        prop_assert_eq!(g.correlation(&g.negation(), precision).unwrap().correlation, Decimal::NEGATIVE_ONE);
    }

    /// Recoding onto another domain keeps the ordinal content
    #[test]
    fn prop_recoding_invariance(g in relation(DETERMINED)) {
        let precision = Precision::default();
        let recoded = g.recoded(ValuationDomain::new(dec!(0), dec!(10)).unwrap(), precision);
        prop_assert_eq!(g.correlation(&recoded, precision).unwrap().correlation, Decimal::ONE);
    }

    /// Dominant kernels are internally and externally stable
    #[test]
    fn prop_kernel_stability(g in relation(ANY_LEVEL)) {
        let kernels = g.kernels(KernelKind::Dominant, DEFAULT_STEP_BUDGET, &ComputeContext::default()).unwrap();
        for kernel in &kernels {
            for &x in &kernel.nodes {
                for &y in kernel.nodes.iter().filter(|y| **y != x) {
                    prop_assert!(g.value(x, y) <= Decimal::ZERO);
                }
            }
            for z in (0..g.order()).filter(|z| !kernel.nodes.contains(z)) {
                prop_assert!(kernel.nodes.iter().any(|&x| g.value(x, z) > Decimal::ZERO));
            }
        }
    }
}
