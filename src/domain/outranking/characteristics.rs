//! Precomputed local characteristics for every ordered pair and criterion.

use rayon::prelude::*;
use rust_decimal::Decimal;

use super::{ConcordanceKind, LocalCharacteristic};
use crate::domain::foundation::{ComputeContext, OutrankingError, Precision};
use crate::domain::performance::PerformanceTableau;
use crate::domain::valuation::{omax, ValuationDomain};

/// Local characteristics indexed `[x][y][criterion]`; `None` marks missing data.
#[derive(Debug, Clone)]
pub(crate) struct CharacteristicTable {
    cells: Vec<Vec<Vec<Option<LocalCharacteristic>>>>,
}

impl CharacteristicTable {
    /// Computes the table row by row in parallel; rows are collected in order.
    pub fn compute(
        tableau: &PerformanceTableau,
        kind: ConcordanceKind,
        ctx: &ComputeContext,
    ) -> Result<Self, OutrankingError> {
        let order = tableau.action_count();
        let criteria = tableau.criterion_count();
        let precision = ctx.precision;
        let cells = (0..order)
            .into_par_iter()
            .map(|x| {
                ctx.check()?;
                Ok((0..order)
                    .map(|y| {
                        if x == y {
                            return Vec::new();
                        }
                        (0..criteria)
                            .map(|g| LocalCharacteristic::compute(tableau, g, x, y, kind, precision).ok())
                            .collect()
                    })
                    .collect())
            })
            .collect::<Result<Vec<_>, OutrankingError>>()?;
        Ok(Self { cells })
    }

    /// Characteristics of the ordered pair (x, y); empty on the diagonal.
    pub fn pair(&self, x: usize, y: usize) -> &[Option<LocalCharacteristic>] {
        &self.cells[x][y]
    }

    pub fn order(&self) -> usize {
        self.cells.len()
    }
}

/// Weighted concordance `sum of w * lc` over present characteristics.
pub(crate) fn weighted_concordance(pair: &[Option<LocalCharacteristic>], weights: &[Decimal]) -> Decimal {
    pair.iter()
        .zip(weights)
        .filter_map(|(c, w)| c.map(|c| c.concordance * *w))
        .sum()
}

/// Bipolar credibility before vetoes: the concordance mapped onto `domain`.
pub(crate) fn bipolar_concordance_value(
    pair: &[Option<LocalCharacteristic>],
    weights: &[Decimal],
    total_weight: Decimal,
    domain: &ValuationDomain,
    precision: Precision,
) -> Decimal {
    let concordance = weighted_concordance(pair, weights);
    domain.med() + precision.divide(concordance * domain.amplitude(), total_weight)
}

/// Bipolar credibility: o-max of the concordance with asserted vetoes (Min)
/// and counter-vetoes (Max).
pub(crate) fn bipolar_value(
    pair: &[Option<LocalCharacteristic>],
    weights: &[Decimal],
    total_weight: Decimal,
    domain: &ValuationDomain,
    precision: Precision,
) -> Decimal {
    let r0 = bipolar_concordance_value(pair, weights, total_weight, domain, precision);
    let vetoes = pair.iter().flatten().filter_map(|c| {
        if c.is_veto() {
            Some(domain.min())
        } else if c.is_counter_veto() {
            Some(domain.max())
        } else {
            None
        }
    });
    omax(domain.med(), std::iter::once(r0).chain(vetoes))
}

/// Unipolar Electre III concordance in [0, 1]; missing data counts 1/2.
pub(crate) fn electre_concordance_value(
    pair: &[Option<LocalCharacteristic>],
    weights: &[Decimal],
    total_weight: Decimal,
    precision: Precision,
) -> Decimal {
    let half = Decimal::ONE / Decimal::TWO;
    let sum: Decimal = pair
        .iter()
        .zip(weights)
        .map(|(c, w)| match c {
            Some(c) => (c.concordance + Decimal::ONE) * half * *w,
            None => half * *w,
        })
        .sum();
    precision.divide(sum, total_weight)
}

/// Electre III credibility: concordance discounted by discordances above it,
/// mapped onto `domain`.
pub(crate) fn electre_value(
    pair: &[Option<LocalCharacteristic>],
    weights: &[Decimal],
    total_weight: Decimal,
    domain: &ValuationDomain,
    precision: Precision,
) -> Decimal {
    let concordance = electre_concordance_value(pair, weights, total_weight, precision);
    let mut credibility = concordance;
    for c in pair.iter().flatten() {
        let discordance = (c.veto + Decimal::ONE) / Decimal::TWO;
        if discordance <= concordance {
            continue;
        }
        if discordance == Decimal::ONE {
            credibility = Decimal::ZERO;
            break;
        }
        credibility = precision.round(
            credibility * (Decimal::ONE - discordance) / (Decimal::ONE - concordance),
        );
    }
    precision.round(domain.min() + credibility * (domain.max() - domain.min()))
}
