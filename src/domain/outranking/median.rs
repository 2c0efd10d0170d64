//! Weighted quantile aggregation of local characteristics.

use rust_decimal::Decimal;

use super::LocalCharacteristic;
use crate::domain::foundation::Precision;
use crate::domain::valuation::ValuationDomain;

/// Weighted `quantile` of the local concordances of a pair, bounded above
/// by the negated strongest veto.
///
/// Missing characteristics count as 0 with their full weight; criteria of
/// zero weight are ignored. When the cumulative weight hits the target
/// exactly, the two neighbouring values are averaged.
pub(crate) fn median_value(
    pair: &[Option<LocalCharacteristic>],
    weights: &[Decimal],
    quantile: Decimal,
    domain: &ValuationDomain,
    precision: Precision,
) -> Decimal {
    let mut weighted: Vec<(Decimal, Decimal)> = pair
        .iter()
        .zip(weights)
        .filter(|(_, w)| **w > Decimal::ZERO)
        .map(|(c, w)| (c.map_or(Decimal::ZERO, |c| c.concordance), *w))
        .collect();
    weighted.sort_by(|a, b| a.0.cmp(&b.0));

    let total: Decimal = weighted.iter().map(|(_, w)| *w).sum();
    let target = quantile * total;
    let mut cumulative = Decimal::ZERO;
    let mut value = Decimal::ZERO;
    for (i, (c, w)) in weighted.iter().enumerate() {
        cumulative += *w;
        if cumulative > target {
            value = *c;
            break;
        }
        if cumulative == target {
            value = match weighted.get(i + 1) {
                Some((next, _)) => (*c + *next) / Decimal::TWO,
                None => *c,
            };
            break;
        }
    }

    let strongest_veto = pair
        .iter()
        .flatten()
        .map(|c| c.veto)
        .max()
        .unwrap_or(Decimal::NEGATIVE_ONE);
    let bounded = value.min(-strongest_veto);
    precision.round(domain.denormalize(bounded))
}
