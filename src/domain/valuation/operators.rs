//! Epistemic operators on bipolar credibilities.
//!
//! All operators are expressed relative to the median `med` of the
//! valuation domain so they work unchanged on any symmetric domain.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ValuationDomain;
use crate::domain::foundation::Precision;

/// How credibilities between the two cut levels are treated by [`polarize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolarizationMode {
    /// Values between the cut levels become Med.
    #[default]
    Strict,
    /// Values between the cut levels are kept as they are.
    Soft,
}

/// Epistemic disjunction of a list of credibilities.
///
/// Med values are ignored. When the remaining values all lie on the same
/// side of Med, the extremum on that side is returned; conflicting signs
/// yield Med. An empty list also yields Med.
pub fn omax<I>(med: Decimal, values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    let mut highest: Option<Decimal> = None;
    let mut lowest: Option<Decimal> = None;
    for value in values {
        if value > med {
            highest = Some(highest.map_or(value, |h| h.max(value)));
        } else if value < med {
            lowest = Some(lowest.map_or(value, |l| l.min(value)));
        }
    }
    match (highest, lowest) {
        (Some(h), None) => h,
        (None, Some(l)) => l,
        _ => med,
    }
}

/// Epistemic conjunction of a list of credibilities.
///
/// Any Med value, or values of conflicting signs, yield Med. Otherwise the
/// value closest to Med on the common side is returned.
pub fn omin<I>(med: Decimal, values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    let mut closest_above: Option<Decimal> = None;
    let mut closest_below: Option<Decimal> = None;
    for value in values {
        if value > med {
            closest_above = Some(closest_above.map_or(value, |c| c.min(value)));
        } else if value < med {
            closest_below = Some(closest_below.map_or(value, |c| c.max(value)));
        } else {
            return med;
        }
    }
    match (closest_above, closest_below) {
        (Some(c), None) => c,
        (None, Some(c)) => c,
        _ => med,
    }
}

/// Epistemic polarization of `r` at cut level `level`.
///
/// Values at or above the level become Max, values at or below its
/// negation become Min. Levels below Med are treated as Med.
pub fn polarize(
    domain: &ValuationDomain,
    r: Decimal,
    level: Decimal,
    mode: PolarizationMode,
) -> Decimal {
    let level = level.max(domain.med()).min(domain.max());
    let lower = domain.negate(level);
    if level == domain.med() {
        return if r > domain.med() {
            domain.max()
        } else if r < domain.med() {
            domain.min()
        } else {
            domain.med()
        };
    }
    if r >= level {
        domain.max()
    } else if r <= lower {
        domain.min()
    } else {
        match mode {
            PolarizationMode::Strict => domain.med(),
            PolarizationMode::Soft => r,
        }
    }
}

/// Weighted average of credibilities sharing a common sign.
///
/// Med terms are skipped. When the remaining terms disagree in sign the
/// result is Med; otherwise it is the weighted mean of their departures
/// from Med, rounded to `precision`.
pub fn symmetric_average(
    med: Decimal,
    values: &[Decimal],
    weights: &[Decimal],
    precision: Precision,
) -> Decimal {
    let mut positive = false;
    let mut negative = false;
    let mut numerator = Decimal::ZERO;
    let mut denominator = Decimal::ZERO;
    for (index, value) in values.iter().enumerate() {
        let weight = weights.get(index).copied().unwrap_or(Decimal::ONE);
        if *value > med {
            positive = true;
        } else if *value < med {
            negative = true;
        } else {
            continue;
        }
        numerator += weight * (*value - med);
        denominator += weight;
    }
    if positive && negative {
        return med;
    }
    med + precision.divide(numerator, denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn omax_returns_extremum_of_common_sign() {
        assert_eq!(omax(dec!(0), [dec!(0.2), dec!(0.7), dec!(0)]), dec!(0.7));
        assert_eq!(omax(dec!(0), [dec!(-0.2), dec!(-0.9)]), dec!(-0.9));
    }

    #[test]
    fn omax_of_conflicting_signs_is_med() {
        assert_eq!(omax(dec!(0), [dec!(0.5), dec!(-0.1)]), dec!(0));
    }

    #[test]
    fn omax_absorbs_med_and_handles_empty_lists() {
        assert_eq!(omax(dec!(0), [dec!(0), dec!(0.3)]), dec!(0.3));
        assert_eq!(omax(dec!(0), Vec::<Decimal>::new()), dec!(0));
    }

    #[test]
    fn omax_is_commutative() {
        let values = [dec!(0.4), dec!(0.6), dec!(0.1)];
        let mut reversed = values;
        reversed.reverse();
        assert_eq!(omax(dec!(0), values), omax(dec!(0), reversed));
        assert_eq!(omax(dec!(0), [dec!(0.4), dec!(0.6), dec!(-0.2)]), dec!(0));
    }

    #[test]
    fn omin_returns_value_closest_to_med() {
        assert_eq!(omin(dec!(0), [dec!(0.2), dec!(0.7)]), dec!(0.2));
        assert_eq!(omin(dec!(0), [dec!(-0.2), dec!(-0.9)]), dec!(-0.2));
        assert_eq!(omin(dec!(0), [dec!(0.2), dec!(-0.9)]), dec!(0));
        assert_eq!(omin(dec!(0), [dec!(0.2), dec!(0)]), dec!(0));
    }

    #[test]
    fn polarization_strict_cut() {
        let d = ValuationDomain::bipolar();
        let mode = PolarizationMode::Strict;
        assert_eq!(polarize(&d, dec!(0.6), dec!(0.5), mode), dec!(1));
        assert_eq!(polarize(&d, dec!(0.5), dec!(0.5), mode), dec!(1));
        assert_eq!(polarize(&d, dec!(0.3), dec!(0.5), mode), dec!(0));
        assert_eq!(polarize(&d, dec!(-0.5), dec!(0.5), mode), dec!(-1));
    }

    #[test]
    fn polarization_soft_cut_keeps_middle_values() {
        let d = ValuationDomain::bipolar();
        assert_eq!(
            polarize(&d, dec!(0.3), dec!(0.5), PolarizationMode::Soft),
            dec!(0.3)
        );
    }

    #[test]
    fn polarization_at_max_is_idempotent() {
        let d = ValuationDomain::bipolar();
        for r in [dec!(-1), dec!(-0.4), dec!(0), dec!(0.9), dec!(1)] {
            let once = polarize(&d, r, d.max(), PolarizationMode::Strict);
            let twice = polarize(&d, once, d.max(), PolarizationMode::Strict);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn polarization_at_med_is_the_crisp_cut() {
        let d = ValuationDomain::bipolar();
        assert_eq!(polarize(&d, dec!(0.01), dec!(0), PolarizationMode::Strict), dec!(1));
        assert_eq!(polarize(&d, dec!(0), dec!(0), PolarizationMode::Strict), dec!(0));
        assert_eq!(polarize(&d, dec!(-0.01), dec!(0), PolarizationMode::Strict), dec!(-1));
    }

    #[test]
    fn symmetric_average_of_agreeing_terms() {
        let p = Precision::default();
        let avg = symmetric_average(dec!(0), &[dec!(0.2), dec!(0.6)], &[dec!(1), dec!(3)], p);
        assert_eq!(avg, dec!(0.5));
    }

    #[test]
    fn symmetric_average_of_conflicting_terms_is_med() {
        let p = Precision::default();
        let avg = symmetric_average(dec!(0), &[dec!(0.2), dec!(-0.6)], &[], p);
        assert_eq!(avg, dec!(0));
    }
}
