//! Bipolar ordinal correlation between two valued relations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ValuationDomain;
use crate::domain::foundation::{OutrankingError, Precision};

/// Kendall-style agreement between two relations on the same actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdinalCorrelation {
    /// Weighted sign agreement in [-1, 1].
    pub correlation: Decimal,
    /// Mean common departure from Med in [0, 1].
    pub determination: Decimal,
}

impl OrdinalCorrelation {
    /// Correlation weighted by its determination.
    pub fn weighted(&self, precision: Precision) -> Decimal {
        precision.round(self.correlation * self.determination)
    }
}

/// Computes the ordinal correlation of two square relation matrices.
///
/// Both matrices are indexed by the same action order. Each credibility is
/// first normalized onto [-1, 1] within its own domain, so relations valued
/// on different domains can be compared. Diagonal entries are ignored.
pub fn ordinal_correlation(
    left_domain: &ValuationDomain,
    left: &[Vec<Decimal>],
    right_domain: &ValuationDomain,
    right: &[Vec<Decimal>],
    precision: Precision,
) -> Result<OrdinalCorrelation, OutrankingError> {
    let order = left.len();
    if right.len() != order {
        return Err(OutrankingError::invalid_domain(format!(
            "cannot correlate relations of order {} and {}",
            order,
            right.len()
        )));
    }

    let mut agreement = Decimal::ZERO;
    let mut common = Decimal::ZERO;
    for x in 0..order {
        if left[x].len() != order || right[x].len() != order {
            return Err(OutrankingError::invalid_domain("relation matrix is not square"));
        }
        for y in 0..order {
            if x == y {
                continue;
            }
            let a = left_domain.normalize(left[x][y], precision);
            let b = right_domain.normalize(right[x][y], precision);
            let strength = a.abs().min(b.abs());
            common += strength;
            if a.is_sign_positive() == b.is_sign_positive() {
                agreement += strength;
            } else {
                agreement -= strength;
            }
        }
    }

    let pairs = Decimal::from(order * order.saturating_sub(1));
    Ok(OrdinalCorrelation {
        correlation: precision.divide(agreement, common),
        determination: precision.divide(common, pairs),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn matrix(rows: &[&[Decimal]]) -> Vec<Vec<Decimal>> {
        rows.iter().map(|r| r.to_vec()).collect()
    }

    #[test]
    fn relation_correlates_perfectly_with_itself() {
        let d = ValuationDomain::bipolar();
        let g = matrix(&[
            &[dec!(-1), dec!(0.5), dec!(-0.3)],
            &[dec!(-0.5), dec!(-1), dec!(1)],
            &[dec!(0.3), dec!(-1), dec!(-1)],
        ]);
        let c = ordinal_correlation(&d, &g, &d, &g, Precision::default()).unwrap();
        assert_eq!(c.correlation, dec!(1));
        assert_eq!(c.determination, dec!(0.6));
    }

    #[test]
    fn opposite_relation_correlates_negatively() {
        let d = ValuationDomain::bipolar();
        let g = matrix(&[&[dec!(-1), dec!(0.5)], &[dec!(-0.5), dec!(-1)]]);
        let h = matrix(&[&[dec!(-1), dec!(-0.5)], &[dec!(0.5), dec!(-1)]]);
        let c = ordinal_correlation(&d, &g, &d, &h, Precision::default()).unwrap();
        assert_eq!(c.correlation, dec!(-1));
    }

    #[test]
    fn indeterminate_entries_carry_no_weight() {
        let d = ValuationDomain::bipolar();
        let g = matrix(&[&[dec!(-1), dec!(0)], &[dec!(0), dec!(-1)]]);
        let c = ordinal_correlation(&d, &g, &d, &g, Precision::default()).unwrap();
        assert_eq!(c.correlation, dec!(0));
        assert_eq!(c.determination, dec!(0));
    }

    #[test]
    fn different_domains_are_normalized_first() {
        let bipolar = ValuationDomain::bipolar();
        let wide = ValuationDomain::integer(dec!(10)).unwrap();
        let g = matrix(&[&[dec!(-1), dec!(0.5)], &[dec!(-0.5), dec!(-1)]]);
        let h = matrix(&[&[dec!(-10), dec!(5)], &[dec!(-5), dec!(-10)]]);
        let c = ordinal_correlation(&bipolar, &g, &wide, &h, Precision::default()).unwrap();
        assert_eq!(c.correlation, dec!(1));
        assert_eq!(c.determination, dec!(0.5));
    }

    #[test]
    fn mismatched_orders_are_rejected() {
        let d = ValuationDomain::bipolar();
        let g = matrix(&[&[dec!(-1)]]);
        let h = matrix(&[&[dec!(-1), dec!(1)], &[dec!(1), dec!(-1)]]);
        assert!(matches!(
            ordinal_correlation(&d, &g, &d, &h, Precision::default()),
            Err(OutrankingError::InvalidDomain(_))
        ));
    }
}
