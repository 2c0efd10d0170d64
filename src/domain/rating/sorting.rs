//! Rating by sorting actions among quantile profiles.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::QuantileProfiles;
use crate::domain::digraph::BipolarDigraph;
use crate::domain::foundation::{ActionId, ComputeContext, OutrankingError};
use crate::domain::outranking::{OutrankingConstructor, OutrankingStrategy};
use crate::domain::performance::PerformanceTableau;
use crate::domain::ranking::WeakOrder;
use crate::domain::valuation::OrdinalCorrelation;

/// Which category limit is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortingMode {
    /// Categories [q(k-1), q(k)[ : the low limit must be outranked.
    #[default]
    LowerClosed,
    /// Categories ]q(k-1), q(k)] : the high limit must outrank.
    UpperClosed,
}

/// Score used to order actions sharing a rating class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntraClassOrder {
    #[default]
    NetFlows,
    Copeland,
}

/// Parameters of a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortingSettings {
    pub categories: usize,
    pub mode: SortingMode,
    pub order: IntraClassOrder,
}

impl Default for SortingSettings {
    fn default() -> Self {
        Self {
            categories: 4,
            mode: SortingMode::LowerClosed,
            order: IntraClassOrder::NetFlows,
        }
    }
}

/// Credibility that one action belongs to one category (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCharacteristic {
    pub category: usize,
    pub low_limit: Decimal,
    pub not_high_limit: Decimal,
    pub membership: Decimal,
}

/// Sorting of one action: its characteristics and the categories it falls in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSorting {
    pub action: ActionId,
    pub characteristics: Vec<CategoryCharacteristic>,
    pub low_category: usize,
    pub high_category: usize,
    /// Membership credibility of the categories sorted into.
    pub credibility: Decimal,
}

/// Actions sharing the same category interval, best first inside the class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingClass {
    pub low_category: usize,
    pub high_category: usize,
    pub credibility: Decimal,
    pub members: Vec<ActionId>,
}

/// Actions rated into ordered categories of quantile performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingBySorting {
    pub profiles: QuantileProfiles,
    pub settings: SortingSettings,
    pub sortings: Vec<ActionSorting>,
    /// Rating classes from the highest category interval down.
    pub classes: Vec<RatingClass>,
    /// Weak order refining the classes by the intra-class scores.
    pub order: WeakOrder,
    /// Correlation of the order with the outranking among the actions.
    pub correlation: OrdinalCorrelation,
    /// Fingerprint of the outranking of actions and profiles.
    pub source_fingerprint: String,
}

impl RatingBySorting {
    /// Learns profiles from `tableau`, builds the outranking of actions and
    /// profiles under `strategy` and sorts every action.
    pub fn compute(
        tableau: &PerformanceTableau,
        strategy: &OutrankingStrategy,
        settings: &SortingSettings,
        ctx: &ComputeContext,
    ) -> Result<Self, OutrankingError> {
        let profiles = QuantileProfiles::learn(tableau, settings.categories, ctx.precision)?;
        Self::compute_with_profiles(tableau, profiles, strategy, settings, ctx)
    }

    /// Sorts the actions of `tableau` among previously established
    /// `profiles`, e.g. limits learned from a historical tableau.
    ///
    /// The category count is taken from `profiles`.
    ///
    /// # Errors
    ///
    /// `InvalidDomain` when the profiles define no category or do not
    /// carry one limit per criterion of `tableau`.
    pub fn compute_with_profiles(
        tableau: &PerformanceTableau,
        profiles: QuantileProfiles,
        strategy: &OutrankingStrategy,
        settings: &SortingSettings,
        ctx: &ComputeContext,
    ) -> Result<Self, OutrankingError> {
        if profiles.categories() == 0 || profiles.limits.len() != profiles.ids.len() {
            return Err(OutrankingError::invalid_domain("profiles must define at least one category"));
        }
        if let Some(limits) = profiles.limits.iter().find(|l| l.len() != tableau.criterion_count()) {
            return Err(OutrankingError::invalid_domain(format!(
                "profiles carry {} limits for {} criteria",
                limits.len(),
                tableau.criterion_count()
            )));
        }
        let settings = &SortingSettings {
            categories: profiles.categories(),
            ..*settings
        };
        let extended = profiles.extend(tableau)?;
        let outranking = OutrankingConstructor::construct(&extended, strategy, ctx)?;
        let digraph = &outranking.digraph;
        let n = tableau.action_count();

        let sortings = (0..n)
            .map(|x| {
                ctx.check()?;
                Ok(sort_action(digraph, x, n, settings))
            })
            .collect::<Result<Vec<_>, OutrankingError>>()?;

        let actions: Vec<usize> = (0..n).collect();
        let relation = digraph.restricted(&actions);
        let classes = rating_classes(&relation, &sortings, settings.order)?;
        let order = WeakOrder::new(
            classes
                .iter()
                .map(|class| intra_class_order(&relation, &class.members, settings.order))
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .flat_map(|o| o.classes)
                .collect(),
        );
        let correlation = order.correlation_with(&relation, ctx.precision)?;

        tracing::debug!(
            tableau = tableau.name(),
            categories = settings.categories,
            classes = classes.len(),
            correlation = %correlation.correlation,
            "rating by sorting completed"
        );
        Ok(Self {
            profiles,
            settings: *settings,
            sortings,
            classes,
            order,
            correlation,
            source_fingerprint: digraph.fingerprint().to_string(),
        })
    }

    /// Sorting characteristic of `action` in `category`.
    pub fn characteristic(&self, action: &str, category: usize) -> Option<&CategoryCharacteristic> {
        self.sortings
            .iter()
            .find(|s| s.action.as_str() == action)?
            .characteristics
            .iter()
            .find(|c| c.category == category)
    }

    /// Actions sorted into each category, lowest category first.
    pub fn category_contents(&self) -> Vec<Vec<ActionId>> {
        (1..=self.settings.categories)
            .map(|k| {
                self.sortings
                    .iter()
                    .filter(|s| s.low_category <= k && k <= s.high_category)
                    .map(|s| s.action.clone())
                    .collect()
            })
            .collect()
    }
}

/// Characteristics of action `x` against the profiles stored after the
/// `n` actions of `digraph`.
fn sort_action(digraph: &BipolarDigraph, x: usize, n: usize, settings: &SortingSettings) -> ActionSorting {
    let domain = digraph.domain();
    let (med, max) = (domain.med(), domain.max());
    let m = settings.categories;
    let profile = |j: usize| n + j;

    let characteristics: Vec<CategoryCharacteristic> = (1..=m)
        .map(|k| {
            let (low_limit, not_high_limit) = match settings.mode {
                SortingMode::LowerClosed => {
                    let high = if k < m { digraph.value(profile(k), x) } else { max };
                    (digraph.value(x, profile(k - 1)), high)
                }
                SortingMode::UpperClosed => {
                    let low = if k > 1 { digraph.value(x, profile(k - 1)) } else { max };
                    (low, digraph.value(profile(k), x))
                }
            };
            CategoryCharacteristic {
                category: k,
                low_limit,
                not_high_limit,
                membership: low_limit.min(not_high_limit),
            }
        })
        .collect();

    let fits = |c: &CategoryCharacteristic| match settings.mode {
        SortingMode::LowerClosed => c.low_limit >= med && c.not_high_limit > med,
        SortingMode::UpperClosed => c.low_limit > med && c.not_high_limit >= med,
    };
    let mut sorted: Vec<&CategoryCharacteristic> = characteristics.iter().filter(|c| fits(c)).collect();
    if sorted.is_empty() {
        let best = characteristics.iter().map(|c| c.membership).max().unwrap_or(med);
        sorted = characteristics.iter().filter(|c| c.membership == best).collect();
    }
    let low_category = sorted.iter().map(|c| c.category).min().unwrap_or(1);
    let high_category = sorted.iter().map(|c| c.category).max().unwrap_or(m);
    let credibility = sorted.iter().map(|c| c.membership).min().unwrap_or(med);

    ActionSorting {
        action: digraph.nodes()[x].id.clone(),
        characteristics,
        low_category,
        high_category,
        credibility,
    }
}

/// Groups actions by category interval, highest interval midpoint first.
fn rating_classes(
    relation: &BipolarDigraph,
    sortings: &[ActionSorting],
    order: IntraClassOrder,
) -> Result<Vec<RatingClass>, OutrankingError> {
    let mut intervals: Vec<(usize, usize)> = sortings.iter().map(|s| (s.low_category, s.high_category)).collect();
    intervals.sort_by(|a, b| (b.0 + b.1).cmp(&(a.0 + a.1)).then(b.1.cmp(&a.1)));
    intervals.dedup();

    intervals
        .into_iter()
        .map(|(low, high)| {
            let sorted: Vec<&ActionSorting> = sortings
                .iter()
                .filter(|s| s.low_category == low && s.high_category == high)
                .collect();
            let ids: Vec<ActionId> = sorted.iter().map(|s| s.action.clone()).collect();
            let members = intra_class_order(relation, &ids, order)?.actions();
            let credibility = sorted
                .iter()
                .map(|s| s.credibility)
                .min()
                .unwrap_or(relation.domain().med());
            Ok(RatingClass {
                low_category: low,
                high_category: high,
                credibility,
                members,
            })
        })
        .collect()
}

fn intra_class_order(
    relation: &BipolarDigraph,
    members: &[ActionId],
    order: IntraClassOrder,
) -> Result<WeakOrder, OutrankingError> {
    let restricted = relation.restricted_to(members)?;
    Ok(match order {
        IntraClassOrder::NetFlows => restricted.net_flows_order(),
        IntraClassOrder::Copeland => restricted.copeland_order(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{CriterionId, ErrorCode, Precision};
    use crate::domain::performance::{Action, Criterion, Evaluation};
    use rust_decimal_macros::dec;

    fn ids(names: &[&str]) -> Vec<ActionId> {
        names.iter().map(|n| ActionId::new(*n).unwrap()).collect()
    }

    fn tableau(values: &[(&str, Decimal)]) -> PerformanceTableau {
        let mut builder = PerformanceTableau::builder().criterion(Criterion::new(CriterionId::new("g").unwrap()));
        for (id, value) in values {
            builder = builder.action(Action::new(ActionId::new(*id).unwrap())).evaluation("g", id, *value);
        }
        builder.build().unwrap()
    }

    fn rate(t: &PerformanceTableau, settings: SortingSettings) -> RatingBySorting {
        RatingBySorting::compute(t, &OutrankingStrategy::BipolarStandard, &settings, &ComputeContext::default()).unwrap()
    }

    #[test]
    fn historical_profiles_rate_a_new_tableau() {
        let history = tableau(&[("h1", dec!(20)), ("h2", dec!(40)), ("h3", dec!(60)), ("h4", dec!(80))]);
        let profiles = QuantileProfiles::learn(&history, 2, Precision::default()).unwrap();
        assert_eq!(profiles.limits[1], vec![Evaluation::Value(dec!(50))]);

        let current = tableau(&[("a", dec!(10)), ("b", dec!(30)), ("c", dec!(45))]);
        let rating = RatingBySorting::compute_with_profiles(
            &current,
            profiles.clone(),
            &OutrankingStrategy::BipolarStandard,
            &SortingSettings {
                categories: 7,
                ..SortingSettings::default()
            },
            &ComputeContext::default(),
        )
        .unwrap();
        assert_eq!(rating.profiles, profiles);
        assert_eq!(rating.settings.categories, 2);
        assert_eq!(rating.category_contents(), vec![ids(&["a", "b", "c"]), vec![]]);

        let learned = rate(
            &current,
            SortingSettings {
                categories: 2,
                ..SortingSettings::default()
            },
        );
        assert_ne!(learned.profiles, profiles);
        assert!(learned.category_contents()[1].contains(&ActionId::new("c").unwrap()));
    }

    #[test]
    fn profiles_must_match_the_criteria() {
        let history = tableau(&[("h1", dec!(20)), ("h2", dec!(80))]);
        let mut profiles = QuantileProfiles::learn(&history, 2, Precision::default()).unwrap();
        profiles.limits[1].push(Evaluation::Value(dec!(1)));
        let result = RatingBySorting::compute_with_profiles(
            &history,
            profiles,
            &OutrankingStrategy::BipolarStandard,
            &SortingSettings::default(),
            &ComputeContext::default(),
        );
        assert!(matches!(result, Err(e) if e.code() == ErrorCode::InvalidDomain));
    }

    #[test]
    fn actions_on_a_limit_overlap_two_categories() {
        let t = tableau(&[("a", dec!(10)), ("b", dec!(50)), ("c", dec!(90))]);
        let rating = rate(
            &t,
            SortingSettings {
                categories: 2,
                ..SortingSettings::default()
            },
        );
        let intervals: Vec<(usize, usize)> = rating.classes.iter().map(|c| (c.low_category, c.high_category)).collect();
        assert_eq!(intervals, vec![(2, 2), (1, 2), (1, 1)]);
        assert_eq!(rating.order.classes, vec![ids(&["c"]), ids(&["b"]), ids(&["a"])]);
        assert_eq!(rating.category_contents(), vec![ids(&["a", "b"]), ids(&["b", "c"])]);
        assert_eq!(rating.correlation.correlation, dec!(1));
    }

    #[test]
    fn sorting_characteristics_are_exposed() {
        let t = tableau(&[("a", dec!(10)), ("b", dec!(50)), ("c", dec!(90))]);
        let rating = rate(
            &t,
            SortingSettings {
                categories: 2,
                ..SortingSettings::default()
            },
        );
        let a_high = rating.characteristic("a", 2).unwrap();
        assert_eq!(a_high.low_limit, dec!(-1));
        assert_eq!(a_high.not_high_limit, dec!(1));
        assert_eq!(a_high.membership, dec!(-1));
        assert!(rating.characteristic("z", 1).is_none());
    }

    #[test]
    fn a_single_category_is_ordered_by_net_flows() {
        let t = tableau(&[("a", dec!(10)), ("b", dec!(50)), ("c", dec!(50))]);
        let rating = rate(
            &t,
            SortingSettings {
                categories: 1,
                ..SortingSettings::default()
            },
        );
        assert_eq!(rating.classes.len(), 1);
        assert_eq!(rating.classes[0].members, ids(&["b", "c", "a"]));
        assert_eq!(rating.order.classes, vec![ids(&["b", "c"]), ids(&["a"])]);
    }

    #[test]
    fn upper_closed_mode_sorts_the_same_crisp_data() {
        let t = tableau(&[("a", dec!(10)), ("c", dec!(90))]);
        let rating = rate(
            &t,
            SortingSettings {
                categories: 2,
                mode: SortingMode::UpperClosed,
                order: IntraClassOrder::Copeland,
            },
        );
        assert_eq!(rating.order.classes, vec![ids(&["c"]), ids(&["a"])]);
    }
}
