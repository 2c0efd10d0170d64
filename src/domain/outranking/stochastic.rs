//! Stochastic outranking: median credibility over sampled weight vectors.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rust_decimal::prelude::MathematicalOps;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::characteristics::{bipolar_value, CharacteristicTable};
use super::construction::pairwise;
use super::{StochasticSettings, WeightDistribution};
use crate::domain::foundation::{ComputeContext, OutrankingError, Precision};
use crate::domain::performance::PerformanceTableau;
use crate::domain::valuation::ValuationDomain;

const UNIFORM_RESOLUTION: u64 = 1_000_000_000;

/// Finalizer of the SplitMix64 generator, used to decorrelate per-sample seeds.
pub(crate) fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn uniform(rng: &mut StdRng) -> Decimal {
    Decimal::from(rng.gen_range(0..=UNIFORM_RESOLUTION)) / Decimal::from(UNIFORM_RESOLUTION)
}

/// Draws one weight around `w` on [0, 2w].
fn sample_weight(w: Decimal, distribution: WeightDistribution, rng: &mut StdRng, precision: Precision) -> Decimal {
    let sampled = match distribution {
        WeightDistribution::Uniform => Decimal::TWO * w * uniform(rng),
        WeightDistribution::Triangular => {
            let u = uniform(rng);
            if u < dec!(0.5) {
                w * (Decimal::TWO * u).sqrt().unwrap_or(Decimal::ZERO)
            } else {
                Decimal::TWO * w - w * (Decimal::TWO * (Decimal::ONE - u)).sqrt().unwrap_or(Decimal::ZERO)
            }
        }
        WeightDistribution::Beta => {
            let mut draws = [uniform(rng), uniform(rng), uniform(rng)];
            draws.sort();
            Decimal::TWO * w * draws[1]
        }
    };
    precision.round(sampled)
}

/// Weight vector of sample `k`; every sample has its own seeded generator.
pub(crate) fn sample_weights(
    weights: &[Decimal],
    settings: &StochasticSettings,
    k: usize,
    precision: Precision,
) -> Vec<Decimal> {
    let mut rng = StdRng::seed_from_u64(splitmix64(settings.seed.wrapping_add(k as u64)));
    weights
        .iter()
        .map(|w| sample_weight(*w, settings.distribution, &mut rng, precision))
        .collect()
}

fn sign(r: Decimal, med: Decimal) -> i8 {
    match r.cmp(&med) {
        std::cmp::Ordering::Greater => 1,
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
    }
}

/// Median relation over `settings.samples` weight vectors and the share of
/// samples agreeing with the sign of each median.
pub(crate) fn stochastic_relation(
    tableau: &PerformanceTableau,
    table: &CharacteristicTable,
    settings: &StochasticSettings,
    domain: &ValuationDomain,
    ctx: &ComputeContext,
) -> Result<(Vec<Vec<Decimal>>, Vec<Vec<Decimal>>), OutrankingError> {
    let precision = ctx.precision;
    let weights: Vec<Decimal> = tableau.criteria().iter().map(|c| c.weight).collect();
    let total_weight = tableau.total_weight();

    let samples = (0..settings.samples)
        .into_par_iter()
        .map(|k| {
            ctx.check()?;
            let mut sampled = sample_weights(&weights, settings, k, precision);
            let mut sampled_total: Decimal = sampled.iter().sum();
            if sampled_total.is_zero() {
                sampled = weights.clone();
                sampled_total = total_weight;
            }
            Ok(pairwise(table, domain.min(), |pair| {
                bipolar_value(pair, &sampled, sampled_total, domain, precision)
            }))
        })
        .collect::<Result<Vec<_>, OutrankingError>>()?;

    let order = table.order();
    let count = Decimal::from(samples.len());
    let threshold = Decimal::ONE - settings.error_level;
    let mut relation = vec![vec![domain.min(); order]; order];
    let mut likelihoods = vec![vec![Decimal::ONE; order]; order];
    for x in 0..order {
        for y in 0..order {
            if x == y {
                continue;
            }
            let mut values: Vec<Decimal> = samples.iter().map(|s| s[x][y]).collect();
            values.sort();
            let mid = values.len() / 2;
            let median = if values.len() % 2 == 0 {
                precision.round((values[mid - 1] + values[mid]) / Decimal::TWO)
            } else {
                values[mid]
            };
            let expected = sign(median, domain.med());
            let agreeing = values.iter().filter(|v| sign(**v, domain.med()) == expected).count();
            let likelihood = precision.divide(Decimal::from(agreeing), count);
            likelihoods[x][y] = likelihood;
            relation[x][y] = if likelihood < threshold { domain.med() } else { median };
        }
    }
    tracing::debug!(
        samples = settings.samples,
        seed = settings.seed,
        "stochastic outranking sampled"
    );
    Ok((relation, likelihoods))
}
