//! Prudent ranking: choosing on the relation cut above its odd circuits.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{RankingByChoosing, RankingSettings};
use crate::domain::digraph::BipolarDigraph;
use crate::domain::foundation::{ComputeContext, Diagnostic, ErrorCode, OutrankingError};

/// Default ceiling of the prudent cut, as a fraction of the domain amplitude.
pub const DEFAULT_CUT_CEILING: Decimal = dec!(0.2);

/// The ranking kept by the prudent procedure and how it was obtained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrudentRanking {
    pub ranking: RankingByChoosing,
    /// Cut level applied, `None` when the relation was ranked as is.
    pub cut_level: Option<Decimal>,
    /// Credibility of the strongest odd chordless circuit.
    pub circuit_level: Option<Decimal>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PrudentRanking {
    /// Ranks `digraph` after cutting away credibilities up to the level of
    /// its strongest odd chordless circuit, bounded by `ceiling`.
    ///
    /// The cut ranking is kept unless the uncut one correlates better with
    /// the source relation.
    pub fn compute(
        digraph: &BipolarDigraph,
        settings: &RankingSettings,
        ceiling: Decimal,
        ctx: &ComputeContext,
    ) -> Result<Self, OutrankingError> {
        let domain = *digraph.domain();
        let limit = domain.med() + ceiling * domain.amplitude();
        let CutSearch {
            cut,
            circuit_level,
            diagnostics,
        } = elimination_level(digraph, settings.circuit_cap, limit, ctx)?;

        let uncut = RankingByChoosing::compute(digraph, settings, ctx)?;
        if cut <= domain.med() {
            return Ok(Self {
                ranking: uncut,
                cut_level: None,
                circuit_level,
                diagnostics,
            });
        }

        let cut_digraph = prudent_cut(digraph, cut)?;
        let cut_ranking = RankingByChoosing::compute(&cut_digraph, settings, ctx)?;
        let cut_correlation = cut_ranking.fused_order.correlation_with(digraph, ctx.precision)?;
        tracing::debug!(
            %cut,
            cut_correlation = %cut_correlation.correlation,
            uncut_correlation = %uncut.correlation.correlation,
            "prudent cut ranked"
        );
        if uncut.correlation.correlation > cut_correlation.correlation {
            return Ok(Self {
                ranking: uncut,
                cut_level: None,
                circuit_level,
                diagnostics,
            });
        }
        Ok(Self {
            ranking: RankingByChoosing {
                correlation: cut_correlation,
                ..cut_ranking
            },
            cut_level: Some(cut),
            circuit_level,
            diagnostics,
        })
    }

    /// Diagnostics of the cut and of the kept ranking.
    pub fn all_diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .iter()
            .chain(self.ranking.diagnostics.iter())
            .cloned()
            .collect()
    }
}

/// Outcome of the search for the circuit elimination level.
#[derive(Debug, Clone, PartialEq)]
struct CutSearch {
    /// Med when the relation is ranked as is.
    cut: Decimal,
    /// Credibility of the strongest odd chordless circuit met while cutting.
    circuit_level: Option<Decimal>,
    diagnostics: Vec<Diagnostic>,
}

/// Raises the cut until no odd chordless circuit survives it or `limit` is reached.
///
/// Cutting turns weak chords into Med, which can uncover stronger odd
/// circuits; each round recomputes them on the cut relation.
fn elimination_level(
    digraph: &BipolarDigraph,
    cap: usize,
    limit: Decimal,
    ctx: &ComputeContext,
) -> Result<CutSearch, OutrankingError> {
    let med = digraph.domain().med();
    let mut cut = med;
    let mut circuit_level: Option<Decimal> = None;
    let mut diagnostics = Vec::new();
    let mut current = digraph.clone();
    loop {
        let level = match current.odd_chordless_circuits(cap, ctx) {
            Ok(circuits) => circuits.iter().map(|c| c.credibility).max(),
            Err(error @ OutrankingError::CircuitEnumerationOverflow { .. }) => {
                let diagnostic = Diagnostic::from_error(&error);
                tracing::warn!(%diagnostic, %cut, "prudent cut search stopped");
                diagnostics.push(diagnostic);
                break;
            }
            Err(error) => return Err(error),
        };
        let Some(level) = level else {
            break;
        };
        circuit_level = Some(circuit_level.map_or(level, |seen| seen.max(level)));
        if level > limit {
            let diagnostic = Diagnostic::new(
                ErrorCode::CutLevelLimited,
                format!("odd circuits up to {} exceed the cut ceiling {}", level, limit),
            );
            tracing::warn!(%diagnostic, "prudent cut limited");
            diagnostics.push(diagnostic);
            cut = limit.max(cut);
            break;
        }
        cut = level;
        current = prudent_cut(digraph, cut)?;
    }
    Ok(CutSearch {
        cut,
        circuit_level,
        diagnostics,
    })
}

/// Keeps credibilities above `cut` or below its negation; the rest become Med.
fn prudent_cut(digraph: &BipolarDigraph, cut: Decimal) -> Result<BipolarDigraph, OutrankingError> {
    let domain = *digraph.domain();
    let lower = domain.negate(cut);
    let relation = digraph
        .relation()
        .iter()
        .enumerate()
        .map(|(x, row)| {
            row.iter()
                .enumerate()
                .map(|(y, &r)| {
                    if x == y || r > cut || r < lower {
                        r
                    } else {
                        domain.med()
                    }
                })
                .collect()
        })
        .collect();
    BipolarDigraph::new(
        format!("prudent-{}", digraph.name()),
        domain,
        digraph.nodes().to_vec(),
        relation,
    )
}
