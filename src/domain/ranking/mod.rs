//! Ranking module - Weak orders derived from outranking relations.
//!
//! Rankings come from iterated kernel extraction (best and last choosing,
//! fused pairwise) or directly from net flows and Copeland scores.

mod choosing;
mod prudent;
mod scores;
mod weak_order;

pub use choosing::{RankingByChoosing, RankingSettings, RankingStep};
pub use prudent::{PrudentRanking, DEFAULT_CUT_CEILING};
pub use weak_order::WeakOrder;
