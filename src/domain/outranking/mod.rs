//! Outranking module - Bipolar outranking relations built from a tableau.
//!
//! Every construction variant shares the per-criterion local
//! characteristics of [`local`] and differs only in how it aggregates them.
//! [`OutrankingConstructor::construct`] consumes an [`OutrankingStrategy`]
//! value and returns the relation together with its veto record.

mod characteristics;
mod comparison;
mod construction;
mod local;
mod median;
mod robust;
mod stochastic;
mod strategy;
mod vetoes;

pub use comparison::{CriterionComparison, PairwiseComparison};
pub use construction::{OutrankingConstructor, OutrankingDigraph};
pub use local::{
    bipolar_concordance, electre_concordance, electre_discordance, local_counter_veto, local_veto,
    ConcordanceKind, LocalCharacteristic, PairThresholds,
};
pub use robust::RobustRelations;
pub use strategy::{OutrankingStrategy, StochasticSettings, WeightDistribution};
pub use vetoes::{CriterionVeto, VetoEntry, VetoRecord};
