//! Digraph module - Bipolar-valued relations over actions.
//!
//! A [`BipolarDigraph`] stores a dense credibility matrix over a flat node
//! list. Nodes are either original actions or fictive collapsed groups
//! whose members point back to original action ids.

mod cache;
mod components;
pub(crate) mod graph;
mod metrics;

pub use cache::Gamma;
pub use graph::{BipolarDigraph, DigraphNode, FusionOperator, NodeKind};
