//! Circuits module - Chordless circuits and Coca collapsing.
//!
//! Odd chordless circuits of the median cut are what prevents a digraph
//! from having a kernel. The Coca construction collapses them into
//! fictive nodes until none remain.

mod chordless;
mod coca;

pub use chordless::{ChordlessCircuit, DEFAULT_CIRCUIT_CAP};
pub use coca::CocaDigraph;
