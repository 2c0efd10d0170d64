//! Domain layer containing the outranking model and its exploitation.
//!
//! # Module Organization
//!
//! - `foundation` - Identifiers, precision policy, cancellation, errors
//! - `valuation` - Bipolar valuation domains and their algebra
//! - `performance` - Performance tableaux of actions and criteria
//! - `digraph` - Bipolar-valued digraphs and their derived views
//! - `outranking` - Construction of outranking relations from tableaux
//! - `circuits` - Chordless circuits and their collapse (Coca)
//! - `kernels` - Dominant and absorbent kernels, choice recommendations
//! - `ranking` - Ranking by choosing and score-based weak orders
//! - `rating` - Rating by sorting into quantile categories

pub mod circuits;
pub mod digraph;
pub mod foundation;
pub mod kernels;
pub mod outranking;
pub mod performance;
pub mod ranking;
pub mod rating;
pub mod valuation;
