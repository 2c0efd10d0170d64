//! Bipolar Outranking - Bipolar-valued outranking relations and their exploitation
//!
//! Builds credibility-valued outranking digraphs from multiple-criteria
//! performance tableaux and exploits them: chordless circuits, kernels,
//! ranking-by-choosing and rating-by-sorting with learned quantile profiles.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
