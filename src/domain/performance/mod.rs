//! Performance module - Actions evaluated on weighted criteria.
//!
//! The tableau is the single input of every outranking construction.
//! Evaluations are exact decimals; minimized criteria are sign-adjusted on
//! ingest so that larger is always better downstream.

mod action;
mod criterion;
mod evaluation;
mod statistics;
mod tableau;

pub use action::{Action, Objective};
pub use criterion::{Criterion, Direction, Scale, Threshold, ThresholdKind};
pub use evaluation::{Evaluation, LEGACY_MISSING_TOKEN, MISSING_TOKEN};
pub use statistics::{interpolated_percentile, ThresholdPercentiles, WeightClass};
pub use tableau::{PerformanceTableau, PerformanceTableauBuilder};
