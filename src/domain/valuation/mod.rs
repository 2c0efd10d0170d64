//! Valuation module - Bipolar credibility algebra.
//!
//! Provides the symmetric valuation domain and the epistemic operators
//! (o-max, o-min, polarization, ordinal correlation) shared by every
//! relation in the crate.

mod correlation;
mod domain;
mod operators;

pub use correlation::{ordinal_correlation, OrdinalCorrelation};
pub use domain::ValuationDomain;
pub use operators::{omax, omin, polarize, symmetric_average, PolarizationMode};
