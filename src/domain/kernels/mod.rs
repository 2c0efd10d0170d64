//! Kernels module - Dominant and absorbent kernels as choice recommendations.
//!
//! A kernel is an independent choice that outranks (dominant) or is
//! outranked by (absorbent) every action outside it on the median cut.

mod credibility;
mod enumeration;
mod recommendation;

pub use enumeration::{Kernel, KernelKind, DEFAULT_STEP_BUDGET};
pub use recommendation::ChoiceRecommendation;
