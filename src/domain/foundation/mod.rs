//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the decimal precision policy, cancellation and
//! the error vocabulary shared by every outranking component.

mod cancellation;
mod context;
mod errors;
mod ids;
mod precision;

pub use cancellation::CancellationToken;
pub use context::ComputeContext;
pub use errors::{Diagnostic, ErrorCode, OutrankingError, ValidationError};
pub use ids::{ActionId, CriterionId, ObjectiveId};
pub use precision::Precision;
