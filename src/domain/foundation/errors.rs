//! Error types for the domain layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
        actual: String,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(
        field: impl Into<String>,
        min: impl fmt::Display,
        max: impl fmt::Display,
        actual: impl fmt::Display,
    ) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min: min.to_string(),
            max: max.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Construction errors
    InvalidTableau,
    MissingEvaluation,
    EmptyCoalition,
    ParseFailed,

    // Algebra errors
    InvalidDomain,

    // Exploitation errors
    CircuitEnumerationOverflow,
    KernelEnumerationTimeout,
    NoKernel,
    CutLevelLimited,

    // Control flow
    Cancelled,

    // Infrastructure errors
    IoError,
    SerializationError,
}

impl ErrorCode {
    /// Process exit code reported for a failure carrying this code.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorCode::InvalidTableau
            | ErrorCode::MissingEvaluation
            | ErrorCode::EmptyCoalition
            | ErrorCode::ParseFailed => 2,
            ErrorCode::InvalidDomain => 3,
            ErrorCode::CircuitEnumerationOverflow
            | ErrorCode::KernelEnumerationTimeout
            | ErrorCode::NoKernel
            | ErrorCode::CutLevelLimited => 4,
            ErrorCode::Cancelled => 5,
            ErrorCode::IoError | ErrorCode::SerializationError => 6,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidTableau => "INVALID_TABLEAU",
            ErrorCode::MissingEvaluation => "MISSING_EVALUATION",
            ErrorCode::EmptyCoalition => "EMPTY_COALITION",
            ErrorCode::ParseFailed => "PARSE_FAILED",
            ErrorCode::InvalidDomain => "INVALID_DOMAIN",
            ErrorCode::CircuitEnumerationOverflow => "CIRCUIT_ENUMERATION_OVERFLOW",
            ErrorCode::KernelEnumerationTimeout => "KERNEL_ENUMERATION_TIMEOUT",
            ErrorCode::NoKernel => "NO_KERNEL",
            ErrorCode::CutLevelLimited => "CUT_LEVEL_LIMITED",
            ErrorCode::Cancelled => "CANCELLED",
            ErrorCode::IoError => "IO_ERROR",
            ErrorCode::SerializationError => "SERIALIZATION_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Errors raised while constructing or exploiting outranking relations.
#[derive(Debug, Error)]
pub enum OutrankingError {
    #[error("Invalid performance tableau: {0}")]
    InvalidTableau(String),

    #[error("Missing evaluation of action '{action}' on criterion '{criterion}'")]
    MissingEvaluation { criterion: String, action: String },

    #[error("Invalid valuation domain: {0}")]
    InvalidDomain(String),

    #[error("Empty coalition: all criteria weights are zero")]
    EmptyCoalition,

    #[error("Chordless circuit enumeration exceeded the cap of {cap} circuits")]
    CircuitEnumerationOverflow { cap: usize },

    #[error("Kernel enumeration exceeded its budget of {budget} steps")]
    KernelEnumerationTimeout { budget: u64 },

    #[error("Computation cancelled")]
    Cancelled,

    #[error("Parse error at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl OutrankingError {
    /// Creates an invalid tableau error.
    pub fn invalid_tableau(reason: impl Into<String>) -> Self {
        OutrankingError::InvalidTableau(reason.into())
    }

    /// Creates an invalid domain error.
    pub fn invalid_domain(reason: impl Into<String>) -> Self {
        OutrankingError::InvalidDomain(reason.into())
    }

    /// Returns the error code classifying this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            OutrankingError::InvalidTableau(_) | OutrankingError::Validation(_) => {
                ErrorCode::InvalidTableau
            }
            OutrankingError::MissingEvaluation { .. } => ErrorCode::MissingEvaluation,
            OutrankingError::InvalidDomain(_) => ErrorCode::InvalidDomain,
            OutrankingError::EmptyCoalition => ErrorCode::EmptyCoalition,
            OutrankingError::CircuitEnumerationOverflow { .. } => {
                ErrorCode::CircuitEnumerationOverflow
            }
            OutrankingError::KernelEnumerationTimeout { .. } => ErrorCode::KernelEnumerationTimeout,
            OutrankingError::Cancelled => ErrorCode::Cancelled,
            OutrankingError::Parse { .. } => ErrorCode::ParseFailed,
            OutrankingError::Serialization(_) => ErrorCode::SerializationError,
            OutrankingError::Io(_) => ErrorCode::IoError,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }
}

/// A degradation notice attached to an exploitation artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Converts an exploitation error into a diagnostic.
    pub fn from_error(error: &OutrankingError) -> Self {
        Self::new(error.code(), error.to_string())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("action id");
        assert_eq!(format!("{}", err), "Field 'action id' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("weight", 0, "inf", -2);
        assert_eq!(
            format!("{}", err),
            "Field 'weight' must be between 0 and inf, got -2"
        );
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::InvalidTableau), "INVALID_TABLEAU");
        assert_eq!(
            format!("{}", ErrorCode::CircuitEnumerationOverflow),
            "CIRCUIT_ENUMERATION_OVERFLOW"
        );
    }

    #[test]
    fn exit_codes_are_nonzero_and_grouped() {
        assert_eq!(OutrankingError::EmptyCoalition.exit_code(), 2);
        assert_eq!(OutrankingError::invalid_domain("x").exit_code(), 3);
        assert_eq!(
            OutrankingError::CircuitEnumerationOverflow { cap: 1 }.exit_code(),
            4
        );
        assert_eq!(OutrankingError::Cancelled.exit_code(), 5);
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(OutrankingError::from(io).exit_code(), 6);
    }

    #[test]
    fn diagnostic_from_error_keeps_code() {
        let diag = Diagnostic::from_error(&OutrankingError::KernelEnumerationTimeout { budget: 10 });
        assert_eq!(diag.code, ErrorCode::KernelEnumerationTimeout);
        assert_eq!(
            diag.to_string(),
            "[KERNEL_ENUMERATION_TIMEOUT] Kernel enumeration exceeded its budget of 10 steps"
        );
    }

    #[test]
    fn error_code_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::NoKernel).unwrap();
        assert_eq!(json, "\"NO_KERNEL\"");
    }
}
