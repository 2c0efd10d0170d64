//! Errors shared by the persistence and export ports.

use crate::domain::foundation::OutrankingError;

/// Errors that can occur while loading, saving or exporting artifacts.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error at line {line}: {reason}")]
    ParseFailed { line: usize, reason: String },

    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    #[error(transparent)]
    Domain(#[from] OutrankingError),
}

impl StoreError {
    /// Creates a parse error at a 1-based line.
    pub fn parse(line: usize, reason: impl Into<String>) -> Self {
        StoreError::ParseFailed {
            line,
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => StoreError::NotFound(err.to_string()),
            _ => StoreError::IoError(err.to_string()),
        }
    }
}

impl From<StoreError> for OutrankingError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Domain(inner) => inner,
            StoreError::ParseFailed { line, reason } => OutrankingError::Parse { line, reason },
            StoreError::SerializationFailed(reason) => OutrankingError::Serialization(reason),
            StoreError::NotFound(reason) => {
                OutrankingError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, reason))
            }
            StoreError::IoError(reason) => OutrankingError::Io(std::io::Error::other(reason)),
        }
    }
}
