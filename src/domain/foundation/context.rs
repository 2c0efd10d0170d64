//! Computation context threaded through every domain service.

use super::{CancellationToken, OutrankingError, Precision};

/// Precision policy and optional cancellation token of one computation.
#[derive(Debug, Clone, Default)]
pub struct ComputeContext {
    pub precision: Precision,
    cancellation: Option<CancellationToken>,
}

impl ComputeContext {
    /// Creates a context with the given precision and no cancellation.
    pub fn new(precision: Precision) -> Self {
        Self {
            precision,
            cancellation: None,
        }
    }

    /// Attaches a cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Returns the attached cancellation token, if any.
    pub fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }

    /// Fails with `Cancelled` once cancellation was requested.
    pub fn check(&self) -> Result<(), OutrankingError> {
        match &self.cancellation {
            Some(token) => token.check(),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_context_is_never_cancelled() {
        assert!(ComputeContext::default().check().is_ok());
    }

    #[test]
    fn attached_token_cancels_the_context() {
        let token = CancellationToken::new();
        let ctx = ComputeContext::new(Precision::new(4)).with_cancellation(token.clone());
        assert!(ctx.check().is_ok());
        token.cancel();
        assert!(matches!(ctx.check(), Err(OutrankingError::Cancelled)));
        assert_eq!(ctx.precision.decimal_places(), 4);
    }
}
