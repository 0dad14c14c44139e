//! Operator interaction for the manual retry round.

use async_trait::async_trait;

use crate::domain::WorkSet;

/// Asks the operator which chunks to resend after automatic retries.
///
/// Returns the raw input line, or `None` when no operator is available.
/// Parsing is done by the retry controller so every adapter accepts the same
/// syntax.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ManualRetryPrompt: Send + Sync {
    async fn request_indices(&self, unresolved: &WorkSet) -> std::io::Result<Option<String>>;
}

/// Non-interactive runs: never offer a manual round.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoManualRetry;

#[async_trait]
impl ManualRetryPrompt for NoManualRetry {
    async fn request_indices(&self, _unresolved: &WorkSet) -> std::io::Result<Option<String>> {
        Ok(None)
    }
}
