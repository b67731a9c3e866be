//! Text-in/text-out contract consumed by the task services.

use super::TransportError;
use async_trait::async_trait;
use thiserror::Error;

/// Opaque generation oracle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OracleGateway: Send + Sync {
    /// Sends `prompt` to the oracle and returns its raw text.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationUnavailable`] when no call path produced text.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationUnavailable>;
}

/// Both oracle call paths failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("generation oracle unavailable (primary: {primary}; fallback: {fallback})")]
pub struct GenerationUnavailable {
    /// Failure of the primary call path.
    pub primary: TransportError,
    /// Failure of the secondary call path.
    #[source]
    pub fallback: TransportError,
}
