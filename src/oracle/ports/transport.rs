//! Single call path to the generation oracle.

use async_trait::async_trait;
use thiserror::Error;

/// Result type for transport calls.
pub type TransportResult<T> = Result<T, TransportError>;

/// One way of sending a prompt to the oracle and reading back its text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextTransport: Send + Sync {
    /// Short label used in logs, for example `"gemini-client"`.
    fn name(&self) -> &'static str;

    /// Sends `prompt` and returns the generated text.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the call fails for any reason.
    async fn complete(&self, prompt: &str) -> TransportResult<String>;
}

/// Failure of a single transport call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The request never produced an HTTP response.
    #[error("oracle request failed: {0}")]
    Network(String),

    /// The oracle answered with a non-success status.
    #[error("oracle returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, kept for diagnostics.
        body: String,
    },

    /// The response decoded but carried no generated text.
    #[error("oracle returned no candidates")]
    EmptyResponse,

    /// The response body could not be decoded.
    #[error("undecodable oracle response: {0}")]
    Decode(String),
}
