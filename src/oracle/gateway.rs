//! Primary/secondary fallback over two transports.

use super::ports::{GenerationUnavailable, OracleGateway, TextTransport};
use async_trait::async_trait;
use tracing::{error, warn};

/// Gateway that tries `primary` and, on any failure, `fallback` once.
///
/// No retries or backoff beyond that single fallback.
#[derive(Debug, Clone)]
pub struct FallbackGateway<P, S> {
    primary: P,
    fallback: S,
}

impl<P, S> FallbackGateway<P, S>
where
    P: TextTransport,
    S: TextTransport,
{
    /// Creates a gateway from two transports.
    #[must_use]
    pub const fn new(primary: P, fallback: S) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl<P, S> OracleGateway for FallbackGateway<P, S>
where
    P: TextTransport,
    S: TextTransport,
{
    async fn generate(&self, prompt: &str) -> Result<String, GenerationUnavailable> {
        let primary_error = match self.primary.complete(prompt).await {
            Ok(text) => return Ok(text),
            Err(err) => err,
        };
        warn!(
            transport = self.primary.name(),
            fallback = self.fallback.name(),
            error = %primary_error,
            "primary oracle transport failed, trying fallback"
        );

        self.fallback.complete(prompt).await.map_err(|fallback_error| {
            error!(
                transport = self.fallback.name(),
                error = %fallback_error,
                "fallback oracle transport failed"
            );
            GenerationUnavailable {
                primary: primary_error,
                fallback: fallback_error,
            }
        })
    }
}
