//! Gemini `generateContent` transports.
//!
//! Two call shapes hit the same endpoint: the client-library shape sends the
//! key in a header with role-tagged contents, the REST shape sends the key as
//! a query parameter with untagged contents.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::OracleConfig;
use crate::oracle::gateway::FallbackGateway;
use crate::oracle::ports::{TextTransport, TransportError, TransportResult};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// How a [`GeminiTransport`] authenticates and shapes its request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeminiCallStyle {
    /// API key header, role-tagged contents.
    ClientLibrary,
    /// API key query parameter, untagged contents.
    Rest,
}

/// Gemini transport holding a long-lived HTTP client.
#[derive(Debug, Clone)]
pub struct GeminiTransport {
    client: Client,
    config: OracleConfig,
    style: GeminiCallStyle,
}

impl GeminiTransport {
    /// Creates a transport with its own HTTP client.
    #[must_use]
    pub fn new(config: OracleConfig, style: GeminiCallStyle) -> Self {
        Self::with_client(Client::new(), config, style)
    }

    /// Creates a transport sharing an existing HTTP client.
    #[must_use]
    pub const fn with_client(client: Client, config: OracleConfig, style: GeminiCallStyle) -> Self {
        Self {
            client,
            config,
            style,
        }
    }

    /// Returns the `generateContent` URL for the configured model.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url(),
            self.config.model()
        )
    }

    fn request_body(&self, prompt: &str) -> GenerateContentRequest {
        let role = match self.style {
            GeminiCallStyle::ClientLibrary => Some("user"),
            GeminiCallStyle::Rest => None,
        };
        GenerateContentRequest {
            contents: vec![RequestContent {
                role,
                parts: vec![RequestPart {
                    text: prompt.to_owned(),
                }],
            }],
        }
    }
}

#[async_trait]
impl TextTransport for GeminiTransport {
    fn name(&self) -> &'static str {
        match self.style {
            GeminiCallStyle::ClientLibrary => "gemini-client",
            GeminiCallStyle::Rest => "gemini-rest",
        }
    }

    async fn complete(&self, prompt: &str) -> TransportResult<String> {
        let request = self
            .client
            .post(self.endpoint())
            .json(&self.request_body(prompt));
        let authenticated = match self.style {
            GeminiCallStyle::ClientLibrary => request.header(API_KEY_HEADER, self.config.api_key()),
            GeminiCallStyle::Rest => request.query(&[("key", self.config.api_key())]),
        };

        // The REST shape carries the key in the query string, so reqwest
        // errors are stripped of their URL before they are formatted.
        let response = match authenticated.send().await {
            Ok(response) => response,
            Err(err) => {
                let kind = if err.is_timeout() {
                    "request timeout"
                } else if err.is_connect() {
                    "connection failed"
                } else {
                    "request failed"
                };
                let redacted = err.without_url();
                return Err(TransportError::Network(format!("{kind}: {redacted}")));
            }
        };

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| TransportError::Decode(err.without_url().to_string()))?;
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(transport = self.name(), bytes = body.len(), "oracle responded");
        extract_text(&body)
    }
}

/// Builds the standard gateway: client-library shape first, REST shape as
/// fallback, both sharing one HTTP client.
#[must_use]
pub fn gemini_gateway(config: &OracleConfig) -> FallbackGateway<GeminiTransport, GeminiTransport> {
    let client = Client::new();
    FallbackGateway::new(
        GeminiTransport::with_client(client.clone(), config.clone(), GeminiCallStyle::ClientLibrary),
        GeminiTransport::with_client(client, config.clone(), GeminiCallStyle::Rest),
    )
}

/// Pulls the generated text out of a `generateContent` response body.
///
/// Text parts of the first candidate are concatenated.
///
/// # Errors
///
/// Returns [`TransportError::Decode`] for an undecodable body and
/// [`TransportError::EmptyResponse`] when there is no candidate text.
pub fn extract_text(body: &str) -> TransportResult<String> {
    let parsed: GenerateContentResponse =
        serde_json::from_str(body).map_err(|err| TransportError::Decode(err.to_string()))?;
    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();
    if text.is_empty() {
        return Err(TransportError::EmptyResponse);
    }
    Ok(text)
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}
