//! Cleaning and parsing of raw oracle text.
//!
//! The oracle is asked for bare JSON but frequently wraps it in a markdown
//! code fence. Only that wrapper is removed; prose around the payload is not
//! handled and fails parsing.

use serde_json::{Map, Value};
use thiserror::Error;

const FENCE: &str = "```";

/// Oracle text that could not be turned into a JSON object.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("malformed oracle response: {reason}")]
pub struct MalformedOracleResponse {
    /// Why parsing failed.
    pub reason: String,
    /// Text that was parsed, after fence stripping.
    pub raw: String,
}

/// Removes a surrounding markdown code fence, optionally tagged (for
/// example `` ```json ``), and trims the remainder.
///
/// Text without a leading fence is returned trimmed.
#[must_use]
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(opened) = trimmed.strip_prefix(FENCE) else {
        return trimmed;
    };
    let body = opened.trim_start_matches(|ch: char| ch.is_ascii_alphanumeric());
    body.trim_end().strip_suffix(FENCE).unwrap_or(body).trim()
}

/// Strips code fences and parses the remainder as a JSON object.
///
/// # Errors
///
/// Returns [`MalformedOracleResponse`] when the text is not valid JSON or is
/// valid JSON but not an object.
pub fn sanitize(raw: &str) -> Result<Map<String, Value>, MalformedOracleResponse> {
    let cleaned = strip_code_fences(raw);
    let malformed = |reason: String| MalformedOracleResponse {
        reason,
        raw: cleaned.to_owned(),
    };
    match serde_json::from_str::<Value>(cleaned) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(malformed("expected a JSON object".to_owned())),
        Err(err) => Err(malformed(err.to_string())),
    }
}
