//! Validation of submission analysis payloads.

use super::rules::{render, text_or_lines};
use crate::task::domain::{AnalysisFeedback, Score, SubmissionAnalysis};
use serde_json::{Map, Value};
use thiserror::Error;

/// The oracle returned a score that is missing, not a number, or outside
/// `0..=100`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid score in analysis: {reason}")]
pub struct InvalidScore {
    /// What was wrong with the score.
    pub reason: String,
    /// Analysis payload, for diagnostics.
    pub payload: String,
}

/// Validates an analysis payload into a [`SubmissionAnalysis`].
///
/// Feedback is read leniently from `feedback.strengths`,
/// `feedback.weaknesses` and `feedback.suggestions`; each accepts a string
/// or a list of strings and defaults to empty.
///
/// # Errors
///
/// Returns [`InvalidScore`] when `score` is not a number in `0..=100`.
pub fn validate_analysis(payload: &Map<String, Value>) -> Result<SubmissionAnalysis, InvalidScore> {
    let invalid = |reason: String| InvalidScore {
        reason,
        payload: render(payload),
    };

    let raw_score = payload
        .get("score")
        .and_then(Value::as_f64)
        .ok_or_else(|| invalid("expected a number".to_owned()))?;
    let score = Score::new(raw_score).map_err(|err| invalid(err.to_string()))?;

    let feedback = payload
        .get("feedback")
        .and_then(Value::as_object)
        .map(|object| AnalysisFeedback {
            strengths: text_or_lines(object, "strengths"),
            weaknesses: text_or_lines(object, "weaknesses"),
            suggestions: text_or_lines(object, "suggestions"),
        })
        .unwrap_or_default();

    Ok(SubmissionAnalysis { score, feedback })
}
