//! Submission and analysis value types.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score assigned to a submission, in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Score(f64);

impl Score {
    /// Largest possible score.
    pub const MAX: f64 = 100.0;

    /// Creates a validated score.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ScoreOutOfRange`] when the value is not a
    /// finite number between 0 and 100 inclusive.
    pub fn new(value: f64) -> Result<Self, TaskDomainError> {
        if !value.is_finite() || !(0.0..=Self::MAX).contains(&value) {
            return Err(TaskDomainError::ScoreOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Returns the numeric score.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns whether the score is strictly above `threshold`.
    #[must_use]
    pub fn exceeds(self, threshold: f64) -> bool {
        self.0 > threshold
    }
}

impl TryFrom<f64> for Score {
    type Error = TaskDomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Structured critique of a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisFeedback {
    /// What the submission does well.
    pub strengths: String,
    /// Where the submission falls short.
    pub weaknesses: String,
    /// How to improve it.
    pub suggestions: String,
}

/// Result of scoring a submission against its task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionAnalysis {
    /// Score in `0..=100`.
    pub score: Score,
    /// Critique returned alongside the score.
    pub feedback: AnalysisFeedback,
}

/// Non-empty work submitted for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission(String);

impl Submission {
    /// Builds a submission from an optional uploaded file and optional inline
    /// text. Non-empty file content wins over text.
    ///
    /// File bytes are decoded as UTF-8, replacing invalid sequences.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MissingSubmission`] when neither source
    /// carries non-blank content.
    pub fn from_parts(file: Option<&[u8]>, text: Option<&str>) -> Result<Self, TaskDomainError> {
        let from_file = file
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .filter(|content| !content.trim().is_empty());
        let from_text = || {
            text.filter(|content| !content.trim().is_empty())
                .map(str::to_owned)
        };
        from_file
            .or_else(from_text)
            .map(Self)
            .ok_or(TaskDomainError::MissingSubmission)
    }

    /// Returns the submitted content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.0
    }
}
