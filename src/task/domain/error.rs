//! Error types for task domain validation and parsing.

use super::{TaskId, TaskOperation, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TaskDomainError {
    /// The owner identity is empty after trimming.
    #[error("owner identity must not be empty")]
    EmptyOwner,

    /// The skill is empty after trimming.
    #[error("skill must not be empty")]
    EmptySkill,

    /// The skill is longer than storage allows.
    #[error("skill is {length} characters long, the limit is {max}")]
    SkillTooLong {
        /// Characters in the normalized skill.
        length: usize,
        /// Largest accepted length.
        max: usize,
    },

    /// An hour value is not a finite positive number.
    #[error("invalid hours {0}, expected a positive number")]
    InvalidHours(f64),

    /// The requested time is below the minimum the service accepts.
    #[error("requested time {requested} is below the minimum of {minimum} hour(s)")]
    RequestedTimeTooShort {
        /// Hours the user asked for.
        requested: f64,
        /// Smallest accepted value.
        minimum: f64,
    },

    /// A score is not a finite number in `0..=100`.
    #[error("score {0} is outside 0..=100")]
    ScoreOutOfRange(f64),

    /// Neither an uploaded file nor inline text carried any content.
    #[error("a file or text submission is required")]
    MissingSubmission,

    /// The operation is not permitted in the task's current status.
    #[error("cannot {operation} task {task_id} while it is {status}")]
    InvalidState {
        /// Task identifier.
        task_id: TaskId,
        /// Status at the time of the attempt.
        status: TaskStatus,
        /// Attempted operation.
        operation: TaskOperation,
    },
}

/// Error returned while parsing enumerated task fields from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {field}: {value}")]
pub struct ParseTaskFieldError {
    /// Name of the field being parsed.
    pub field: &'static str,
    /// Rejected raw value.
    pub value: String,
}

impl ParseTaskFieldError {
    pub(crate) fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_owned(),
        }
    }
}
