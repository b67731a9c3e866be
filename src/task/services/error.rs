//! Service-level errors for task lifecycle operations.

use super::prompt::PromptError;
use crate::oracle::{GenerationUnavailable, MalformedOracleResponse};
use crate::task::{
    domain::{TaskDomainError, TaskId},
    ports::TaskRepositoryError,
    validation::{InvalidScore, TaskConstraintViolation},
};
use thiserror::Error;

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Request input or lifecycle precondition failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The task does not exist or belongs to another user.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// A prompt could not be rendered.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// Neither oracle call path produced text.
    #[error(transparent)]
    Oracle(#[from] GenerationUnavailable),

    /// The oracle text was not a JSON object.
    #[error(transparent)]
    MalformedResponse(#[from] MalformedOracleResponse),

    /// The generated task broke a hard constraint.
    #[error(transparent)]
    Constraint(#[from] TaskConstraintViolation),

    /// The analysis score was unusable.
    #[error(transparent)]
    InvalidScore(#[from] InvalidScore),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// How a failure should be reported to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorDisposition {
    /// The client sent something the service will not act on.
    BadRequest,
    /// The task is absent or not visible to the requester.
    NotFound,
    /// The failure lies with the oracle or infrastructure.
    Internal,
}

impl ErrorDisposition {
    /// Returns the matching HTTP status code.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::Internal => 500,
        }
    }
}

impl TaskLifecycleError {
    /// Classifies the error for the HTTP collaborator.
    ///
    /// Ownership failures are reported exactly like missing tasks.
    #[must_use]
    pub fn disposition(&self) -> ErrorDisposition {
        match self {
            Self::Domain(_) => ErrorDisposition::BadRequest,
            Self::Constraint(violation) if violation.is_time_ceiling() => {
                ErrorDisposition::BadRequest
            }
            Self::NotFound(_) | Self::Repository(TaskRepositoryError::NotFound(_)) => {
                ErrorDisposition::NotFound
            }
            Self::Repository(_)
            | Self::Prompt(_)
            | Self::Oracle(_)
            | Self::MalformedResponse(_)
            | Self::Constraint(_)
            | Self::InvalidScore(_) => ErrorDisposition::Internal,
        }
    }
}
