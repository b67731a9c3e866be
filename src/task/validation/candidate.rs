//! Validation of generated task candidates.

use super::rules::{non_blank_string, render, string_field, string_list};
use crate::task::domain::{Hours, SkillLevel, TaskDraft, TaskType};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

const ESTIMATED_TIME: &str = "estimatedTime";
const DESCRIPTION: &str = "description";

/// A generated task breaks a constraint that cannot be corrected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("generated task violates {field}: {reason}")]
pub struct TaskConstraintViolation {
    /// Offending field.
    pub field: &'static str,
    /// What was wrong with it.
    pub reason: String,
    /// Candidate payload, for diagnostics.
    pub candidate: String,
}

impl TaskConstraintViolation {
    /// Returns whether the violation is an estimate above the requested
    /// time (or an unusable estimate), which the user can address by asking
    /// again.
    #[must_use]
    pub fn is_time_ceiling(&self) -> bool {
        self.field == ESTIMATED_TIME
    }
}

/// Validates an oracle task candidate against the requested time and
/// normalizes its recoverable fields.
///
/// - `estimatedTime` must be a positive number no larger than `requested`.
/// - `description` must be a non-blank string.
/// - `skillLevel` outside the known set becomes [`SkillLevel::Beginner`].
/// - `type` outside the known set becomes [`TaskType::Practice`].
/// - a missing or blank `detailedDescription` is copied from `description`.
///
/// # Errors
///
/// Returns [`TaskConstraintViolation`] for the hard-fail cases above.
pub fn validate_task_candidate(
    candidate: &Map<String, Value>,
    requested: Hours,
) -> Result<TaskDraft, TaskConstraintViolation> {
    let violation = |field: &'static str, reason: String| TaskConstraintViolation {
        field,
        reason,
        candidate: render(candidate),
    };

    let estimated_value = candidate
        .get(ESTIMATED_TIME)
        .and_then(Value::as_f64)
        .ok_or_else(|| violation(ESTIMATED_TIME, "expected a number".to_owned()))?;
    let estimated_time = Hours::new(estimated_value)
        .map_err(|err| violation(ESTIMATED_TIME, err.to_string()))?;
    if estimated_time > requested {
        return Err(violation(
            ESTIMATED_TIME,
            format!("{estimated_time} hour(s) exceeds the requested {requested}"),
        ));
    }

    let description = non_blank_string(candidate, DESCRIPTION)
        .ok_or_else(|| violation(DESCRIPTION, "expected a non-empty string".to_owned()))?
        .to_owned();

    let detailed_description = non_blank_string(candidate, "detailedDescription")
        .map_or_else(
            || {
                debug!("oracle omitted detailedDescription, using description");
                description.clone()
            },
            str::to_owned,
        );

    Ok(TaskDraft {
        detailed_description,
        description,
        estimated_time,
        skill_level: skill_level(candidate),
        task_type: task_type(candidate),
        tags: string_list(candidate, "tags"),
        goal: string_field(candidate, "goal").unwrap_or_default().to_owned(),
        resources: string_list(candidate, "resources"),
    })
}

fn skill_level(candidate: &Map<String, Value>) -> SkillLevel {
    let raw = string_field(candidate, "skillLevel").unwrap_or_default();
    SkillLevel::try_from(raw).unwrap_or_else(|err| {
        debug!(error = %err, "coercing skill level to default");
        SkillLevel::default()
    })
}

fn task_type(candidate: &Map<String, Value>) -> TaskType {
    let raw = string_field(candidate, "type").unwrap_or_default();
    TaskType::try_from(raw).unwrap_or_else(|err| {
        debug!(error = %err, "coercing task type to default");
        TaskType::default()
    })
}
