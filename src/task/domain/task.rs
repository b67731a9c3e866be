//! Task aggregate root and related task lifecycle types.

use super::{Hours, OwnerId, ParseTaskFieldError, Skill, TaskDomainError, TaskId};
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been generated and awaits the owner's decision.
    Pending,
    /// Owner accepted the task and is working on it.
    Accepted,
    /// Owner rejected the task, or deleted it after accepting.
    Rejected,
    /// A submission for the task scored above the completion threshold.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }

    /// Returns whether the lifecycle graph has an edge from `self` to
    /// `target`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Accepted | Self::Rejected)
                | (Self::Accepted, Self::Rejected | Self::Completed)
        )
    }

    /// Returns whether no transition leaves this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Completed)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskFieldError::new("task status", value)),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owner-triggered lifecycle operations, each allowed from one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskOperation {
    /// Accept a pending task.
    Accept,
    /// Reject a pending task.
    Reject,
    /// Soft-delete an accepted task.
    Delete,
    /// Flip the completed flag of an accepted task.
    ToggleCompletion,
    /// Submit work on an accepted task for scoring.
    Analyze,
}

impl TaskOperation {
    /// Returns the only status this operation may start from.
    #[must_use]
    pub const fn required_status(self) -> TaskStatus {
        match self {
            Self::Accept | Self::Reject => TaskStatus::Pending,
            Self::Delete | Self::ToggleCompletion | Self::Analyze => TaskStatus::Accepted,
        }
    }

    /// Returns a short verb phrase for messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::Delete => "delete",
            Self::ToggleCompletion => "toggle completion of",
            Self::Analyze => "analyze a submission for",
        }
    }
}

impl fmt::Display for TaskOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty of a generated task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillLevel {
    /// Introductory task; also the fallback for unrecognised levels.
    #[default]
    Beginner,
    /// Task assuming working familiarity with the skill.
    Intermediate,
    /// Task for experienced practitioners.
    Advanced,
}

impl SkillLevel {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl TryFrom<&str> for SkillLevel {
    type Error = ParseTaskFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Beginner" => Ok(Self::Beginner),
            "Intermediate" => Ok(Self::Intermediate),
            "Advanced" => Ok(Self::Advanced),
            _ => Err(ParseTaskFieldError::new("skill level", value)),
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of work a generated task asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    /// Build something end to end.
    Project,
    /// Solve a bounded problem.
    Challenge,
    /// Repeat an exercise; also the fallback for unrecognised types.
    #[default]
    Practice,
    /// Study material.
    Learning,
}

impl TaskType {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "Project",
            Self::Challenge => "Challenge",
            Self::Practice => "Practice",
            Self::Learning => "Learning",
        }
    }
}

impl TryFrom<&str> for TaskType {
    type Error = ParseTaskFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Project" => Ok(Self::Project),
            "Challenge" => Ok(Self::Challenge),
            "Practice" => Ok(Self::Practice),
            "Learning" => Ok(Self::Learning),
            _ => Err(ParseTaskFieldError::new("task type", value)),
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated content of a generated task, ready to become a [`Task`].
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    /// Short summary.
    pub description: String,
    /// Longer narrative; equals `description` when the oracle omitted it.
    pub detailed_description: String,
    /// Estimated effort, never above the requested time.
    pub estimated_time: Hours,
    /// Difficulty level.
    pub skill_level: SkillLevel,
    /// Kind of task.
    pub task_type: TaskType,
    /// Keywords in oracle order.
    pub tags: Vec<String>,
    /// Learning objective.
    pub goal: String,
    /// URLs or resource titles in oracle order.
    pub resources: Vec<String>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    owner_id: OwnerId,
    skill: Skill,
    description: String,
    detailed_description: String,
    estimated_time: Hours,
    skill_level: SkillLevel,
    #[serde(rename = "type")]
    task_type: TaskType,
    tags: Vec<String>,
    goal: String,
    resources: Vec<String>,
    status: TaskStatus,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owner identity.
    pub owner_id: OwnerId,
    /// Persisted skill.
    pub skill: Skill,
    /// Persisted generated content.
    pub draft: TaskDraft,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted completed flag.
    pub completed: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new pending task from validated generated content.
    #[must_use]
    pub fn new_pending(
        owner_id: OwnerId,
        skill: Skill,
        draft: TaskDraft,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = stored_precision(clock.utc());
        let TaskDraft {
            description,
            detailed_description,
            estimated_time,
            skill_level,
            task_type,
            tags,
            goal,
            resources,
        } = draft;

        Self {
            id: TaskId::new(),
            owner_id,
            skill,
            description,
            detailed_description,
            estimated_time,
            skill_level,
            task_type,
            tags,
            goal,
            resources,
            status: TaskStatus::Pending,
            completed: false,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        let PersistedTaskData {
            id,
            owner_id,
            skill,
            draft,
            status,
            completed,
            created_at,
            updated_at,
        } = data;

        Self {
            id,
            owner_id,
            skill,
            description: draft.description,
            detailed_description: draft.detailed_description,
            estimated_time: draft.estimated_time,
            skill_level: draft.skill_level,
            task_type: draft.task_type,
            tags: draft.tags,
            goal: draft.goal,
            resources: draft.resources,
            status,
            completed,
            created_at,
            updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    /// Returns whether `owner` owns this task.
    #[must_use]
    pub fn is_owned_by(&self, owner: &OwnerId) -> bool {
        self.owner_id == *owner
    }

    /// Returns the normalized skill.
    #[must_use]
    pub const fn skill(&self) -> &Skill {
        &self.skill
    }

    /// Returns the short description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the detailed description.
    #[must_use]
    pub fn detailed_description(&self) -> &str {
        &self.detailed_description
    }

    /// Returns the estimated effort.
    #[must_use]
    pub const fn estimated_time(&self) -> Hours {
        self.estimated_time
    }

    /// Returns the difficulty level.
    #[must_use]
    pub const fn skill_level(&self) -> SkillLevel {
        self.skill_level
    }

    /// Returns the kind of task.
    #[must_use]
    pub const fn task_type(&self) -> TaskType {
        self.task_type
    }

    /// Returns the tags in oracle order.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the learning objective.
    #[must_use]
    pub fn goal(&self) -> &str {
        &self.goal
    }

    /// Returns the resources in oracle order.
    #[must_use]
    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the completed flag.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves a pending task to [`TaskStatus::Accepted`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidState`] unless the task is pending.
    pub fn accept(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.transition(TaskOperation::Accept, TaskStatus::Accepted, clock)
    }

    /// Moves a pending task to [`TaskStatus::Rejected`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidState`] unless the task is pending.
    pub fn reject(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.transition(TaskOperation::Reject, TaskStatus::Rejected, clock)
    }

    /// Soft-deletes an accepted task by moving it to
    /// [`TaskStatus::Rejected`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidState`] unless the task is accepted.
    pub fn soft_delete(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.transition(TaskOperation::Delete, TaskStatus::Rejected, clock)
    }

    /// Sets the completed flag of an accepted task. The status is left
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidState`] unless the task is accepted.
    pub fn set_completed(
        &mut self,
        completed: bool,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_allowed(TaskOperation::ToggleCompletion)?;
        self.completed = completed;
        self.touch(clock);
        Ok(())
    }

    /// Completes an accepted task after a passing submission analysis.
    ///
    /// Sets both the status and the completed flag in one step.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidState`] unless the task is accepted.
    pub fn complete_from_analysis(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.transition(TaskOperation::Analyze, TaskStatus::Completed, clock)?;
        self.completed = true;
        Ok(())
    }

    /// Checks that `operation` may run in the current status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidState`] when it may not.
    pub fn ensure_allowed(&self, operation: TaskOperation) -> Result<(), TaskDomainError> {
        if self.status != operation.required_status() {
            return Err(self.invalid_state(operation));
        }
        Ok(())
    }

    fn transition(
        &mut self,
        operation: TaskOperation,
        target: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_allowed(operation)?;
        if !self.status.can_transition_to(target) {
            return Err(self.invalid_state(operation));
        }
        self.status = target;
        self.touch(clock);
        Ok(())
    }

    const fn invalid_state(&self, operation: TaskOperation) -> TaskDomainError {
        TaskDomainError::InvalidState {
            task_id: self.id,
            status: self.status,
            operation,
        }
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = stored_precision(clock.utc());
    }
}

/// Truncates a timestamp to the microsecond precision `timestamptz` keeps,
/// so a task read back from storage equals the one that was written.
fn stored_precision(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp.trunc_subsecs(6)
}
