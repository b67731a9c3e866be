//! Service layer for task generation, lifecycle transitions and lookup.

use super::error::{TaskLifecycleError, TaskLifecycleResult};
use super::prompt::{submission_analysis_prompt, task_generation_prompt};
use crate::config::LifecyclePolicy;
use crate::oracle::{OracleGateway, sanitize};
use crate::task::{
    domain::{
        Hours, OwnerId, Skill, Submission, SubmissionAnalysis, Task, TaskDomainError, TaskId,
        TaskOperation, TaskStatus,
    },
    ports::TaskRepository,
    validation::{validate_analysis, validate_task_candidate},
};
use indexmap::IndexMap;
use mockable::Clock;
use std::sync::Arc;
use tracing::{error, info};

/// Request payload for generating a task.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateTaskRequest {
    owner: OwnerId,
    skill: String,
    requested_hours: f64,
}

impl GenerateTaskRequest {
    /// Creates a request for one task in `skill` fitting `requested_hours`.
    #[must_use]
    pub fn new(owner: OwnerId, skill: impl Into<String>, requested_hours: f64) -> Self {
        Self {
            owner,
            skill: skill.into(),
            requested_hours,
        }
    }
}

/// Request payload for analysing a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeSubmissionRequest {
    owner: OwnerId,
    task_id: TaskId,
    file: Option<Vec<u8>>,
    text: Option<String>,
}

impl AnalyzeSubmissionRequest {
    /// Creates a request with no submission content yet.
    #[must_use]
    pub const fn new(owner: OwnerId, task_id: TaskId) -> Self {
        Self {
            owner,
            task_id,
            file: None,
            text: None,
        }
    }

    /// Attaches uploaded file content. Non-empty file content takes
    /// precedence over inline text.
    #[must_use]
    pub fn with_file(mut self, content: impl Into<Vec<u8>>) -> Self {
        self.file = Some(content.into());
        self
    }

    /// Attaches inline submission text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Accepted tasks grouped by display skill name, groups ordered by their
/// newest task.
pub type TasksBySkill = IndexMap<String, Vec<Task>>;

/// Task lifecycle orchestration service.
///
/// Holds no per-request state; concurrent mutations of one task are not
/// serialized and the last write wins.
#[derive(Clone)]
pub struct TaskLifecycleService<R, G, C>
where
    R: TaskRepository,
    G: OracleGateway,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    gateway: Arc<G>,
    clock: Arc<C>,
    policy: LifecyclePolicy,
}

impl<R, G, C> TaskLifecycleService<R, G, C>
where
    R: TaskRepository,
    G: OracleGateway,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service with the default policy.
    #[must_use]
    pub fn new(repository: Arc<R>, gateway: Arc<G>, clock: Arc<C>) -> Self {
        Self {
            repository,
            gateway,
            clock,
            policy: LifecyclePolicy::default(),
        }
    }

    /// Replaces the lifecycle policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: LifecyclePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the active lifecycle policy.
    #[must_use]
    pub const fn policy(&self) -> &LifecyclePolicy {
        &self.policy
    }

    /// Generates, validates and stores a new pending task.
    ///
    /// Nothing is persisted unless the oracle output passes validation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] for a blank skill or a
    /// requested time below the policy minimum,
    /// [`TaskLifecycleError::Oracle`] when no transport answered,
    /// [`TaskLifecycleError::MalformedResponse`] for unparsable output,
    /// [`TaskLifecycleError::Constraint`] when the task breaks a hard
    /// constraint, and [`TaskLifecycleError::Repository`] when storage
    /// fails.
    pub async fn generate_task(&self, request: GenerateTaskRequest) -> TaskLifecycleResult<Task> {
        let GenerateTaskRequest {
            owner,
            skill: raw_skill,
            requested_hours,
        } = request;
        let skill = Skill::new(raw_skill)?;
        let requested = self.requested_hours(requested_hours)?;

        let prompt = task_generation_prompt(&skill, requested)?;
        let raw = self.gateway.generate(&prompt).await?;
        let candidate = sanitize(&raw).inspect_err(|err| {
            error!(raw = %err.raw, reason = %err.reason, "task generation returned malformed output");
        })?;
        let draft = validate_task_candidate(&candidate, requested).inspect_err(|err| {
            error!(candidate = %err.candidate, field = err.field, "generated task rejected");
        })?;

        let task = Task::new_pending(owner, skill, draft, &*self.clock);
        self.repository.store(&task).await?;
        info!(
            task_id = %task.id(),
            skill = %task.skill(),
            estimated_time = task.estimated_time().value(),
            "generated task"
        );
        Ok(task)
    }

    /// Lists the owner's pending tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn list_pending(&self, owner: &OwnerId) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self
            .repository
            .find_by_owner_and_status(owner, TaskStatus::Pending)
            .await?)
    }

    /// Lists the owner's accepted tasks grouped by capitalized skill name.
    ///
    /// Groups appear in the order their newest task was created, most recent
    /// first, and each group lists its tasks newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn list_accepted_by_skill(&self, owner: &OwnerId) -> TaskLifecycleResult<TasksBySkill> {
        let accepted = self
            .repository
            .find_by_owner_and_status(owner, TaskStatus::Accepted)
            .await?;
        let mut grouped = TasksBySkill::new();
        for task in accepted {
            grouped
                .entry(task.skill().display_name())
                .or_default()
                .push(task);
        }
        Ok(grouped)
    }

    /// Returns one of the owner's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// or belongs to another user.
    pub async fn get_task(&self, owner: &OwnerId, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.load_owned(owner, task_id).await
    }

    /// Accepts a pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for missing or foreign tasks
    /// and [`TaskDomainError::InvalidState`] unless the task is pending.
    pub async fn accept_task(&self, owner: &OwnerId, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.mutate(owner, task_id, TaskOperation::Accept, |task, clock| {
            task.accept(clock)
        })
        .await
    }

    /// Rejects a pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for missing or foreign tasks
    /// and [`TaskDomainError::InvalidState`] unless the task is pending.
    pub async fn reject_task(&self, owner: &OwnerId, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.mutate(owner, task_id, TaskOperation::Reject, |task, clock| {
            task.reject(clock)
        })
        .await
    }

    /// Soft-deletes an accepted task by moving it to rejected.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for missing or foreign tasks
    /// and [`TaskDomainError::InvalidState`] unless the task is accepted.
    pub async fn delete_task(&self, owner: &OwnerId, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.mutate(owner, task_id, TaskOperation::Delete, |task, clock| {
            task.soft_delete(clock)
        })
        .await
    }

    /// Sets the completed flag of an accepted task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for missing or foreign tasks
    /// and [`TaskDomainError::InvalidState`] unless the task is accepted.
    pub async fn set_completion(
        &self,
        owner: &OwnerId,
        task_id: TaskId,
        completed: bool,
    ) -> TaskLifecycleResult<Task> {
        self.mutate(
            owner,
            task_id,
            TaskOperation::ToggleCompletion,
            |task, clock| task.set_completed(completed, clock),
        )
        .await
    }

    /// Scores a submission for an accepted task.
    ///
    /// A score above the policy threshold completes the task before the
    /// analysis is returned; lower scores leave it untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for missing or foreign tasks,
    /// [`TaskDomainError::InvalidState`] unless the task is accepted,
    /// [`TaskDomainError::MissingSubmission`] without content,
    /// [`TaskLifecycleError::Oracle`] or
    /// [`TaskLifecycleError::MalformedResponse`] for oracle failures, and
    /// [`TaskLifecycleError::InvalidScore`] for an unusable score.
    pub async fn analyze_submission(
        &self,
        request: AnalyzeSubmissionRequest,
    ) -> TaskLifecycleResult<SubmissionAnalysis> {
        let AnalyzeSubmissionRequest {
            owner,
            task_id,
            file,
            text,
        } = request;
        let mut task = self.load_owned(&owner, task_id).await?;
        task.ensure_allowed(TaskOperation::Analyze)?;
        let submission = Submission::from_parts(file.as_deref(), text.as_deref())?;

        let prompt = submission_analysis_prompt(&task, &submission)?;
        let raw = self.gateway.generate(&prompt).await?;
        let payload = sanitize(&raw).inspect_err(|err| {
            error!(task_id = %task_id, raw = %err.raw, "submission analysis returned malformed output");
        })?;
        let analysis = validate_analysis(&payload).inspect_err(|err| {
            error!(task_id = %task_id, payload = %err.payload, "submission analysis score rejected");
        })?;

        if analysis.score.exceeds(self.policy.completion_threshold) {
            task.complete_from_analysis(&*self.clock)?;
            self.repository.update(&task).await?;
            info!(task_id = %task_id, score = analysis.score.value(), "task completed by analysis");
        } else {
            info!(task_id = %task_id, score = analysis.score.value(), "submission below completion threshold");
        }
        Ok(analysis)
    }

    fn requested_hours(&self, requested_hours: f64) -> TaskLifecycleResult<Hours> {
        let minimum = self.policy.min_requested_hours;
        if !requested_hours.is_finite() || requested_hours < minimum {
            return Err(TaskDomainError::RequestedTimeTooShort {
                requested: requested_hours,
                minimum,
            }
            .into());
        }
        Ok(Hours::new(requested_hours)?)
    }

    async fn load_owned(&self, owner: &OwnerId, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id_for_owner(task_id, owner)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))
    }

    async fn mutate<F>(
        &self,
        owner: &OwnerId,
        task_id: TaskId,
        operation: TaskOperation,
        apply: F,
    ) -> TaskLifecycleResult<Task>
    where
        F: FnOnce(&mut Task, &C) -> Result<(), TaskDomainError> + Send,
    {
        let mut task = self.load_owned(owner, task_id).await?;
        let previous = task.status();
        apply(&mut task, &*self.clock)?;
        self.repository.update(&task).await?;
        info!(
            task_id = %task_id,
            operation = %operation,
            from = %previous,
            to = %task.status(),
            completed = task.is_completed(),
            "task lifecycle operation applied"
        );
        Ok(task)
    }
}
