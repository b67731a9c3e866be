//! Domain model for the task lifecycle.
//!
//! The task domain models generated learning tasks, their owner-scoped
//! lifecycle, and submission analysis results while keeping all
//! infrastructure concerns outside of the domain boundary.

mod analysis;
mod error;
mod ids;
mod task;

pub use analysis::{AnalysisFeedback, Score, Submission, SubmissionAnalysis};
pub use error::{ParseTaskFieldError, TaskDomainError};
pub use ids::{Hours, OwnerId, Skill, TaskId};
pub use task::{
    PersistedTaskData, SkillLevel, Task, TaskDraft, TaskOperation, TaskStatus, TaskType,
};
