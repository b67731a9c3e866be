//! Application services for task lifecycle orchestration.

mod error;
mod lifecycle;
mod prompt;

pub use error::{ErrorDisposition, TaskLifecycleError, TaskLifecycleResult};
pub use lifecycle::{
    AnalyzeSubmissionRequest, GenerateTaskRequest, TaskLifecycleService, TasksBySkill,
};
pub use prompt::{PromptError, submission_analysis_prompt, task_generation_prompt};
