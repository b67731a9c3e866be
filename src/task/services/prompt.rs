//! Prompt templates sent to the generation oracle.

use crate::task::domain::{Hours, Skill, Submission, Task};
use minijinja::{Environment, context};
use thiserror::Error;

const TASK_GENERATION_TEMPLATE: &str = r#"
You are an AI-powered task recommendation system for students. Generate ONE specific, actionable task for the skill "{{ skill }}" that can be completed in approximately {{ hours }} hour(s). The task should enhance the student's proficiency in the skill.

Return a JSON object with the following fields:
- description (string, 20-50 words, concise summary)
- detailedDescription (string, 50-100 words, detailed context or steps)
- estimatedTime (number, hours, must not exceed {{ hours }})
- skillLevel (string, "Beginner" | "Intermediate" | "Advanced")
- tags (array of strings, relevant keywords)
- goal (string, learning objective, 10-20 words)
- type (string, "Project" | "Challenge" | "Practice" | "Learning")
- resources (array of strings, URLs or titles of reputable learning resources)

Example:
{
  "description": "Create a Python function to calculate the factorial of a number recursively.",
  "detailedDescription": "Write a Python function that uses recursion to compute the factorial of a positive integer. Start by defining a base case for 0 or 1, then implement the recursive case. Test the function with inputs like 5 and 10 to verify correctness. This task helps understand recursion and function design.",
  "estimatedTime": 1,
  "skillLevel": "Beginner",
  "tags": ["Python", "Functions", "Recursion"],
  "goal": "Understand recursive function implementation in Python.",
  "type": "Practice",
  "resources": ["https://www.w3schools.com/python/", "Python Official Docs"]
}

Ensure the response is valid JSON without markdown wrappers.
"#;

const SUBMISSION_ANALYSIS_TEMPLATE: &str = r#"
Analyze the following user submission for the task: "{{ description }}".
Task details: {{ detailed_description }}.
Skill: {{ skill }}, Level: {{ level }}.
Submission content: {{ submission }}.
Provide a score (0-100) and feedback (strengths, weaknesses, suggestions).
Return a JSON object:
{
  "score": number,
  "feedback": {
    "strengths": string,
    "weaknesses": string,
    "suggestions": string
  }
}
Ensure the response is valid JSON without markdown wrappers.
"#;

/// A prompt template failed to render.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render {prompt} prompt: {reason}")]
pub struct PromptError {
    /// Which prompt failed.
    pub prompt: &'static str,
    /// Renderer message.
    pub reason: String,
}

/// Renders the prompt asking for one task for `skill` within `hours`.
///
/// # Errors
///
/// Returns [`PromptError`] if the template fails to render.
pub fn task_generation_prompt(skill: &Skill, hours: Hours) -> Result<String, PromptError> {
    render(
        "task generation",
        TASK_GENERATION_TEMPLATE,
        context! {
            skill => skill.as_str(),
            hours => hours.to_string(),
        },
    )
}

/// Renders the prompt asking the oracle to score `submission` against
/// `task`.
///
/// # Errors
///
/// Returns [`PromptError`] if the template fails to render.
pub fn submission_analysis_prompt(
    task: &Task,
    submission: &Submission,
) -> Result<String, PromptError> {
    render(
        "submission analysis",
        SUBMISSION_ANALYSIS_TEMPLATE,
        context! {
            description => task.description(),
            detailed_description => task.detailed_description(),
            skill => task.skill().as_str(),
            level => task.skill_level().as_str(),
            submission => submission.content(),
        },
    )
}

fn render(
    prompt: &'static str,
    template: &str,
    context: minijinja::Value,
) -> Result<String, PromptError> {
    let environment = Environment::new();
    environment
        .render_str(template, context)
        .map_err(|error| PromptError {
            prompt,
            reason: error.to_string(),
        })
}
