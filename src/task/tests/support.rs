//! Shared fixtures for task unit tests.

use crate::task::domain::{Hours, OwnerId, Skill, SkillLevel, Task, TaskDraft, TaskType};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use serde_json::{Map, Value, json};
use std::sync::atomic::{AtomicI64, Ordering};

/// Clock that advances one second on every reading.
#[derive(Debug, Default)]
pub struct StepClock {
    ticks: AtomicI64,
}

impl Clock for StepClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        let epoch = Utc
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_default();
        epoch + Duration::seconds(tick)
    }
}

/// Clock reporting a fixed instant with nanosecond detail.
#[derive(Debug, Default)]
pub struct NanosecondClock;

impl Clock for NanosecondClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let epoch = Utc
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_default();
        epoch + Duration::nanoseconds(123_456_789)
    }
}

pub fn owner(name: &str) -> OwnerId {
    OwnerId::new(name).expect("valid owner")
}

pub fn draft() -> TaskDraft {
    TaskDraft {
        description: "Build a CLI todo list in Python".to_owned(),
        detailed_description: "Use argparse to add, list and remove todo items".to_owned(),
        estimated_time: Hours::new(2.0).expect("valid hours"),
        skill_level: SkillLevel::Beginner,
        task_type: TaskType::Project,
        tags: vec!["Python".to_owned(), "CLI".to_owned()],
        goal: "Practise argument parsing".to_owned(),
        resources: vec!["https://docs.python.org/3/library/argparse.html".to_owned()],
    }
}

pub fn pending_task(clock: &impl Clock) -> Task {
    Task::new_pending(
        owner("alice"),
        Skill::new("Python").expect("valid skill"),
        draft(),
        clock,
    )
}

/// Well-formed oracle task payload with the given estimate.
pub fn candidate_json(estimated_time: &Value) -> Value {
    json!({
        "description": "Create a Python function to calculate factorials recursively.",
        "detailedDescription": "Define a base case, implement the recursive case and test it.",
        "estimatedTime": estimated_time,
        "skillLevel": "Intermediate",
        "tags": ["Python", "Recursion"],
        "goal": "Understand recursion.",
        "type": "Challenge",
        "resources": ["https://docs.python.org/3/", "Python Official Docs"]
    })
}

pub fn as_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(object) => object,
        other => panic!("expected object, got {other}"),
    }
}
