//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Owning user identity.
    pub owner_id: String,
    /// Normalized skill.
    pub skill: String,
    /// Short generated summary.
    pub description: String,
    /// Longer generated narrative.
    pub detailed_description: String,
    /// Estimated effort in hours.
    pub estimated_time: f64,
    /// Difficulty level.
    pub skill_level: String,
    /// Kind of task.
    pub task_type: String,
    /// Ordered keyword list as a JSON array.
    pub tags: Value,
    /// Learning objective.
    pub goal: String,
    /// Ordered resource list as a JSON array.
    pub resources: Value,
    /// Lifecycle status.
    pub status: String,
    /// Completed flag.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Owning user identity.
    pub owner_id: String,
    /// Normalized skill.
    pub skill: String,
    /// Short generated summary.
    pub description: String,
    /// Longer generated narrative.
    pub detailed_description: String,
    /// Estimated effort in hours.
    pub estimated_time: f64,
    /// Difficulty level.
    pub skill_level: String,
    /// Kind of task.
    pub task_type: String,
    /// Ordered keyword list as a JSON array.
    pub tags: Value,
    /// Learning objective.
    pub goal: String,
    /// Ordered resource list as a JSON array.
    pub resources: Value,
    /// Lifecycle status.
    pub status: String,
    /// Completed flag.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset for the mutable lifecycle columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskLifecycleChangeset {
    /// Lifecycle status.
    pub status: String,
    /// Completed flag.
    pub completed: bool,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
