//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Generated learning tasks and their lifecycle state.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Owning user identity.
        #[max_length = 255]
        owner_id -> Varchar,
        /// Normalized (lowercase) skill.
        #[max_length = 255]
        skill -> Varchar,
        /// Short generated summary.
        description -> Text,
        /// Longer generated narrative.
        detailed_description -> Text,
        /// Estimated effort in hours.
        estimated_time -> Float8,
        /// Difficulty level.
        #[max_length = 50]
        skill_level -> Varchar,
        /// Kind of task.
        #[max_length = 50]
        task_type -> Varchar,
        /// Ordered keyword list.
        tags -> Jsonb,
        /// Learning objective.
        goal -> Text,
        /// Ordered resource list.
        resources -> Jsonb,
        /// Task lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Completed flag.
        completed -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
