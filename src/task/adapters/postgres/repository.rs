//! `PostgreSQL` repository implementation for task lifecycle storage.

use super::{
    models::{NewTaskRow, TaskLifecycleChangeset, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        Hours, OwnerId, PersistedTaskData, Skill, SkillLevel, Task, TaskDraft, TaskId, TaskStatus,
        TaskType,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::Value;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = to_changeset(task);

        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id_for_owner(
        &self,
        id: TaskId,
        owner: &OwnerId,
    ) -> TaskRepositoryResult<Option<Task>> {
        let owner_id = owner.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::owner_id.eq(owner_id))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_owner_and_status(
        &self,
        owner: &OwnerId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let owner_id = owner.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::owner_id.eq(owner_id))
                .filter(tasks::status.eq(status.as_str()))
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    let tags = serde_json::to_value(task.tags()).map_err(TaskRepositoryError::persistence)?;
    let resources =
        serde_json::to_value(task.resources()).map_err(TaskRepositoryError::persistence)?;

    Ok(NewTaskRow {
        id: task.id().into_inner(),
        owner_id: task.owner_id().as_str().to_owned(),
        skill: task.skill().as_str().to_owned(),
        description: task.description().to_owned(),
        detailed_description: task.detailed_description().to_owned(),
        estimated_time: task.estimated_time().value(),
        skill_level: task.skill_level().as_str().to_owned(),
        task_type: task.task_type().as_str().to_owned(),
        tags,
        goal: task.goal().to_owned(),
        resources,
        status: task.status().as_str().to_owned(),
        completed: task.is_completed(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn to_changeset(task: &Task) -> TaskLifecycleChangeset {
    TaskLifecycleChangeset {
        status: task.status().as_str().to_owned(),
        completed: task.is_completed(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
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
        status,
        completed,
        created_at,
        updated_at,
    } = row;

    let draft = TaskDraft {
        description,
        detailed_description,
        estimated_time: Hours::new(estimated_time).map_err(TaskRepositoryError::persistence)?,
        skill_level: SkillLevel::try_from(skill_level.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        task_type: TaskType::try_from(task_type.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        tags: string_list(tags)?,
        goal,
        resources: string_list(resources)?,
    };

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        owner_id: OwnerId::new(owner_id).map_err(TaskRepositoryError::persistence)?,
        skill: Skill::new(skill).map_err(TaskRepositoryError::persistence)?,
        draft,
        status: TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?,
        completed,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

fn string_list(value: Value) -> TaskRepositoryResult<Vec<String>> {
    serde_json::from_value(value).map_err(TaskRepositoryError::persistence)
}
