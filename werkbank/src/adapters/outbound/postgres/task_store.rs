use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;

use super::storage_error;
use crate::domain::{
    entity::Entity,
    models::{RecordId, Task, TaskFields},
    ports::outbound::RecordStore,
    RecordError,
};

#[derive(sqlx::FromRow)]
struct TaskRow {
    id: i64,
    title: String,
    description: Option<String>,
    status: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<TaskRow> for Task {
    type Error = RecordError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse()
            .map_err(|_| RecordError::storage(format!("unknown task status '{}'", row.status)))?;

        Ok(Task::from_parts(
            RecordId::new(row.id),
            TaskFields {
                title: row.title,
                description: row.description,
                status,
            },
            row.created_at,
            row.updated_at,
        ))
    }
}

pub struct PostgresTaskStore {
    pool: PgPool,
}

impl PostgresTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<Task> for PostgresTaskStore {
    async fn find_all(&self) -> Result<Vec<Task>, RecordError> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT id, title, description, status, created_at, updated_at
            FROM tasks
            ORDER BY updated_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Task>, RecordError> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT id, title, description, status, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        row.map(Task::try_from).transpose()
    }

    async fn create(&self, fields: &TaskFields) -> Result<Task, RecordError> {
        let now = OffsetDateTime::now_utc();

        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            INSERT INTO tasks (title, description, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id, title, description, status, created_at, updated_at
            "#,
        )
        .bind(&fields.title)
        .bind(fields.description.as_deref())
        .bind(fields.status.as_ref())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        Task::try_from(row)
    }

    async fn update(&self, task: &Task) -> Result<bool, RecordError> {
        let fields = task.fields();
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = $1, description = $2, status = $3, updated_at = $4
            WHERE id = $5
            "#,
        )
        .bind(&fields.title)
        .bind(fields.description.as_deref())
        .bind(fields.status.as_ref())
        .bind(task.updated_at())
        .bind(task.id().as_i64())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: RecordId) -> Result<bool, RecordError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(result.rows_affected() > 0)
    }
}
