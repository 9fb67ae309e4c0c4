use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;

use super::storage_error;
use crate::domain::{
    budget::Budget,
    entity::Entity,
    models::{Project, ProjectFields, RecordId},
    ports::outbound::RecordStore,
    RecordError,
};

/// `budget` is a NUMERIC(12,2) column, selected as text so no decimal type
/// has to cross the driver boundary.
#[derive(sqlx::FromRow)]
struct ProjectRow {
    id: i64,
    name: String,
    client_name: Option<String>,
    budget: Option<String>,
    status: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<ProjectRow> for Project {
    type Error = RecordError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let status = row.status.parse().map_err(|_| {
            RecordError::storage(format!("unknown project status '{}'", row.status))
        })?;
        let budget = row
            .budget
            .as_deref()
            .map(Budget::try_from)
            .transpose()
            .map_err(|err| RecordError::storage(err.to_string()))?;

        Ok(Project::from_parts(
            RecordId::new(row.id),
            ProjectFields {
                name: row.name,
                client_name: row.client_name,
                budget,
                status,
            },
            row.created_at,
            row.updated_at,
        ))
    }
}

pub struct PostgresProjectStore {
    pool: PgPool,
}

impl PostgresProjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore<Project> for PostgresProjectStore {
    async fn find_all(&self) -> Result<Vec<Project>, RecordError> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT id, name, client_name, budget::text AS budget, status, created_at, updated_at
            FROM projects
            ORDER BY updated_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.into_iter().map(Project::try_from).collect()
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Project>, RecordError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT id, name, client_name, budget::text AS budget, status, created_at, updated_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        row.map(Project::try_from).transpose()
    }

    async fn create(&self, fields: &ProjectFields) -> Result<Project, RecordError> {
        let now = OffsetDateTime::now_utc();

        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            INSERT INTO projects (name, client_name, budget, status, created_at, updated_at)
            VALUES ($1, $2, $3::numeric, $4, $5, $5)
            RETURNING id, name, client_name, budget::text AS budget, status, created_at, updated_at
            "#,
        )
        .bind(&fields.name)
        .bind(fields.client_name.as_deref())
        .bind(fields.budget.as_deref())
        .bind(fields.status.as_ref())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        Project::try_from(row)
    }

    async fn update(&self, project: &Project) -> Result<bool, RecordError> {
        let fields = project.fields();
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET name = $1, client_name = $2, budget = $3::numeric, status = $4, updated_at = $5
            WHERE id = $6
            "#,
        )
        .bind(&fields.name)
        .bind(fields.client_name.as_deref())
        .bind(fields.budget.as_deref())
        .bind(fields.status.as_ref())
        .bind(project.updated_at())
        .bind(project.id().as_i64())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: RecordId) -> Result<bool, RecordError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(result.rows_affected() > 0)
    }
}
