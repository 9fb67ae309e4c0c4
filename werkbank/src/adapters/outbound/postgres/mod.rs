mod project_store;
mod task_store;

pub use project_store::PostgresProjectStore;
pub use task_store::PostgresTaskStore;

use crate::domain::RecordError;

fn storage_error(err: sqlx::Error) -> RecordError {
    RecordError::Storage(err.to_string())
}
