use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    adapters::outbound::postgres::{PostgresProjectStore, PostgresTaskStore},
    domain::{
        models::{Project, Task},
        ports::inbound::RecordService,
        services::RecordServiceImpl,
    },
};

/// Shared application state, one pipeline per entity.
#[derive(Clone)]
pub struct AppState {
    pub tasks: Arc<dyn RecordService<Task>>,
    pub projects: Arc<dyn RecordService<Project>>,
}

impl AppState {
    pub fn new(
        tasks: Arc<dyn RecordService<Task>>,
        projects: Arc<dyn RecordService<Project>>,
    ) -> Self {
        Self { tasks, projects }
    }

    /// Wires both pipelines against PostgreSQL.
    pub fn with_postgres(pool: PgPool) -> Self {
        let tasks = RecordServiceImpl::new(Arc::new(PostgresTaskStore::new(pool.clone())));
        let projects = RecordServiceImpl::new(Arc::new(PostgresProjectStore::new(pool)));

        Self::new(Arc::new(tasks), Arc::new(projects))
    }
}
