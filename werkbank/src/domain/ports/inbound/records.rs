use async_trait::async_trait;

use crate::domain::{
    context::RequestContext,
    entity::Entity,
    models::{Outcome, RecordId},
    validation::FormInput,
    RecordError,
};

/// Inbound port for the read and mutation flows of one entity.
///
/// Every call receives the session-derived [`RequestContext`]; flash
/// messages set during the call are read back from it by the caller.
/// Mutations take the `csrf_token` submitted with the form and fail with
/// [`RecordError::InvalidCsrfToken`] before touching the store.
#[async_trait]
pub trait RecordService<E: Entity>: Send + Sync + 'static {
    /// List page; pulls and clears the pending flash.
    async fn index(&self, ctx: &mut RequestContext) -> Result<Outcome<E>, RecordError>;

    /// Empty create form with entity defaults.
    fn create_form(&self) -> Outcome<E>;

    async fn edit_form(
        &self,
        ctx: &mut RequestContext,
        id: Option<RecordId>,
    ) -> Result<Outcome<E>, RecordError>;

    async fn show(
        &self,
        ctx: &mut RequestContext,
        id: Option<RecordId>,
    ) -> Result<Outcome<E>, RecordError>;

    async fn store(
        &self,
        ctx: &mut RequestContext,
        submitted_token: &str,
        input: &FormInput,
    ) -> Result<Outcome<E>, RecordError>;

    async fn update(
        &self,
        ctx: &mut RequestContext,
        submitted_token: &str,
        id: Option<RecordId>,
        input: &FormInput,
    ) -> Result<Outcome<E>, RecordError>;

    async fn delete(
        &self,
        ctx: &mut RequestContext,
        submitted_token: &str,
        id: Option<RecordId>,
    ) -> Result<Outcome<E>, RecordError>;
}
