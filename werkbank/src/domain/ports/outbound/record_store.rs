//! Record store port (outbound).
//!
//! Defines the persistence interface of one record type. Implementations
//! must bind every user-supplied value as a query parameter.

use async_trait::async_trait;

use crate::domain::{entity::Entity, models::RecordId, RecordError};

/// Outbound port for CRUD persistence of a single entity.
#[async_trait]
pub trait RecordStore<E: Entity>: Send + Sync + 'static {
    /// All records, most recently updated first.
    async fn find_all(&self) -> Result<Vec<E>, RecordError>;

    async fn find_by_id(&self, id: RecordId) -> Result<Option<E>, RecordError>;

    /// Inserts a record; id and timestamps are assigned by the store, with
    /// `created_at == updated_at`.
    async fn create(&self, fields: &E::Fields) -> Result<E, RecordError>;

    /// Writes all mutable fields and `updated_at` of `record`, keyed by its id.
    ///
    /// Returns `false` if no such row exists.
    async fn update(&self, record: &E) -> Result<bool, RecordError>;

    /// Returns `false` if no such row exists.
    async fn delete(&self, id: RecordId) -> Result<bool, RecordError>;
}
