//! Entity descriptor shared by the generic read and mutation pipelines.
//!
//! Each record type implements [`Entity`] once; routing, flash handling,
//! validation and persistence are written against the trait instead of
//! per-entity copies.

use std::fmt::Debug;

use strum::{Display, EnumString};
use time::OffsetDateTime;

use super::models::RecordId;
use super::validation::{FormInput, FormValues, ValidationResult};

/// Flash shown when a request carries a missing or malformed id.
pub const INVALID_ID: &str = "Ungültige ID.";
/// Flash shown when the addressed record does not exist (anymore).
pub const NOT_FOUND: &str = "Eintrag nicht gefunden.";

/// The record types served by the application, keyed by their routing slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum EntityKind {
    #[default]
    Tasks,
    Projects,
}

impl EntityKind {
    /// Resolves the `entity` query parameter; unknown values fall back to tasks.
    pub fn from_param(raw: Option<&str>) -> Self {
        raw.and_then(|raw| raw.parse().ok()).unwrap_or_default()
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Projects => "projects",
        }
    }

    /// Session key holding this entity's one-shot flash message.
    pub fn flash_key(&self) -> &'static str {
        match self {
            Self::Tasks => "tasks_flash",
            Self::Projects => "projects_flash",
        }
    }

    pub fn list_path(&self) -> String {
        format!("/?entity={}", self.slug())
    }
}

/// Flash messages emitted after a successful write.
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    pub created: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
}

/// Capability set of a persisted record type.
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    /// Validated, normalized values of all user-editable fields.
    type Fields: Clone + Debug + Send + Sync + 'static;

    const KIND: EntityKind;
    const MESSAGES: Messages;

    /// Assembles a record from its stored parts.
    fn from_parts(
        id: RecordId,
        fields: Self::Fields,
        created_at: OffsetDateTime,
        updated_at: OffsetDateTime,
    ) -> Self;

    fn id(&self) -> RecordId;
    fn created_at(&self) -> OffsetDateTime;
    fn updated_at(&self) -> OffsetDateTime;

    /// Current field values of this record.
    fn fields(&self) -> Self::Fields;

    /// Returns a new record carrying `fields`, with `updated_at` set to now.
    fn with_changes(&self, fields: Self::Fields) -> Self {
        Self::from_parts(
            self.id(),
            fields,
            self.created_at(),
            OffsetDateTime::now_utc(),
        )
    }

    /// Validates and normalizes a raw form submission.
    fn validate(input: &FormInput) -> ValidationResult<Self::Fields>;

    /// Values of an empty create form.
    fn form_defaults() -> FormValues;

    /// Values of an edit form pre-filled from this record.
    fn form_values(&self) -> FormValues;
}
