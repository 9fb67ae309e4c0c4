use strum::{AsRefStr, Display, EnumIter, EnumString};
use time::OffsetDateTime;

use super::RecordId;
use crate::domain::entity::{Entity, EntityKind, Messages};
use crate::domain::validation::{
    optional_text, parse_status, require_text, FormInput, FormValues, ValidationResult,
};

const TITLE_MAX: usize = 150;
const DESCRIPTION_MAX: usize = 1000;

/// Workflow state of a task.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

/// User-editable task fields after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
}

/// A stored task. Changes go through [`Entity::with_changes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: RecordId,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl Task {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }
}

impl Entity for Task {
    type Fields = TaskFields;

    const KIND: EntityKind = EntityKind::Tasks;
    const MESSAGES: Messages = Messages {
        created: "Eintrag erstellt.",
        updated: "Eintrag aktualisiert.",
        deleted: "Eintrag gelöscht.",
    };

    fn from_parts(
        id: RecordId,
        fields: TaskFields,
        created_at: OffsetDateTime,
        updated_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            status: fields.status,
            created_at,
            updated_at,
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }

    fn fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
        }
    }

    fn validate(input: &FormInput) -> ValidationResult<TaskFields> {
        let mut errors = Vec::new();

        let title = input.trimmed("title");
        require_text(
            title,
            TITLE_MAX,
            "Titel ist erforderlich.",
            "Titel darf maximal 150 Zeichen haben.",
            &mut errors,
        );

        let description = optional_text(
            input.trimmed("description"),
            DESCRIPTION_MAX,
            "Beschreibung darf maximal 1000 Zeichen haben.",
            &mut errors,
        );

        let (status_value, status) = parse_status::<TaskStatus>(input, &mut errors);

        let data = FormValues::new()
            .with("title", title)
            .with("description", description.clone().unwrap_or_default())
            .with("status", status_value);

        let fields = status.map(|status| TaskFields {
            title: title.to_string(),
            description,
            status,
        });

        ValidationResult::new(errors, data, fields)
    }

    fn form_defaults() -> FormValues {
        FormValues::new()
            .with("title", "")
            .with("description", "")
            .with("status", TaskStatus::default().as_ref())
    }

    fn form_values(&self) -> FormValues {
        FormValues::new()
            .with("title", self.title.as_str())
            .with("description", self.description.clone().unwrap_or_default())
            .with("status", self.status.as_ref())
    }
}
