use strum::{AsRefStr, Display, EnumIter, EnumString};
use time::OffsetDateTime;

use super::RecordId;
use crate::domain::budget::Budget;
use crate::domain::entity::{Entity, EntityKind, Messages};
use crate::domain::validation::{
    optional_text, parse_status, require_text, FormInput, FormValues, ValidationResult,
};

const NAME_MAX: usize = 150;
const CLIENT_NAME_MAX: usize = 120;

/// Lifecycle state of a project.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Planned,
    Active,
    Completed,
}

/// User-editable project fields after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFields {
    pub name: String,
    pub client_name: Option<String>,
    pub budget: Option<Budget>,
    pub status: ProjectStatus,
}

/// A stored project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    id: RecordId,
    name: String,
    client_name: Option<String>,
    budget: Option<Budget>,
    status: ProjectStatus,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl Project {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn client_name(&self) -> Option<&str> {
        self.client_name.as_deref()
    }

    pub fn budget(&self) -> Option<&Budget> {
        self.budget.as_ref()
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }
}

impl Entity for Project {
    type Fields = ProjectFields;

    const KIND: EntityKind = EntityKind::Projects;
    const MESSAGES: Messages = Messages {
        created: "Projekt erstellt.",
        updated: "Projekt aktualisiert.",
        deleted: "Projekt gelöscht.",
    };

    fn from_parts(
        id: RecordId,
        fields: ProjectFields,
        created_at: OffsetDateTime,
        updated_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            name: fields.name,
            client_name: fields.client_name,
            budget: fields.budget,
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

    fn fields(&self) -> ProjectFields {
        ProjectFields {
            name: self.name.clone(),
            client_name: self.client_name.clone(),
            budget: self.budget.clone(),
            status: self.status,
        }
    }

    fn validate(input: &FormInput) -> ValidationResult<ProjectFields> {
        let mut errors = Vec::new();

        let name = input.trimmed("name");
        require_text(
            name,
            NAME_MAX,
            "Projektname ist erforderlich.",
            "Projektname darf maximal 150 Zeichen haben.",
            &mut errors,
        );

        let client_name = optional_text(
            input.trimmed("client_name"),
            CLIENT_NAME_MAX,
            "Kundenname darf maximal 120 Zeichen haben.",
            &mut errors,
        );

        // The form keeps showing what was typed when the budget is rejected.
        let budget_input = input.trimmed("budget");
        let mut budget_value = budget_input.to_string();
        let budget = if budget_input.is_empty() {
            None
        } else {
            match Budget::try_from(budget_input) {
                Ok(budget) => {
                    budget_value = budget.to_string();
                    Some(budget)
                }
                Err(_) => {
                    errors.push("Budget muss numerisch sein (max. 2 Nachkommastellen).".to_string());
                    None
                }
            }
        };

        let (status_value, status) = parse_status::<ProjectStatus>(input, &mut errors);

        let data = FormValues::new()
            .with("name", name)
            .with("client_name", client_name.clone().unwrap_or_default())
            .with("budget", budget_value)
            .with("status", status_value);

        let fields = status.map(|status| ProjectFields {
            name: name.to_string(),
            client_name,
            budget,
            status,
        });

        ValidationResult::new(errors, data, fields)
    }

    fn form_defaults() -> FormValues {
        FormValues::new()
            .with("name", "")
            .with("client_name", "")
            .with("budget", "")
            .with("status", ProjectStatus::default().as_ref())
    }

    fn form_values(&self) -> FormValues {
        FormValues::new()
            .with("name", self.name.as_str())
            .with("client_name", self.client_name.clone().unwrap_or_default())
            .with(
                "budget",
                self.budget.as_ref().map(Budget::to_string).unwrap_or_default(),
            )
            .with("status", self.status.as_ref())
    }
}
