use super::pages::{escape, status_badge, status_options, EntityView, Labels};
use crate::domain::{
    budget::Budget,
    models::{Project, ProjectStatus},
    validation::FormValues,
};

fn budget_text(budget: Option<&Budget>) -> String {
    budget
        .map(|budget| escape(&format!("{budget} EUR")))
        .unwrap_or_else(|| "-".to_string())
}

impl EntityView for Project {
    const LABELS: Labels = Labels {
        list_title: "Projects",
        list_intro: "Projekte und Budgets verwalten.",
        new_record: "Neues Projekt",
        create_intro: "Projekt anlegen",
        edit_title: "Projekt bearbeiten",
        show_title: "Projekt anzeigen",
        empty: "Noch keine Projekte.",
    };

    fn table_head() -> &'static str {
        "<th>Name</th><th>Kunde</th><th>Budget</th><th>Status</th>"
    }

    fn table_cells(&self) -> String {
        format!(
            "<td><strong>{name}</strong></td><td>{client}</td><td>{budget}</td><td>{status}</td>",
            name = escape(self.name()),
            client = escape(self.client_name().unwrap_or("-")),
            budget = budget_text(self.budget()),
            status = status_badge(self.status().as_ref()),
        )
    }

    fn form_fields(values: &FormValues) -> String {
        format!(
            r#"<label>
    Projektname
    <input type="text" name="name" maxlength="150" required value="{name}">
  </label>
  <label>
    Kunde
    <input type="text" name="client_name" maxlength="120" value="{client}">
  </label>
  <label>
    Budget (EUR)
    <input type="text" name="budget" inputmode="decimal" maxlength="13" value="{budget}">
  </label>
  <label>
    Status
    <select name="status">
        {options}
    </select>
  </label>"#,
            name = escape(values.get("name")),
            client = escape(values.get("client_name")),
            budget = escape(values.get("budget")),
            options = status_options::<ProjectStatus>(values.get("status")),
        )
    }

    fn detail_fields(&self) -> String {
        format!(
            r#"<div><strong>Name</strong><div>{name}</div></div>
  <div><strong>Kunde</strong><div class="muted">{client}</div></div>
  <div><strong>Budget</strong><div>{budget}</div></div>
  <div><strong>Status</strong><div>{status}</div></div>"#,
            name = escape(self.name()),
            client = escape(self.client_name().unwrap_or("-")),
            budget = budget_text(self.budget()),
            status = status_badge(self.status().as_ref()),
        )
    }
}
