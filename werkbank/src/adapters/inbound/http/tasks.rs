use super::pages::{escape, status_badge, status_options, EntityView, Labels};
use crate::domain::{
    models::{Task, TaskStatus},
    validation::FormValues,
};

impl EntityView for Task {
    const LABELS: Labels = Labels {
        list_title: "Tasks",
        list_intro: "Aufgaben verwalten.",
        new_record: "Neue Aufgabe",
        create_intro: "Neue Aufgabe anlegen",
        edit_title: "Aufgabe bearbeiten",
        show_title: "Aufgabe anzeigen",
        empty: "Noch keine Einträge.",
    };

    fn table_head() -> &'static str {
        "<th>Titel</th><th>Status</th>"
    }

    fn table_cells(&self) -> String {
        let description = self
            .description()
            .map(|description| format!(r#"<div class="muted">{}</div>"#, escape(description)))
            .unwrap_or_default();

        format!(
            "<td><strong>{title}</strong>{description}</td><td>{status}</td>",
            title = escape(self.title()),
            status = status_badge(self.status().as_ref()),
        )
    }

    fn form_fields(values: &FormValues) -> String {
        format!(
            r#"<label>
    Titel
    <input type="text" name="title" maxlength="150" required value="{title}">
  </label>
  <label>
    Beschreibung
    <textarea name="description" maxlength="1000" rows="4">{description}</textarea>
  </label>
  <label>
    Status
    <select name="status">
        {options}
    </select>
  </label>"#,
            title = escape(values.get("title")),
            description = escape(values.get("description")),
            options = status_options::<TaskStatus>(values.get("status")),
        )
    }

    fn detail_fields(&self) -> String {
        format!(
            r#"<div><strong>Titel</strong><div>{title}</div></div>
  <div><strong>Beschreibung</strong><div class="muted">{description}</div></div>
  <div><strong>Status</strong><div>{status}</div></div>"#,
            title = escape(self.title()),
            description = escape(self.description().unwrap_or("-")),
            status = status_badge(self.status().as_ref()),
        )
    }
}
