use ammonia::clean_text;
use strum::IntoEnumIterator;
use time::{macros::format_description, OffsetDateTime};

use super::layout::layout;
use crate::domain::{
    csrf::CsrfToken,
    entity::Entity,
    models::Page,
    validation::FormValues,
};

/// Static texts of an entity's pages.
#[derive(Debug, Clone, Copy)]
pub struct Labels {
    pub list_title: &'static str,
    pub list_intro: &'static str,
    pub new_record: &'static str,
    pub create_intro: &'static str,
    pub edit_title: &'static str,
    pub show_title: &'static str,
    pub empty: &'static str,
}

/// HTML rendering of one entity type.
///
/// Implementations return escaped fragments; the page skeleton, flash,
/// error box and action forms are shared.
pub trait EntityView: Entity {
    const LABELS: Labels;

    /// `<th>` cells of the list table, without the trailing actions column.
    fn table_head() -> &'static str;

    /// `<td>` cells of one list row, without the actions column.
    fn table_cells(&self) -> String;

    /// Input controls of the create/edit form.
    fn form_fields(values: &FormValues) -> String;

    /// Field blocks of the detail page, without the timestamps.
    fn detail_fields(&self) -> String;
}

/// Renders a full HTML document for `page`.
pub fn render_page<E: EntityView>(page: &Page<E>, csrf_token: &CsrfToken) -> String {
    let content = match page {
        Page::List { records, flash } => list(records, flash.as_deref(), csrf_token),
        Page::Form {
            record,
            errors,
            values,
        } => form(record.as_ref(), errors, values, csrf_token),
        Page::Detail { record } => detail(record),
    };

    layout(E::KIND, &content)
}

pub(super) fn escape(text: &str) -> String {
    clean_text(text)
}

pub(super) fn timestamp(at: OffsetDateTime) -> String {
    at.format(format_description!("[day].[month].[year] [hour]:[minute]"))
        .unwrap_or_default()
}

pub(super) fn status_badge(status: &str) -> String {
    let status = escape(status);
    format!(r#"<span class="badge badge-{status}">{status}</span>"#)
}

/// `<option>` list over all variants of a status enum.
pub(super) fn status_options<S: IntoEnumIterator + AsRef<str>>(selected: &str) -> String {
    S::iter()
        .map(|status| {
            let value = status.as_ref();
            let marker = if value == selected { " selected" } else { "" };
            let value = escape(value);
            format!(r#"<option value="{value}"{marker}>{value}</option>"#)
        })
        .collect::<Vec<_>>()
        .join("\n        ")
}

fn page_header(title: &str, intro: &str, link: &str) -> String {
    format!(
        r#"<section class="header">
  <div>
    <h1>{title}</h1>
    <p>{intro}</p>
  </div>
  {link}
</section>"#
    )
}

fn csrf_field(csrf_token: &CsrfToken) -> String {
    format!(
        r#"<input type="hidden" name="csrf_token" value="{}">"#,
        escape(csrf_token.as_str())
    )
}

fn list<E: EntityView>(records: &[E], flash: Option<&str>, csrf_token: &CsrfToken) -> String {
    let slug = E::KIND.slug();
    let mut html = page_header(
        E::LABELS.list_title,
        E::LABELS.list_intro,
        &format!(
            r#"<a class="btn" href="/?entity={slug}&action=create">{}</a>"#,
            E::LABELS.new_record
        ),
    );

    if let Some(flash) = flash.filter(|flash| !flash.is_empty()) {
        html.push_str(&format!(r#"<div class="flash">{}</div>"#, escape(flash)));
    }

    if records.is_empty() {
        html.push_str(&format!(r#"<div class="empty">{}</div>"#, E::LABELS.empty));
        return html;
    }

    let rows = records
        .iter()
        .map(|record| {
            let id = record.id();
            format!(
                r#"<tr>
  {cells}
  <td>{updated}</td>
  <td class="actions">
    <a class="btn btn-secondary" href="/?entity={slug}&action=show&id={id}">Anzeigen</a>
    <a class="btn btn-secondary" href="/?entity={slug}&action=edit&id={id}">Bearbeiten</a>
    <form method="post" action="/?entity={slug}&action=delete&id={id}" class="inline">
      <input type="hidden" name="_method" value="DELETE">
      {csrf}
      <button class="btn btn-danger" type="submit">Löschen</button>
    </form>
  </td>
</tr>"#,
                cells = record.table_cells(),
                updated = timestamp(record.updated_at()),
                csrf = csrf_field(csrf_token),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    html.push_str(&format!(
        r#"<table class="table">
<thead>
<tr>{head}<th>Aktualisiert</th><th></th></tr>
</thead>
<tbody>
{rows}
</tbody>
</table>"#,
        head = E::table_head(),
    ));
    html
}

fn form<E: EntityView>(
    record: Option<&E>,
    errors: &[String],
    values: &FormValues,
    csrf_token: &CsrfToken,
) -> String {
    let slug = E::KIND.slug();
    let (title, intro, action) = match record {
        Some(record) => (
            E::LABELS.edit_title,
            "Änderungen speichern",
            format!("update&id={}", record.id()),
        ),
        None => (
            E::LABELS.new_record,
            E::LABELS.create_intro,
            "store".to_string(),
        ),
    };

    let mut html = page_header(
        title,
        intro,
        &format!(r#"<a class="btn btn-secondary" href="/?entity={slug}">Zurück</a>"#),
    );

    if !errors.is_empty() {
        let items = errors
            .iter()
            .map(|error| format!("<li>{}</li>", escape(error)))
            .collect::<String>();
        html.push_str(&format!(
            r#"<div class="errors"><strong>Bitte korrigieren:</strong><ul>{items}</ul></div>"#
        ));
    }

    html.push_str(&format!(
        r#"<form method="post" action="/?entity={slug}&action={action}" class="card">
  {csrf}
  {fields}
  <div class="actions">
    <button class="btn" type="submit">Speichern</button>
  </div>
</form>"#,
        csrf = csrf_field(csrf_token),
        fields = E::form_fields(values),
    ));
    html
}

fn detail<E: EntityView>(record: &E) -> String {
    let slug = E::KIND.slug();
    let mut html = page_header(
        E::LABELS.show_title,
        "Detailansicht ohne Bearbeitungsmodus.",
        &format!(r#"<a class="btn btn-secondary" href="/?entity={slug}">Zurück</a>"#),
    );

    html.push_str(&format!(
        r#"<section class="card">
  {fields}
  <div><strong>Erstellt</strong><div>{created}</div></div>
  <div><strong>Aktualisiert</strong><div>{updated}</div></div>
  <div class="actions">
    <a class="btn" href="/?entity={slug}&action=edit&id={id}">Bearbeiten</a>
  </div>
</section>"#,
        fields = record.detail_fields(),
        created = timestamp(record.created_at()),
        updated = timestamp(record.updated_at()),
        id = record.id(),
    ));
    html
}
