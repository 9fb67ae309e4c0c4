//! Form input handling shared by the entity validators.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

pub const INVALID_STATUS: &str = "Ungültiger Status.";

/// Raw, untrusted form fields as submitted by the browser.
#[derive(Debug, Clone, Default)]
pub struct FormInput(HashMap<String, String>);

impl FormInput {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self(fields)
    }

    /// Raw value of a field, or `None` if the field was not submitted.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Trimmed value of a field. Missing fields read as the empty string.
    pub fn trimmed(&self, key: &str) -> &str {
        self.raw(key).map(str::trim).unwrap_or_default()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Normalized field values used to fill a form.
///
/// Keys are entity-specific field names; absent optional values are stored
/// as empty strings so a form can render them directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<&'static str, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.0.insert(key, value.into());
        self
    }

    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or_default()
    }
}

/// Outcome of validating one form submission.
///
/// `fields` is only present when no error was recorded, so `ok()` holds
/// exactly when `errors` is empty.
#[derive(Debug, Clone)]
pub struct ValidationResult<T> {
    pub errors: Vec<String>,
    pub data: FormValues,
    fields: Option<T>,
}

/// A rejected submission, carrying what is needed to re-render the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidInput {
    pub errors: Vec<String>,
    pub values: FormValues,
}

impl<T> ValidationResult<T> {
    pub fn new(errors: Vec<String>, data: FormValues, fields: Option<T>) -> Self {
        let fields = if errors.is_empty() { fields } else { None };
        Self {
            errors,
            data,
            fields,
        }
    }

    #[cfg(test)]
    pub fn ok(&self) -> bool {
        self.errors.is_empty() && self.fields.is_some()
    }

    #[cfg(test)]
    pub fn fields(&self) -> Option<&T> {
        self.fields.as_ref()
    }

    pub fn into_fields(self) -> Result<T, InvalidInput> {
        match self.fields {
            Some(fields) if self.errors.is_empty() => Ok(fields),
            _ => Err(InvalidInput {
                errors: self.errors,
                values: self.data,
            }),
        }
    }
}

/// Checks a required text field: non-empty and at most `max` characters.
pub fn require_text(
    value: &str,
    max: usize,
    missing: &str,
    too_long: &str,
    errors: &mut Vec<String>,
) {
    if value.is_empty() {
        errors.push(missing.to_string());
    } else if value.chars().count() > max {
        errors.push(too_long.to_string());
    }
}

/// Checks an optional text field and maps the empty string to `None`.
pub fn optional_text(
    value: &str,
    max: usize,
    too_long: &str,
    errors: &mut Vec<String>,
) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    if value.chars().count() > max {
        errors.push(too_long.to_string());
    }
    Some(value.to_string())
}

/// Resolves the `status` field against a status enum.
///
/// A status that was not submitted at all falls back to the enum default; a
/// submitted value must name one of the variants.
pub fn parse_status<S>(input: &FormInput, errors: &mut Vec<String>) -> (String, Option<S>)
where
    S: FromStr + Default + AsRef<str>,
{
    let Some(raw) = input.raw("status") else {
        let status = S::default();
        return (status.as_ref().to_string(), Some(status));
    };

    let raw = raw.trim();
    match raw.parse::<S>() {
        Ok(status) => (raw.to_string(), Some(status)),
        Err(_) => {
            errors.push(INVALID_STATUS.to_string());
            (raw.to_string(), None)
        }
    }
}
