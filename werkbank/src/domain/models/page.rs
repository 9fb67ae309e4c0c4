use crate::domain::validation::FormValues;

/// A page the read or mutation pipeline asks the HTTP layer to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page<E> {
    List {
        records: Vec<E>,
        flash: Option<String>,
    },
    /// Create form when `record` is `None`, edit form otherwise.
    Form {
        record: Option<E>,
        errors: Vec<String>,
        values: FormValues,
    },
    Detail {
        record: E,
    },
}

/// Terminal state of a pipeline call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<E> {
    Render(Page<E>),
    /// Post/Redirect/Get back to the entity list.
    RedirectToList,
}

impl<E> Outcome<E> {
    pub fn form(record: Option<E>, errors: Vec<String>, values: FormValues) -> Self {
        Self::Render(Page::Form {
            record,
            errors,
            values,
        })
    }
}
