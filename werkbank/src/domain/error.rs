use thiserror::Error;

/// Errors that can occur while serving a record request.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("csrf token mismatch")]
    InvalidCsrfToken,
    #[error("storage failure: {0}")]
    Storage(String),
}

impl RecordError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
