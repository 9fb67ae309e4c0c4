use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use crate::domain::RecordError;

const INVALID_CSRF_TOKEN: &str = "Ungültiges CSRF-Token.";
const INVALID_ORIGIN: &str = "Ungültige Request-Origin.";
const STORAGE_UNAVAILABLE: &str = "DB-Verbindung fehlgeschlagen.";
const SESSION_UNAVAILABLE: &str = "Sitzung konnte nicht geladen werden.";

/// Non-standard status used for expired or forged form tokens.
fn page_expired() -> StatusCode {
    StatusCode::from_u16(419).unwrap_or(StatusCode::FORBIDDEN)
}

/// Error answered with a fixed status and a plain-text body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn invalid_csrf_token() -> Self {
        Self::new(page_expired(), INVALID_CSRF_TOKEN)
    }

    pub fn invalid_origin() -> Self {
        Self::forbidden(INVALID_ORIGIN)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::InvalidCsrfToken => Self::invalid_csrf_token(),
            RecordError::Storage(message) => {
                tracing::error!("Record storage failed: {}", message);
                Self::internal(STORAGE_UNAVAILABLE)
            }
        }
    }
}

impl From<tower_sessions::session::Error> for ApiError {
    fn from(err: tower_sessions::session::Error) -> Self {
        tracing::error!("Session error: {:?}", err);
        Self::internal(SESSION_UNAVAILABLE)
    }
}
