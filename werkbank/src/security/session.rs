use axum::{extract::Request, middleware::Next, response::Response};
use tower_sessions::{session, Session};

use crate::{
    domain::{
        context::{FlashChange, RequestContext},
        csrf::CsrfToken,
        entity::EntityKind,
    },
    routes::ApiError,
};

const CSRF_TOKEN_KEY: &str = "csrf_token";
const INITIATED_KEY: &str = "initiated";

/// Prepares the session before any handler runs.
///
/// A fresh session gets a new id once (against fixation) and a CSRF token;
/// both survive for the lifetime of the session.
pub async fn bootstrap_session(
    session: Session,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if session.get::<bool>(INITIATED_KEY).await?.is_none() {
        session.cycle_id().await?;
        session.insert(INITIATED_KEY, true).await?;
        tracing::debug!("Initiated new session");
    }

    if session.get::<CsrfToken>(CSRF_TOKEN_KEY).await?.is_none() {
        session.insert(CSRF_TOKEN_KEY, CsrfToken::generate()).await?;
    }

    Ok(next.run(request).await)
}

/// Reads the CSRF token and the pending flash of `kind` from the session.
pub async fn load_context(
    session: &Session,
    kind: EntityKind,
) -> Result<RequestContext, session::Error> {
    // An empty token never verifies.
    let csrf_token = session
        .get::<CsrfToken>(CSRF_TOKEN_KEY)
        .await?
        .unwrap_or_else(|| CsrfToken::new(""));
    let flash = session.get::<String>(kind.flash_key()).await?;

    Ok(RequestContext::new(csrf_token, flash))
}

/// Writes the flash outcome of a pipeline call back to the session.
pub async fn store_flash_change(
    session: &Session,
    kind: EntityKind,
    change: FlashChange,
) -> Result<(), session::Error> {
    match change {
        FlashChange::Unchanged => {}
        FlashChange::Set(message) => session.insert(kind.flash_key(), message).await?,
        FlashChange::Cleared => {
            session.remove::<String>(kind.flash_key()).await?;
        }
    }

    Ok(())
}
