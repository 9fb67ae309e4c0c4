use std::time::Duration;

use axum::{middleware, Router};
use axum_extra::extract::cookie::SameSite;
use sqlx::PgPool;
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tower_sessions::{
    CachingSessionStore, ExpiredDeletion, Expiry, SessionManagerLayer, SessionStore,
};
use tower_sessions_moka_store::MokaStore;
use tower_sessions_sqlx_store::PostgresStore;

use crate::{app_state::AppState, routes, security};

pub type PgSessionStore = CachingSessionStore<MokaStore, PostgresStore>;

/// Builds the complete application: routes, security gate, sessions and
/// request tracing.
pub fn create<Store>(app_state: AppState, session_layer: SessionManagerLayer<Store>) -> Router<()>
where
    Store: SessionStore + Clone,
{
    let app = routes::records::router()
        .layer(middleware::from_fn(security::bootstrap_session))
        .layer(middleware::from_fn(security::require_same_origin))
        .layer(session_layer)
        .with_state(app_state);

    security::with_security_headers(app)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

/// Session cookie settings: http-only, SameSite=Lax, gone with the browser session.
pub fn session_layer<Store: SessionStore>(
    store: Store,
    secure_cookies: bool,
) -> SessionManagerLayer<Store> {
    SessionManagerLayer::new(store)
        .with_secure(secure_cookies)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnSessionEnd)
}

/// PostgreSQL-backed session store with an in-process cache for hot sessions.
pub async fn postgres_session_store(connection_pool: PgPool) -> PgSessionStore {
    let db_store = PostgresStore::new(connection_pool);
    db_store
        .migrate()
        .await
        .expect("Failed to run session store migration");

    tokio::task::spawn(delete_expired_sessions(db_store.clone(), PURGE_INTERVAL));

    let cache_store = MokaStore::new(Some(2_000));
    CachingSessionStore::new(cache_store, db_store)
}

const PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// Purges expired sessions for the life of the process. A failed purge is
/// logged and the loop starts over after one interval.
async fn delete_expired_sessions<Store>(store: Store, interval: Duration)
where
    Store: ExpiredDeletion + Clone,
{
    loop {
        if let Err(err) = store.clone().continuously_delete_expired(interval).await {
            tracing::error!("Failed to delete expired sessions: {}", err);
        }
        tokio::time::sleep(interval).await;
    }
}
