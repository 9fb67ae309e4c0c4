use std::net::SocketAddr;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app_state;
mod config;
mod domain;
mod router;
mod routes;
mod security;

use app_state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "werkbank=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = config::read_config().expect("Failed to read configuration");
    tracing::debug!(database = ?settings.database, "Loaded configuration");

    // The pool connects on demand; the migrations below need a reachable
    // database and abort startup otherwise.
    let connection_pool =
        PgPoolOptions::new().connect_lazy_with(settings.database.with_db());

    sqlx::migrate!()
        .run(&connection_pool)
        .await
        .expect("Failed to run database migrations");

    let session_store = router::postgres_session_store(connection_pool.clone()).await;
    let session_layer =
        router::session_layer(session_store, settings.application.secure_cookies);

    let app = router::create(AppState::with_postgres(connection_pool), session_layer);

    let addr: SocketAddr = format!(
        "{}:{}",
        settings.application.host, settings.application.port
    )
    .parse()
    .expect("Failed to parse listen address");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");

    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}
