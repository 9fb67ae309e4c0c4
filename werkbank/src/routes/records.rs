use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use strum::{Display, EnumString};
use tower_sessions::Session;
use tracing::instrument;

use crate::{
    adapters::inbound::http::{render_page, EntityView},
    app_state::AppState,
    domain::{
        context::RequestContext,
        entity::EntityKind,
        models::{Outcome, RecordId},
        ports::inbound::RecordService,
        validation::FormInput,
    },
    routes::ApiError,
    security::{load_context, store_flash_change},
};

/// Front controller query: `/?entity=<slug>&action=<action>&id=<id>`.
#[derive(Debug, Default, Deserialize)]
pub struct RecordQuery {
    entity: Option<String>,
    action: Option<String>,
    id: Option<String>,
}

impl RecordQuery {
    fn kind(&self) -> EntityKind {
        EntityKind::from_param(self.entity.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum Action {
    Index,
    Create,
    Edit,
    Show,
    Store,
    Update,
    Delete,
}

impl Action {
    /// Page requested by a GET; anything unknown shows the list.
    fn for_read(raw: Option<&str>) -> Self {
        match raw.and_then(|raw| raw.parse().ok()) {
            Some(action @ (Self::Create | Self::Edit | Self::Show)) => action,
            _ => Self::Index,
        }
    }

    /// Mutation requested by a POST; a `_method=DELETE` override wins.
    fn for_write(raw: Option<&str>, input: &FormInput) -> Self {
        let method_override = input.trimmed("_method");
        if method_override.eq_ignore_ascii_case("DELETE") {
            return Self::Delete;
        }

        match raw.and_then(|raw| raw.parse().ok()) {
            Some(Self::Update) => Self::Update,
            _ => Self::Store,
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(show_page).post(submit))
}

#[instrument(name = "GET /", skip(app_state, session))]
async fn show_page(
    State(app_state): State<AppState>,
    session: Session,
    Query(query): Query<RecordQuery>,
) -> Result<Response, ApiError> {
    match query.kind() {
        EntityKind::Tasks => read(app_state.tasks.as_ref(), &session, &query).await,
        EntityKind::Projects => read(app_state.projects.as_ref(), &session, &query).await,
    }
}

#[instrument(name = "POST /", skip(app_state, session, form))]
async fn submit(
    State(app_state): State<AppState>,
    session: Session,
    Query(query): Query<RecordQuery>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let input = FormInput::new(form);

    match query.kind() {
        EntityKind::Tasks => write(app_state.tasks.as_ref(), &session, &query, &input).await,
        EntityKind::Projects => write(app_state.projects.as_ref(), &session, &query, &input).await,
    }
}

async fn read<E: EntityView>(
    service: &dyn RecordService<E>,
    session: &Session,
    query: &RecordQuery,
) -> Result<Response, ApiError> {
    let mut ctx = load_context(session, E::KIND).await?;
    let id = query.id.as_deref().and_then(RecordId::parse);

    let outcome = match Action::for_read(query.action.as_deref()) {
        Action::Create => service.create_form(),
        Action::Edit => service.edit_form(&mut ctx, id).await?,
        Action::Show => service.show(&mut ctx, id).await?,
        _ => service.index(&mut ctx).await?,
    };

    respond(session, ctx, outcome).await
}

async fn write<E: EntityView>(
    service: &dyn RecordService<E>,
    session: &Session,
    query: &RecordQuery,
    input: &FormInput,
) -> Result<Response, ApiError> {
    let mut ctx = load_context(session, E::KIND).await?;
    let submitted_token = input.raw("csrf_token").unwrap_or_default();
    let id = query
        .id
        .as_deref()
        .or_else(|| input.raw("id"))
        .and_then(RecordId::parse);

    let action = Action::for_write(query.action.as_deref(), input);
    tracing::debug!(entity = %E::KIND, %action, "Dispatching write");

    let outcome = match action {
        Action::Delete => service.delete(&mut ctx, submitted_token, id).await?,
        Action::Update => service.update(&mut ctx, submitted_token, id, input).await?,
        _ => service.store(&mut ctx, submitted_token, input).await?,
    };

    respond(session, ctx, outcome).await
}

async fn respond<E: EntityView>(
    session: &Session,
    ctx: RequestContext,
    outcome: Outcome<E>,
) -> Result<Response, ApiError> {
    let csrf_token = ctx.csrf_token().clone();
    store_flash_change(session, E::KIND, ctx.into_flash_change()).await?;

    Ok(match outcome {
        Outcome::Render(page) => Html(render_page(&page, &csrf_token)).into_response(),
        Outcome::RedirectToList => Redirect::to(&E::KIND.list_path()).into_response(),
    })
}
