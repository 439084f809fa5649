use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_note::create_note;
use super::handlers::delete_note::delete_note;
use super::handlers::get_current_user::get_current_user;
use super::handlers::get_note::get_note;
use super::handlers::list_notes::list_notes;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::update_note::update_note;
use super::middleware::authenticate as auth_middleware;
use crate::domain::note::service::NoteService;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::SqliteNoteRepository;
use crate::outbound::repositories::SqliteUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<SqliteUserRepository>>,
    pub note_service: Arc<NoteService<SqliteNoteRepository>>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    user_service: Arc<UserService<SqliteUserRepository>>,
    note_service: Arc<NoteService<SqliteNoteRepository>>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        user_service,
        note_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login));

    let protected_routes = Router::new()
        .route("/api/users/me", get(get_current_user))
        .route("/api/notes", post(create_note).get(list_notes))
        .route(
            "/api/notes/:note_id",
            get(get_note).patch(update_note).delete(delete_note),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
