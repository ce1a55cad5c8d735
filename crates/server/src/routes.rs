use axum::{
    extract::{DefaultBodyLimit, State},
    http::header,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::{middleware as mw, openapi::ApiDoc, state::ServerState};

pub mod auth;
pub mod menu;
pub mod settings;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics(State(state): State<ServerState>) -> impl IntoResponse {
    let (status, body) = state.metrics.encode();
    (status, [(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}

/// Build the full application router: public reads, session-guarded writes, docs.
///
/// Request bodies are unbounded since images travel inline as data URLs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route(
            "/api/restaurant",
            get(menu::list).post(menu::create).put(menu::update).delete(menu::delete),
        )
        .route("/api/restaurant/settings", get(settings::get).post(settings::upsert))
        .route_layer(middleware::from_fn_with_state(state.clone(), mw::require_admin_session));

    let auth_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me));

    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics));

    public
        .merge(api)
        .merge(auth_routes)
        .route_layer(middleware::from_fn_with_state(state.clone(), mw::track_requests))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
