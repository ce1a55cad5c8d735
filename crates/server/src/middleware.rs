use axum::{
    extract::{MatchedPath, Request, State},
    http::{header, HeaderMap, Method},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use service::auth::domain::AdminIdentity;

use crate::{errors::ApiError, state::ServerState};

pub const AUTH_COOKIE: &str = "auth_token";

/// Session token from `Authorization: Bearer`, falling back to the `auth_token` cookie.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        return value.strip_prefix("Bearer ").map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
    }
    CookieJar::from_headers(headers)
        .get(AUTH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
}

/// Resolve the admin behind the request, or 401.
pub fn admin_identity(state: &ServerState, headers: &HeaderMap) -> Result<AdminIdentity, ApiError> {
    let token = session_token(headers).ok_or_else(ApiError::unauthorized)?;
    Ok(state.auth.verify_token(&token)?)
}

/// Reads pass through; writes need a valid admin session.
pub async fn require_admin_session(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if matches!(*req.method(), Method::GET | Method::HEAD | Method::OPTIONS) {
        return Ok(next.run(req).await);
    }
    let identity = admin_identity(&state, req.headers()).map_err(|e| {
        tracing::warn!(path = %req.uri().path(), method = %req.method(), "mutation without valid session");
        e
    })?;
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

/// Count every response by method, matched route and status.
pub async fn track_requests(State(state): State<ServerState>, req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let res = next.run(req).await;
    state
        .metrics
        .http_requests
        .with_label_values(&[&method, &route, res.status().as_str()])
        .inc();
    res
}
