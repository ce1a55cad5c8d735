use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use common::types::envelope::{AckEnvelope, LoginEnvelope, MeEnvelope};
use service::auth::domain::LoginInput;

use crate::{errors::ApiError, middleware::{admin_identity, AUTH_COOKIE}, state::ServerState};

#[utoipa::path(post, path = "/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In"), (status = 401, description = "Unauthorized")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    input: Result<Json<LoginInput>, JsonRejection>,
) -> Result<(CookieJar, Json<LoginEnvelope>), ApiError> {
    let Json(input) = input?;
    let session = match state.auth.authenticate(input).await {
        Ok(s) => {
            state.metrics.logins.with_label_values(&["success"]).inc();
            s
        }
        Err(e) => {
            state.metrics.logins.with_label_values(&["failure"]).inc();
            return Err(e.into());
        }
    };

    let mut cookie = Cookie::new(AUTH_COOKIE, session.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    let out = LoginEnvelope {
        success: true,
        username: session.identity.username,
        token: session.token,
        expires_at: session.expires_at,
    };
    Ok((jar.add(cookie), Json(out)))
}

#[utoipa::path(post, path = "/auth/logout", tag = "auth", responses((status = 200, description = "Cookie cleared")))]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<AckEnvelope>) {
    let mut cookie = Cookie::from(AUTH_COOKIE);
    cookie.set_path("/");
    (jar.remove(cookie), Json(AckEnvelope::ok()))
}

#[utoipa::path(get, path = "/auth/me", tag = "auth", responses((status = 200, description = "Current admin"), (status = 401, description = "Unauthorized")))]
pub async fn me(State(state): State<ServerState>, headers: HeaderMap) -> Result<(StatusCode, Json<MeEnvelope>), ApiError> {
    let identity = admin_identity(&state, &headers)?;
    Ok((StatusCode::OK, Json(MeEnvelope { success: true, username: identity.username })))
}
