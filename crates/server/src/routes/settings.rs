use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;

use common::types::envelope::SettingsEnvelope;

use crate::{errors::ApiError, state::ServerState};

#[utoipa::path(
    get, path = "/api/restaurant/settings", tag = "settings",
    responses(
        (status = 200, description = "The settings record, created empty on first read"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn get(State(state): State<ServerState>) -> Result<Json<SettingsEnvelope>, ApiError> {
    let settings = state.settings.get_or_create().await?;
    Ok(Json(SettingsEnvelope { success: true, settings: Some(settings) }))
}

#[utoipa::path(
    post, path = "/api/restaurant/settings", tag = "settings",
    request_body = crate::openapi::SettingsDoc,
    responses(
        (status = 200, description = "Created or updated"),
        (status = 400, description = "Body is not a JSON object"),
        (status = 401, description = "No admin session")
    )
)]
pub async fn upsert(
    State(state): State<ServerState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SettingsEnvelope>, ApiError> {
    let Json(body) = body?;
    let settings = state.settings.upsert(body).await?;
    Ok(Json(SettingsEnvelope { success: true, settings: Some(settings) }))
}
