use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use common::types::envelope::{AckEnvelope, MenuItemEnvelope, MenuListEnvelope};

use crate::{errors::ApiError, state::ServerState};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct DeleteQuery {
    /// Identity of the item to delete.
    pub id: Option<String>,
}

#[utoipa::path(
    get, path = "/api/restaurant", tag = "menu",
    responses(
        (status = 200, description = "All menu items, newest first"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<MenuListEnvelope>, ApiError> {
    let menu = state.menu.list().await?;
    info!(count = menu.len(), "list menu");
    Ok(Json(MenuListEnvelope { success: true, menu }))
}

#[utoipa::path(
    post, path = "/api/restaurant", tag = "menu",
    request_body = crate::openapi::MenuItemDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Body is not a JSON object"),
        (status = 401, description = "No admin session")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MenuItemEnvelope>, ApiError> {
    let Json(body) = body?;
    let item = state.menu.create(body).await?;
    state.metrics.menu_mutations.with_label_values(&["create"]).inc();
    Ok(Json(MenuItemEnvelope { success: true, menu_item: Some(item) }))
}

#[utoipa::path(
    put, path = "/api/restaurant", tag = "menu",
    request_body = crate::openapi::MenuItemUpdateDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "No ID provided"),
        (status = 401, description = "No admin session"),
        (status = 404, description = "Menu item not found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MenuItemEnvelope>, ApiError> {
    let Json(body) = body?;
    let item = state.menu.update(body).await?;
    state.metrics.menu_mutations.with_label_values(&["update"]).inc();
    Ok(Json(MenuItemEnvelope { success: true, menu_item: Some(item) }))
}

#[utoipa::path(
    delete, path = "/api/restaurant", tag = "menu",
    params(DeleteQuery),
    responses(
        (status = 200, description = "Deleted, or nothing to delete"),
        (status = 400, description = "No ID provided, or malformed query"),
        (status = 401, description = "No admin session")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    query: Result<Query<DeleteQuery>, QueryRejection>,
) -> Result<Json<AckEnvelope>, ApiError> {
    let Query(q) = query?;
    state.menu.delete(q.id.as_deref()).await?;
    state.metrics.menu_mutations.with_label_values(&["delete"]).inc();
    Ok(Json(AckEnvelope::ok()))
}
