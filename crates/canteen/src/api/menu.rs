//! `/api/menu`: public reads, admin writes, availability toggles.

use super::extract::{MenuAvailability, MenuWrite};
use super::{ApiError, ApiJson, ApiPath, AppState, Authorized};
use crate::model::{MenuItem, MenuItemFields, MenuItemId};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct AvailabilityRequest {
    pub available: bool,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<MenuItem>>, ApiError> {
    Ok(Json(state.menu.list_items().await?))
}

pub async fn get_one(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<MenuItemId>,
) -> Result<Json<MenuItem>, ApiError> {
    Ok(Json(state.menu.get_item(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Authorized(principal, _): Authorized<MenuWrite>,
    ApiJson(fields): ApiJson<MenuItemFields>,
) -> Result<(StatusCode, Json<MenuItem>), ApiError> {
    let item = state.menu.create_item(&principal, fields).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update(
    State(state): State<AppState>,
    Authorized(principal, _): Authorized<MenuWrite>,
    ApiPath(id): ApiPath<MenuItemId>,
    ApiJson(fields): ApiJson<MenuItemFields>,
) -> Result<Json<MenuItem>, ApiError> {
    Ok(Json(state.menu.update_item(&principal, id, fields).await?))
}

pub async fn set_available(
    State(state): State<AppState>,
    Authorized(principal, _): Authorized<MenuAvailability>,
    ApiPath(id): ApiPath<MenuItemId>,
    ApiJson(body): ApiJson<AvailabilityRequest>,
) -> Result<Json<MenuItem>, ApiError> {
    let item = state
        .menu
        .set_availability(&principal, id, body.available)
        .await?;
    Ok(Json(item))
}

pub async fn delete(
    State(state): State<AppState>,
    Authorized(principal, _): Authorized<MenuWrite>,
    ApiPath(id): ApiPath<MenuItemId>,
) -> Result<Json<Value>, ApiError> {
    state.menu.delete_item(&principal, id).await?;
    Ok(Json(json!({ "message": "Menu item deleted successfully" })))
}
