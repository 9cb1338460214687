//! `/api/stock`: the stock ledger.

use super::extract::{StockAdjust, StockManage};
use super::{ApiError, ApiJson, ApiPath, AppState, Authorized};
use crate::model::{StockEntry, StockFields, StockId};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct CreateStockRequest {
    pub item_name: Option<String>,
    pub quantity: Option<i64>,
}

/// Body of the increment/decrement routes.
#[derive(Debug, Deserialize)]
pub struct AdjustRequest {
    pub quantity: Option<i64>,
}

impl AdjustRequest {
    /// A missing delta is treated like zero: rejected downstream as non-positive.
    fn delta(&self) -> i64 {
        self.quantity.unwrap_or(0)
    }
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<StockEntry>>, ApiError> {
    Ok(Json(state.stock.list_entries().await?))
}

pub async fn get_one(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<StockId>,
) -> Result<Json<StockEntry>, ApiError> {
    Ok(Json(state.stock.get_entry(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Authorized(principal, _): Authorized<StockManage>,
    ApiJson(body): ApiJson<CreateStockRequest>,
) -> Result<(StatusCode, Json<StockEntry>), ApiError> {
    let (Some(item_name), Some(quantity)) = (
        body.item_name.filter(|n| !n.trim().is_empty()),
        body.quantity,
    ) else {
        return Err(ApiError::InvalidArgument("Missing required fields".into()));
    };
    let entry = state
        .stock
        .create_entry(&principal, item_name, quantity)
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn set(
    State(state): State<AppState>,
    Authorized(principal, _): Authorized<StockAdjust>,
    ApiPath(id): ApiPath<StockId>,
    ApiJson(fields): ApiJson<StockFields>,
) -> Result<Json<StockEntry>, ApiError> {
    Ok(Json(state.stock.set_entry(&principal, id, fields).await?))
}

pub async fn increment(
    State(state): State<AppState>,
    Authorized(principal, _): Authorized<StockAdjust>,
    ApiPath(id): ApiPath<StockId>,
    ApiJson(body): ApiJson<AdjustRequest>,
) -> Result<Json<StockEntry>, ApiError> {
    Ok(Json(state.stock.increment(&principal, id, body.delta()).await?))
}

pub async fn decrement(
    State(state): State<AppState>,
    Authorized(principal, _): Authorized<StockAdjust>,
    ApiPath(id): ApiPath<StockId>,
    ApiJson(body): ApiJson<AdjustRequest>,
) -> Result<Json<StockEntry>, ApiError> {
    Ok(Json(state.stock.decrement(&principal, id, body.delta()).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Authorized(principal, _): Authorized<StockManage>,
    ApiPath(id): ApiPath<StockId>,
) -> Result<Json<Value>, ApiError> {
    state.stock.delete_entry(&principal, id).await?;
    Ok(Json(json!({ "message": "Stock item deleted successfully" })))
}
