//! `/api/admin/*`: staff listings.

use super::extract::{MenuStaff, OrderStaff, StockStaff, UserAdmin};
use super::{ApiError, AppState, Authorized};
use crate::model::{MenuItem, Order, StockEntry, User};
use axum::extract::State;
use axum::Json;

pub async fn users(
    State(state): State<AppState>,
    Authorized(principal, _): Authorized<UserAdmin>,
) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.users.list_users(&principal).await?))
}

pub async fn menu_items(
    State(state): State<AppState>,
    Authorized(principal, _): Authorized<MenuStaff>,
) -> Result<Json<Vec<MenuItem>>, ApiError> {
    Ok(Json(state.menu.list_for_staff(&principal).await?))
}

pub async fn orders(
    State(state): State<AppState>,
    Authorized(principal, _): Authorized<OrderStaff>,
) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.orders.list_for_staff(&principal).await?))
}

pub async fn stocks(
    State(state): State<AppState>,
    Authorized(principal, _): Authorized<StockStaff>,
) -> Result<Json<Vec<StockEntry>>, ApiError> {
    Ok(Json(state.stock.list_for_staff(&principal).await?))
}
