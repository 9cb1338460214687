//! `/api/order`, `/api/orders`, `/api/user/*`: placing, progressing and reading orders.

use super::extract::{OrderDelete, OrderStaff, PaymentRecord, PaymentView};
use super::{ApiError, ApiJson, ApiPath, AppState, Authenticated, Authorized, BearerToken};
use crate::clients::OrderDraft;
use crate::model::{Order, OrderId, OrderLine, OrderStatus, OrderSummary, Payment, PaymentStatus};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub items: Vec<OrderLine>,
    pub subtotal: Option<Decimal>,
    pub tax: Option<Decimal>,
    pub total: Option<Decimal>,
    /// Customer routes may carry the token in the body instead of the header.
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TokenBody {
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentStatusRequest {
    #[serde(alias = "payment_status")]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    pub amount: Decimal,
    #[serde(alias = "payment_method")]
    pub method: Option<String>,
}

fn parse<T>(raw: Option<String>) -> Result<T, ApiError>
where
    T: std::str::FromStr<Err = String>,
{
    raw.unwrap_or_default()
        .parse()
        .map_err(ApiError::InvalidArgument)
}

pub async fn create(
    State(state): State<AppState>,
    header: BearerToken,
    ApiJson(body): ApiJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let token = header.or(body.token);
    let principal = state.gate.authenticate(token.as_deref())?;

    if body.items.is_empty() {
        return Err(ApiError::InvalidArgument(
            "Order must contain at least one item".into(),
        ));
    }
    let (Some(subtotal), Some(tax), Some(total)) = (body.subtotal, body.tax, body.total) else {
        return Err(ApiError::InvalidArgument("Missing required fields".into()));
    };

    let order = state
        .orders
        .create_order(
            &principal,
            OrderDraft {
                items: body.items,
                subtotal,
                tax,
                total,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Order history with the token in the body.
pub async fn history_from_body(
    State(state): State<AppState>,
    header: BearerToken,
    ApiJson(body): ApiJson<TokenBody>,
) -> Result<Json<Vec<OrderSummary>>, ApiError> {
    let token = header.or(body.token);
    let principal = state.gate.authenticate(token.as_deref())?;
    Ok(Json(state.orders.list_for_user(&principal).await?))
}

pub async fn history(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
) -> Result<Json<Vec<OrderSummary>>, ApiError> {
    Ok(Json(state.orders.list_for_user(&principal).await?))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.orders.list_all().await?))
}

pub async fn get_one(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<OrderId>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.orders.get_order(id).await?))
}

pub async fn update_status(
    State(state): State<AppState>,
    Authorized(principal, _): Authorized<OrderStaff>,
    ApiPath(id): ApiPath<OrderId>,
    ApiJson(body): ApiJson<StatusRequest>,
) -> Result<Json<Order>, ApiError> {
    let status: OrderStatus = parse(body.status)?;
    Ok(Json(state.orders.update_status(&principal, id, status).await?))
}

pub async fn update_payment_status(
    State(state): State<AppState>,
    Authorized(principal, _): Authorized<OrderStaff>,
    ApiPath(id): ApiPath<OrderId>,
    ApiJson(body): ApiJson<PaymentStatusRequest>,
) -> Result<Json<Order>, ApiError> {
    let payment_status: PaymentStatus = parse(body.status)?;
    let order = state
        .orders
        .update_payment_status(&principal, id, payment_status)
        .await?;
    Ok(Json(order))
}

pub async fn delete(
    State(state): State<AppState>,
    Authorized(principal, _): Authorized<OrderDelete>,
    ApiPath(id): ApiPath<OrderId>,
) -> Result<Json<Value>, ApiError> {
    state.orders.delete_order(&principal, id).await?;
    Ok(Json(json!({ "message": "Order deleted successfully" })))
}

pub async fn record_payment(
    State(state): State<AppState>,
    Authorized(principal, _): Authorized<PaymentRecord>,
    ApiPath(id): ApiPath<OrderId>,
    ApiJson(body): ApiJson<RecordPaymentRequest>,
) -> Result<(StatusCode, Json<Payment>), ApiError> {
    let payment = state
        .orders
        .record_payment(&principal, id, body.amount, body.method)
        .await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

pub async fn list_payments(
    State(state): State<AppState>,
    Authorized(principal, _): Authorized<PaymentView>,
    ApiPath(id): ApiPath<OrderId>,
) -> Result<Json<Vec<Payment>>, ApiError> {
    Ok(Json(state.orders.payments_for(&principal, id).await?))
}
