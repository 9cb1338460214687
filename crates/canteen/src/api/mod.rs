//! # HTTP Surface
//!
//! JSON over HTTP, everything under `/api`. Handlers authenticate the caller (bearer header,
//! or a `token` body field on the customer routes). Staff routes check the caller's role in
//! the [`Authorized`] extractor before reading the path or body; the typed clients apply the
//! same role policy again.

pub mod admin;
pub mod auth;
pub mod error;
pub mod extract;
pub mod health;
pub mod menu;
pub mod orders;
pub mod stock;

pub use error::ApiError;
pub use extract::{ApiJson, ApiPath, Authenticated, Authorized, BearerToken};

use crate::auth::{AuthorizationGate, JwtTokens};
use crate::clients::{MenuClient, OrderClient, StockClient, UserClient};
use crate::clock::Clock;
use axum::http::{header, Method};
use axum::routing::{delete, get, patch, post, put};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared handler state. Cheap to clone: every field is a channel handle or an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub users: UserClient,
    pub menu: MenuClient,
    pub stock: StockClient,
    pub orders: OrderClient,
    pub tokens: Arc<JwtTokens>,
    pub gate: AuthorizationGate,
    pub clock: Arc<dyn Clock>,
}

/// The full `/api` router with CORS and request tracing.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let api = Router::new()
        .route("/health", get(health::health))
        // accounts
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/demo-login", post(auth::demo_login))
        .route("/auth/me", get(auth::me))
        // menu
        .route("/menu", get(menu::list).post(menu::create))
        .route(
            "/menu/{id}",
            get(menu::get_one).put(menu::update).delete(menu::delete),
        )
        .route("/menu/{id}/available", put(menu::set_available))
        // orders
        .route("/order", post(orders::create))
        .route("/user/order", post(orders::create))
        .route("/user/order-history", post(orders::history_from_body))
        .route("/user/orders", get(orders::history))
        .route("/orders", get(orders::list))
        .route("/orders/{id}", get(orders::get_one).delete(orders::delete))
        .route("/orders/{id}/status", put(orders::update_status))
        .route("/orders/{id}/payment-status", put(orders::update_payment_status))
        .route(
            "/orders/{id}/payments",
            get(orders::list_payments).post(orders::record_payment),
        )
        // stock
        .route("/stock", get(stock::list).post(stock::create))
        .route(
            "/stock/{id}",
            get(stock::get_one).put(stock::set).delete(stock::delete),
        )
        .route("/stock/{id}/increment", patch(stock::increment))
        .route("/stock/{id}/decrement", patch(stock::decrement))
        // staff listings
        .route("/admin/users", get(admin::users))
        .route("/admin/menu-items", get(admin::menu_items))
        .route("/admin/orders", get(admin::orders))
        .route("/admin/stocks", get(admin::stocks))
        // staff mutations at the paths the admin dashboard calls
        .route("/admin/add/menu-item", post(menu::create))
        .route("/admin/add/stock", post(stock::create))
        .route("/admin/delete/menu/{id}", delete(menu::delete))
        .route("/admin/delete/stock/{id}", delete(stock::delete))
        .route("/admin/delete/order/{id}", delete(orders::delete))
        .route("/admin/orders/update-status/{id}", put(orders::update_status))
        .route(
            "/admin/orders/update-payment-status/{id}",
            put(orders::update_payment_status),
        )
        .route(
            "/admin/menu-items/update-available/{id}",
            put(menu::set_available),
        )
        .fallback(not_found);

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Route not found".into())
}
