//! # Canteen
//!
//! Backend of a campus canteen: menu browsing, order placement, the kitchen/cashier
//! workflow, stock tracking and role-gated administration, served as JSON over HTTP.
//!
//! - **[model]**: row types ([`User`](model::User), [`MenuItem`](model::MenuItem),
//!   [`StockEntry`](model::StockEntry), [`Order`](model::Order), [`Payment`](model::Payment))
//!   and their create/update payloads.
//! - **`*_actor`**: the [`ActorEntity`](resource_store::ActorEntity) implementation of each
//!   table, holding its validation rules and hooks.
//! - **[clients]**: typed clients over the tables. Role policy is enforced here.
//! - **[auth]**: roles, the authorization gate, tokens and password hashing.
//! - **[lifecycle]**: [`CanteenSystem`](lifecycle::CanteenSystem), the explicitly constructed
//!   store handle, plus seeding.
//! - **[api]**: the axum router.

pub mod api;
pub mod auth;
pub mod clients;
pub mod clock;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod menu_actor;
pub mod order_actor;
pub mod payment_actor;
pub mod stock_actor;
pub mod user_actor;
