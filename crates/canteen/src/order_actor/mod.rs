//! # Order Table
//!
//! Placed orders with their item snapshots, amounts, kitchen status and payment status.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_store::ActorEntity) implementation for [`Order`]
//! - [`actions`] - [`OrderAction`] (recording payments)
//! - [`error`] - [`OrderError`]
//!
//! ## Dependencies
//!
//! The table runs with the [`PaymentClient`](crate::clients::PaymentClient) as its context:
//! deleting an order deletes its payments, and payments are recorded through the order so
//! that they can never point at a deleted order.
//!
//! ```rust
//! use canteen::clients::PaymentClient;
//! use canteen::{order_actor, payment_actor};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (payment_actor, payment_raw) = payment_actor::new(32);
//!     let (order_actor, order_raw) = order_actor::new(32);
//!
//!     tokio::spawn(payment_actor.run(()));
//!     tokio::spawn(order_actor.run(PaymentClient::new(payment_raw)));
//!     # drop(order_raw);
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Order;
use resource_store::{ResourceActor, ResourceClient};

/// Creates the orders table and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}
