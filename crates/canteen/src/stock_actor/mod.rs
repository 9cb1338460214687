//! # Stock Table
//!
//! Named quantities of ingredients and supplies. The quantity is never negative:
//! creation and direct sets reject negative values, and [`StockAction::Decrement`] floors at
//! zero instead of failing.
//!
//! - [`entity`] - [`ActorEntity`](resource_store::ActorEntity) implementation for
//!   [`StockEntry`]
//! - [`actions`] - [`StockAction`] increments and decrements
//! - [`error`] - [`StockError`]
//!
//! Placing an order does not touch this table.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::StockEntry;
use resource_store::{ResourceActor, ResourceClient};

/// Creates the stock table and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<StockEntry>, ResourceClient<StockEntry>) {
    ResourceActor::new(buffer_size)
}
