//! # Menu Table
//!
//! Dishes with price, category, availability and rating. Independent of orders: an order
//! keeps its own snapshot of each line, so editing or deleting a dish never touches order
//! history.
//!
//! - [`entity`] - validation and partial updates for [`MenuItem`]
//! - [`error`] - [`MenuError`]

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::MenuItem;
use resource_store::{ResourceActor, ResourceClient};

/// Creates the menu_items table and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<MenuItem>, ResourceClient<MenuItem>) {
    ResourceActor::new(buffer_size)
}
