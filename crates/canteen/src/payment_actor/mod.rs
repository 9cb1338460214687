//! # Payment Table
//!
//! Payment attempts recorded against orders (several per order are allowed). Rows are only
//! created through the order table, which checks the order exists, and are deleted with
//! their order.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Payment;
use resource_store::{ResourceActor, ResourceClient};

/// Creates the payments table and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Payment>, ResourceClient<Payment>) {
    ResourceActor::new(buffer_size)
}
