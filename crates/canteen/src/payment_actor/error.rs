//! Error types for the payments table.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PaymentError {
    #[error("Payment not found")]
    NotFound(String),

    #[error("{0}")]
    ValidationError(String),

    /// Some of an order's payments could not be deleted; the rest already are.
    #[error("Deleted {deleted} of the payments for order {order_id}, {remaining} remain: {reason}")]
    CascadeIncomplete {
        order_id: String,
        deleted: usize,
        remaining: usize,
        reason: String,
    },

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for PaymentError {
    fn from(msg: String) -> Self {
        PaymentError::ActorCommunicationError(msg)
    }
}
