//! Error types for the orders table.

use crate::auth::AuthError;
use crate::payment_actor::PaymentError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found")]
    NotFound(String),

    /// Empty item list, non-positive quantity, inconsistent amounts, unknown status.
    #[error("{0}")]
    ValidationError(String),

    /// The order code is already taken.
    #[error("Order code already in use: {0}")]
    Conflict(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}
