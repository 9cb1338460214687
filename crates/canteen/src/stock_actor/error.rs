//! Error types for the stock table.

use crate::auth::AuthError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StockError {
    #[error("Stock item not found")]
    NotFound(String),

    /// Negative quantity, non-positive adjustment, blank name.
    #[error("{0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for StockError {
    fn from(msg: String) -> Self {
        StockError::ActorCommunicationError(msg)
    }
}
