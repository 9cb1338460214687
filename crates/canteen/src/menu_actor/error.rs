//! Error types for the menu_items table.

use crate::auth::AuthError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuError {
    #[error("Menu item not found")]
    NotFound(String),

    /// Missing name/category/price, negative price, rating outside 0-5.
    #[error("{0}")]
    ValidationError(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for MenuError {
    fn from(msg: String) -> Self {
        MenuError::ActorCommunicationError(msg)
    }
}
