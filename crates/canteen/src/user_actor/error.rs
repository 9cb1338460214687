//! Error types for the users table.

use crate::auth::AuthError;
use thiserror::Error;

/// Errors that can occur during account operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    /// No account with this id.
    #[error("User not found")]
    NotFound(String),

    /// The username is taken.
    #[error("User already exists")]
    AlreadyExists(String),

    /// Missing or malformed registration fields.
    #[error("{0}")]
    ValidationError(String),

    /// Unknown username or wrong password. Deliberately does not say which.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Hashing failed or the table could not be reached.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for UserError {
    fn from(msg: String) -> Self {
        UserError::ActorCommunicationError(msg)
    }
}
