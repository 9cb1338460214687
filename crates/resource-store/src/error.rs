//! # Store Errors
//!
//! Errors raised by the table actors themselves, as opposed to the per-table
//! errors carried inside [`FrameworkError::EntityError`].

/// Errors that can occur within the store.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    /// A unique column already holds this value.
    #[error("Duplicate key: {0}")]
    Conflict(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the table's own error type from an `EntityError`.
    ///
    /// Returns `Err(self)` unchanged for every other variant, or when the boxed error is of a
    /// different type.
    pub fn downcast_entity<E>(self) -> Result<E, Self>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(err) => Ok(*err),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("quantity must be positive")]
    struct QuantityError;

    #[derive(Debug, thiserror::Error)]
    #[error("other")]
    struct OtherError;

    #[test]
    fn test_downcast_entity_recovers_typed_error() {
        let err = FrameworkError::EntityError(Box::new(QuantityError));
        assert_eq!(err.downcast_entity::<QuantityError>().unwrap(), QuantityError);
    }

    #[test]
    fn test_downcast_entity_keeps_foreign_errors() {
        let err = FrameworkError::EntityError(Box::new(OtherError));
        let back = err.downcast_entity::<QuantityError>().unwrap_err();
        assert_eq!(back.to_string(), "Entity error: other");

        let conflict = FrameworkError::Conflict("ORD-1".into());
        assert!(matches!(
            conflict.downcast_entity::<QuantityError>(),
            Err(FrameworkError::Conflict(key)) if key == "ORD-1"
        ));
    }
}
