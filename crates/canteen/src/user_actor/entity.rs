//! [`ActorEntity`] implementation for [`User`].
//!
//! Usernames are the table's unique column, so a duplicate registration is refused by the
//! store itself even when two requests race.

use super::error::UserError;
use crate::model::{User, UserCreate, UserId};
use async_trait::async_trait;
use resource_store::ActorEntity;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    // Accounts are immutable once created.
    type Update = ();
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = UserError;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        let username = params.username.trim().to_string();
        if username.is_empty() {
            return Err(UserError::ValidationError("Username is required".into()));
        }
        if params.password_hash.is_empty() {
            return Err(UserError::ValidationError("Password is required".into()));
        }
        Ok(Self {
            id,
            username,
            password_hash: params.password_hash,
            email: params.email.filter(|e| !e.trim().is_empty()),
            role: params.role,
            created_at: params.at,
            updated_at: params.at,
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.username.clone())
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;
    use chrono::DateTime;

    fn create(username: &str) -> UserCreate {
        UserCreate {
            username: username.into(),
            password_hash: "$argon2id$hash".into(),
            email: Some(" ".into()),
            role: Role::Student,
            at: DateTime::from_timestamp(0, 0).unwrap(),
        }
    }

    #[test]
    fn test_username_is_trimmed_and_unique_key() {
        let user = User::from_create_params(UserId(1), create("  alice ")).unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.unique_key().as_deref(), Some("alice"));
        assert_eq!(user.email, None);
    }

    #[test]
    fn test_blank_username_is_rejected() {
        assert!(matches!(
            User::from_create_params(UserId(1), create("   ")),
            Err(UserError::ValidationError(_))
        ));
    }
}
