//! # User Table
//!
//! Accounts: username (unique), Argon2 password hash, optional email and a fixed [`Role`].
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_store::ActorEntity) implementation for [`User`]
//! - [`error`] - [`UserError`]
//! - [`new()`] - creates the table and its raw client
//!
//! No dependencies (`Context = ()`), no updates and no custom actions: roles are fixed at
//! creation. Students register themselves; staff roles are provisioned at startup.
//!
//! [`Role`]: crate::model::Role

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::User;
use resource_store::{ResourceActor, ResourceClient};

/// Creates the users table and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<User>, ResourceClient<User>) {
    ResourceActor::new(buffer_size)
}
