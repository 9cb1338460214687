//! # Resource Store
//!
//! An in-process, transactional row store built from tokio actors. Each table is a
//! [`ResourceActor`] that owns its rows and processes one request at a time; callers talk to
//! it through a cloneable [`ResourceClient`]. Because a table never interleaves two requests,
//! every request is a transaction: it either commits completely or leaves the table untouched.
//!
//! ## Layers
//!
//! 1. **Row Layer** ([`ActorEntity`]) - the row type, its payloads, validation and hooks
//! 2. **Table Layer** ([`ResourceActor`]) - ids, unique index, commit/rollback
//! 3. **Client Layer** ([`ResourceClient`], [`ActorClient`]) - typed request/response
//!
//! ## Defining a Table
//!
//! ```rust
//! use resource_store::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Ingredient {
//!     id: u32,
//!     name: String,
//!     quantity: i64,
//! }
//!
//! #[derive(Debug)] struct IngredientCreate { name: String, quantity: i64 }
//! #[derive(Debug)] struct IngredientUpdate { quantity: Option<i64> }
//! #[derive(Debug)] enum IngredientAction { Use(i64) }
//!
//! #[derive(Debug, thiserror::Error)]
//! enum IngredientError {
//!     #[error("Quantity must be positive")]
//!     InvalidQuantity,
//! }
//!
//! #[async_trait]
//! impl ActorEntity for Ingredient {
//!     type Id = u32;
//!     type Create = IngredientCreate;
//!     type Update = IngredientUpdate;
//!     type Action = IngredientAction;
//!     type ActionResult = i64;
//!     type Context = ();
//!     type Error = IngredientError;
//!
//!     fn from_create_params(id: u32, p: IngredientCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, name: p.name, quantity: p.quantity })
//!     }
//!
//!     fn unique_key(&self) -> Option<String> {
//!         Some(self.name.clone())
//!     }
//!
//!     async fn on_update(&mut self, update: IngredientUpdate, _: &()) -> Result<(), Self::Error> {
//!         if let Some(quantity) = update.quantity { self.quantity = quantity; }
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, action: IngredientAction, _: &()) -> Result<i64, Self::Error> {
//!         match action {
//!             IngredientAction::Use(n) if n <= 0 => Err(IngredientError::InvalidQuantity),
//!             IngredientAction::Use(n) => {
//!                 self.quantity = (self.quantity - n).max(0);
//!                 Ok(self.quantity)
//!             }
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Ingredient>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(IngredientCreate { name: "Rice".into(), quantity: 10 }).await.unwrap();
//!     assert_eq!(client.perform_action(id, IngredientAction::Use(4)).await.unwrap(), 6);
//!     assert_eq!(client.find_by_key("Rice").await.unwrap().unwrap().quantity, 6);
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are handed to `run()`, not `new()`. All tables are constructed first, then
//! each one is started with the clients it needs, e.g. the order table runs with the payment
//! client so that deleting an order can cascade to its payments.
//!
//! ## Errors
//!
//! The store reports its own failures ([`FrameworkError::NotFound`],
//! [`FrameworkError::Conflict`], closed channels) and wraps row errors in
//! [`FrameworkError::EntityError`]. Typed clients get their row error back with
//! [`FrameworkError::downcast_entity`].
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a client's requests from scripted expectations, so code that
//! depends on a table can be tested without running it.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
