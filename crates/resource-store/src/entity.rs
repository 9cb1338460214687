//! # ActorEntity Trait
//!
//! The contract every table row type (User, MenuItem, StockEntry, Order, Payment) implements
//! to be stored by a [`ResourceActor`](crate::ResourceActor).
//!
//! Associated types pin down the identifier, the insert/update payloads, the custom actions,
//! the injected context and the row's error type, so a `StockEntry` table can never receive an
//! `Order` payload.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`] and [`ActorEntity::on_delete`] default to `Ok(())`.
//! - [`ActorEntity::unique_key`] defaults to `None` (no unique column).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A row type managed by a `ResourceActor`.
///
/// # Async & Context
/// Hooks are `async` so they can talk to other tables (e.g. an order deleting its payments).
/// The `Context` is handed to `run()` rather than `new()`, which lets tables be wired after
/// they are all constructed.
///
/// # Atomicity
/// A hook that returns `Err` aborts the request: a failed create inserts nothing, and a failed
/// update or action is rolled back to the row's previous state by the actor.
#[async_trait]
pub trait ActorEntity: Clone + Debug + Send + Sync + 'static {
    /// Row identifier. Allocated from a per-table `u32` sequence, and ordered so that
    /// listings come back in insertion order.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Insert payload.
    type Create: Send + Sync + Debug;

    /// Update payload.
    type Update: Send + Sync + Debug;

    /// Row-specific operations (e.g. `Increment`).
    type Action: Send + Sync + Debug;

    /// Result of a custom action.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into every hook. `()` when there are none.
    type Context: Send + Sync;

    /// Per-table error type.
    ///
    /// One enum covers every operation on the table. Clients recover it from
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError) by downcasting.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the row from its allocated identifier and the insert payload.
    /// Validation that needs no other table belongs here.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Value of the row's unique column, if the table has one.
    ///
    /// The actor keeps an index over these values and refuses any insert or update that
    /// would produce a duplicate.
    fn unique_key(&self) -> Option<String> {
        None
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after construction, before the row becomes visible.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update payload in place.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the row is removed. Cascades to dependent tables go here.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handles a row-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
