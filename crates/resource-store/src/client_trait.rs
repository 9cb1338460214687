//! # ActorClient Trait
//!
//! Shared read/delete operations for the typed table clients, built on the generic
//! [`ResourceClient`].
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Implemented by each typed client (e.g. a menu client wrapping `ResourceClient<MenuItem>`).
///
/// Supplies `get`, `list` and `delete` once a client says how to reach its table and how to
/// translate store errors into its own error type.
///
/// ```rust
/// use resource_store::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Tray { id: u32 }
/// #[derive(Debug)] struct TrayCreate;
/// #[derive(Debug)] struct TrayUpdate;
/// #[derive(Debug)] enum TrayAction {}
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct TrayError(String);
///
/// #[async_trait]
/// impl ActorEntity for Tray {
///     type Id = u32; type Create = TrayCreate; type Update = TrayUpdate;
///     type Action = TrayAction; type ActionResult = (); type Context = (); type Error = TrayError;
///     fn from_create_params(id: u32, _: TrayCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
///     async fn on_update(&mut self, _: TrayUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: TrayAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// struct TrayClient { inner: ResourceClient<Tray> }
///
/// #[async_trait]
/// impl ActorClient<Tray> for TrayClient {
///     type Error = TrayError;
///     fn inner(&self) -> &ResourceClient<Tray> { &self.inner }
///     fn map_error(e: FrameworkError) -> TrayError { TrayError(e.to_string()) }
/// }
///
/// async fn usage(client: TrayClient) {
///     let _ = client.get(1).await;
///     let _ = client.list().await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The table-specific error type.
    type Error: Send + Sync;

    /// The generic client underneath.
    fn inner(&self) -> &ResourceClient<T>;

    /// Translates store errors into the table's error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetches a row by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Every row, in id order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Deletes a row by id.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
