//! # Table Actor
//!
//! `ResourceActor<T>` is one table. It owns the rows of type `T`, the unique index over
//! [`ActorEntity::unique_key`], and the identifier sequence, and it is the only task that ever
//! touches them. Requests are processed one at a time, which is what makes every request a
//! transaction: nothing else can observe a row between a hook running and the request being
//! committed or rolled back.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The server half of a table.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2. **Wire**: pass the table's dependencies (other clients) to `run(context)`.
/// 3. **Run**: spawn `run` on the tokio runtime.
///
/// ```rust
/// use resource_store::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Shelf { id: u32, label: String }
/// #[derive(Debug)] struct ShelfCreate { label: String }
/// #[derive(Debug)] struct ShelfUpdate;
/// #[derive(Debug)] enum ShelfAction {}
/// #[derive(Debug, thiserror::Error)] #[error("shelf error")] struct ShelfError;
///
/// #[async_trait]
/// impl ActorEntity for Shelf {
///     type Id = u32;
///     type Create = ShelfCreate;
///     type Update = ShelfUpdate;
///     type Action = ShelfAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = ShelfError;
///
///     fn from_create_params(id: u32, p: ShelfCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, label: p.label })
///     }
///     fn unique_key(&self) -> Option<String> { Some(self.label.clone()) }
///     async fn on_update(&mut self, _: ShelfUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: ShelfAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Shelf>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(ShelfCreate { label: "A".into() }).await.unwrap();
///     assert_eq!(id, 1);
///     // The label column is unique.
///     assert!(client.create(ShelfCreate { label: "A".into() }).await.is_err());
/// }
/// ```
///
/// # Operations
///
/// * **Create**: allocate the next id, `from_create_params`, `on_create`, unique-key check,
///   insert. A failure at any step leaves the table untouched (the id is still consumed).
/// * **Get / List / FindByKey**: clones of the stored rows.
/// * **Update / Action**: snapshot the row, run the hook, re-check the unique index. On any
///   error the snapshot is written back.
/// * **Delete**: `on_delete` (cascades), then removal from the rows and the index.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    rows: BTreeMap<T::Id, T>,
    unique: HashMap<String, T::Id>,
    next_id: u32,
    entity_type: &'static str,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates the actor and its client.
    ///
    /// `buffer_size` is the request channel capacity; callers wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        // "Order" rather than "canteen::model::order::Order"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        let actor = Self {
            receiver,
            rows: BTreeMap::new(),
            unique: HashMap::new(),
            next_id: 1,
            entity_type,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Processes requests until every client has been dropped.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = self.entity_type;
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.create(params, &context).await);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.rows.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.rows.len(), "List");
                    let _ = respond_to.send(Ok(self.rows.values().cloned().collect()));
                }
                ResourceRequest::FindByKey { key, respond_to } => {
                    let item = self
                        .unique
                        .get(&key)
                        .and_then(|id| self.rows.get(id))
                        .cloned();
                    debug!(entity_type, %key, found = item.is_some(), "FindByKey");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.update(id, update, &context).await);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.delete(id, &context).await);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.action(id, action, &context).await);
                }
            }
        }

        info!(entity_type, size = self.rows.len(), "Shutdown");
    }

    async fn create(
        &mut self,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T::Id, FrameworkError> {
        let entity_type = self.entity_type;
        debug!(entity_type, ?params, "Create");
        let id = T::Id::from(self.next_id);
        self.next_id += 1;

        let mut item = T::from_create_params(id.clone(), params).map_err(|e| {
            warn!(entity_type, error = %e, "Create failed");
            FrameworkError::EntityError(Box::new(e))
        })?;
        if let Err(e) = item.on_create(context).await {
            warn!(entity_type, error = %e, "on_create failed");
            return Err(FrameworkError::EntityError(Box::new(e)));
        }

        if let Some(key) = item.unique_key() {
            if self.unique.contains_key(&key) {
                warn!(entity_type, %key, "Duplicate key");
                return Err(FrameworkError::Conflict(key));
            }
            self.unique.insert(key, id.clone());
        }
        self.rows.insert(id.clone(), item);
        info!(entity_type, %id, size = self.rows.len(), "Created");
        Ok(id)
    }

    async fn update(
        &mut self,
        id: T::Id,
        update: T::Update,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        debug!(entity_type = self.entity_type, %id, ?update, "Update");
        let (before, outcome) = match self.rows.get_mut(&id) {
            Some(item) => {
                let before = item.clone();
                let outcome = item.on_update(update, context).await;
                (before, outcome)
            }
            None => return Err(self.not_found(&id)),
        };

        self.settle(&id, before, outcome)?;
        info!(entity_type = self.entity_type, %id, "Updated");
        self.rows.get(&id).cloned().ok_or_else(|| self.not_found(&id))
    }

    async fn delete(&mut self, id: T::Id, context: &T::Context) -> Result<(), FrameworkError> {
        let entity_type = self.entity_type;
        debug!(entity_type, %id, "Delete");
        let Some(item) = self.rows.get(&id) else {
            return Err(self.not_found(&id));
        };
        if let Err(e) = item.on_delete(context).await {
            warn!(entity_type, %id, error = %e, "on_delete failed");
            return Err(FrameworkError::EntityError(Box::new(e)));
        }

        if let Some(key) = self.rows.remove(&id).and_then(|row| row.unique_key()) {
            self.unique.remove(&key);
        }
        info!(entity_type, %id, size = self.rows.len(), "Deleted");
        Ok(())
    }

    async fn action(
        &mut self,
        id: T::Id,
        action: T::Action,
        context: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        debug!(entity_type = self.entity_type, %id, ?action, "Action");
        let (before, outcome) = match self.rows.get_mut(&id) {
            Some(item) => {
                let before = item.clone();
                let outcome = item.handle_action(action, context).await;
                (before, outcome)
            }
            None => return Err(self.not_found(&id)),
        };

        let result = self.settle(&id, before, outcome)?;
        info!(entity_type = self.entity_type, %id, "Action ok");
        Ok(result)
    }

    /// Commits a mutation that already ran in place, or writes `before` back.
    fn settle<R>(
        &mut self,
        id: &T::Id,
        before: T,
        outcome: Result<R, T::Error>,
    ) -> Result<R, FrameworkError> {
        let result = match outcome {
            Ok(value) => {
                let after_key = self.rows.get(id).and_then(|row| row.unique_key());
                self.reindex(id, before.unique_key(), after_key)
                    .map(|()| value)
            }
            Err(e) => Err(FrameworkError::EntityError(Box::new(e))),
        };

        if let Err(e) = &result {
            warn!(entity_type = self.entity_type, %id, error = %e, "Rolled back");
            self.rows.insert(id.clone(), before);
        }
        result
    }

    fn reindex(
        &mut self,
        id: &T::Id,
        old: Option<String>,
        new: Option<String>,
    ) -> Result<(), FrameworkError> {
        if old == new {
            return Ok(());
        }
        if let Some(key) = &new {
            if self.unique.get(key).is_some_and(|owner| owner != id) {
                return Err(FrameworkError::Conflict(key.clone()));
            }
        }
        if let Some(key) = old {
            self.unique.remove(&key);
        }
        if let Some(key) = new {
            self.unique.insert(key, id.clone());
        }
        Ok(())
    }

    fn not_found(&self, id: &T::Id) -> FrameworkError {
        warn!(entity_type = self.entity_type, %id, "Not found");
        FrameworkError::NotFound(id.to_string())
    }
}
