//! # Table Requests
//!
//! The messages a [`ResourceClient`](crate::ResourceClient) sends to its
//! [`ResourceActor`](crate::ResourceActor).

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// One-shot reply channel used by every request.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// A request against one table.
///
/// The variants are row-level CRUD plus two read paths (`List`, `FindByKey`) and a custom
/// `Action`. Each request is handled to completion before the next one is read, so every
/// variant is atomic with respect to the table.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    /// All rows, in identifier order.
    List {
        respond_to: Response<Vec<T>>,
    },
    /// Lookup through the unique index.
    FindByKey {
        key: String,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
