//! # Generic Messages
//!
//! The request envelope exchanged between a `ResourceClient` and its `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// # Resource-Oriented Architecture
/// Each actor manages one type of resource (the [`ActorEntity`]). Rather than ad-hoc
/// messages per operation, every resource speaks the same lifecycle vocabulary:
///
/// - **List**: Full collection, in the order records were created.
/// - **Create**: Lifecycle start. Uses [`ActorEntity::Create`]; answers with the stored record,
///   including its freshly assigned id.
/// - **Get (Read)**: Fetches the current state of one record by ID.
/// - **Update**: Uses [`ActorEntity::Update`]; answers with the updated record.
/// - **Delete**: Lifecycle end. Removes the record.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    List {
        respond_to: Response<Vec<T>>,
    },
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
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
}
