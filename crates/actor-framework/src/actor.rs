//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the server side of the Actor Model. It owns
//! the records for one entity type and processes requests sequentially, so its store
//! needs no locking.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages an ordered collection of entities.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Run**: Spawn the actor's run loop in a background task.
/// 3.  **Shut down**: Drop every client clone; the loop ends once the channel closes.
///
/// ```rust
/// use actor_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Note { id: u32, text: String }
/// #[derive(Debug)] struct NoteText(String);
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// #[async_trait]
/// impl ActorEntity for Note {
///     type Id = u32;
///     type Create = NoteText;
///     type Update = NoteText;
///     type Error = NoteError;
///
///     fn from_create_params(id: u32, params: NoteText) -> Result<Self, Self::Error> {
///         Ok(Self { id, text: params.0 })
///     }
///     async fn on_update(&mut self, update: NoteText) -> Result<(), Self::Error> {
///         self.text = update.0;
///         Ok(())
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Note>::new(10);
///     tokio::spawn(actor.run());
///
///     let note = client.create(NoteText("hello".into())).await.unwrap();
///     assert_eq!(note.id, 1);
///     assert_eq!(client.list().await.unwrap().len(), 1);
/// }
/// ```
///
/// # Implementation Details
///
/// Records live in a `HashMap` keyed by id, with a separate `order` vector remembering
/// creation order so `List` answers are stable. Ids come from a `u32` counter converted
/// into `T::Id`; ids are never reused, even after a delete.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    order: Vec<T::Id>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the MPSC channel. If the channel is full,
    /// calls on the client wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            order: Vec::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "Product" instead of "product_sync::model::product::Product")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::List { respond_to } => {
                    let items: Vec<T> = self
                        .order
                        .iter()
                        .filter_map(|id| self.store.get(id))
                        .cloned()
                        .collect();
                    debug!(entity_type, size = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create().await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item.clone());
                            self.order.push(id.clone());
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(item));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        // Hooks mutate a scratch copy so a refused update leaves the record intact
                        let mut candidate = item.clone();
                        if let Err(e) = candidate.on_update(update).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        *item = candidate.clone();
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(candidate));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete().await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        self.order.retain(|existing| existing != &id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
