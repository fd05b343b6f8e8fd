//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are answered from a
//! queue of scripted expectations instead of a running actor. The free functions at the
//! bottom of this module go one step lower: they give you the raw request receiver so a
//! test can hold a request *open*, inspect the caller's state while it waits, and answer
//! whenever it likes.
//!
//! ## When to use which
//!
//! | Feature | `MockClient` | `create_mock_client` + `expect_*` | Real Actor |
//! |---------|--------------|-----------------------------------|------------|
//! | **Answers** | Scripted, immediate | Hand-delivered by the test | Real state |
//! | **Observe caller mid-request** | No | Yes | No |
//! | **Error Injection** | Easy (`return_err`) | Easy (send an `Err`) | Hard |
//! | **Use Case** | Call sequences | Ordering / optimism checks | Full system |
//!
//! ## Scripted answers
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, PartialEq)] struct Tag { id: u32, label: String }
//! #[derive(Debug)] struct TagLabel(String);
//! #[derive(Debug, thiserror::Error)] #[error("tag error")] struct TagError;
//!
//! #[async_trait]
//! impl ActorEntity for Tag {
//!     type Id = u32; type Create = TagLabel; type Update = TagLabel; type Error = TagError;
//!     fn from_create_params(id: u32, p: TagLabel) -> Result<Self, Self::Error> {
//!         Ok(Self { id, label: p.0 })
//!     }
//!     async fn on_update(&mut self, p: TagLabel) -> Result<(), Self::Error> { self.label = p.0; Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Tag>::new();
//!     mock.expect_list().return_ok(vec![Tag { id: 1, label: "red".into() }]);
//!     mock.expect_get(2).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.list().await.unwrap().len(), 1);
//!     assert!(matches!(client.get(2).await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! ## Holding a request open
//!
//! ```rust,ignore
//! let (client, mut receiver) = create_mock_client::<Product>(10);
//! let task = tokio::spawn(async move { store.create(fields).await });
//!
//! let (params, responder) = expect_create(&mut receiver).await.unwrap();
//! // The caller is suspended here: assert on its optimistic state now.
//! responder.send(Ok(created)).unwrap();
//! task.await.unwrap();
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the answer to give it.
enum Expectation<T: ActorEntity> {
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
}

type ExpectationQueue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed strictly in the order they were registered. A request that
/// does not match the next expectation (wrong kind, or wrong id) makes the background
/// task panic, which the caller observes as [`FrameworkError::ActorDropped`]; `verify()`
/// then also fails because the expectation was never consumed.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: ExpectationQueue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: ExpectationQueue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let mut exps = expectations_clone.lock().unwrap();
                let expectation = exps.pop_front();
                drop(exps); // Release lock before answering

                match (request, expectation) {
                    (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get {
                            id: expected,
                            response,
                        }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create {
                            params: _,
                            respond_to,
                        },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update {
                            id,
                            update: _,
                            respond_to,
                        },
                        Some(Expectation::Update {
                            id: expected,
                            response,
                        }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete {
                            id: expected,
                            response,
                        }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ListExpectationBuilder<T> {
        ListExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `get` operation for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> CreateExpectationBuilder<T> {
        CreateExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `update` operation for `id`.
    pub fn expect_update(&mut self, id: T::Id) -> UpdateExpectationBuilder<T> {
        UpdateExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `delete` operation for `id`.
    pub fn expect_delete(&mut self, id: T::Id) -> DeleteExpectationBuilder<T> {
        DeleteExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Number of expectations not yet consumed.
    pub fn remaining(&self) -> usize {
        self.expectations.lock().unwrap().len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.remaining();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

fn push<T: ActorEntity>(queue: &ExpectationQueue<T>, expectation: Expectation<T>) {
    queue.lock().unwrap().push_back(expectation);
}

/// Builder for `list` expectations.
pub struct ListExpectationBuilder<T: ActorEntity> {
    expectations: ExpectationQueue<T>,
}

impl<T: ActorEntity> ListExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, items: Vec<T>) {
        push(&self.expectations, Expectation::List { response: Ok(items) });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        push(
            &self.expectations,
            Expectation::List {
                response: Err(error),
            },
        );
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: ExpectationQueue<T>,
}

impl<T: ActorEntity> GetExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: Option<T>) {
        push(
            &self.expectations,
            Expectation::Get {
                id: self.id,
                response: Ok(value),
            },
        );
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        push(
            &self.expectations,
            Expectation::Get {
                id: self.id,
                response: Err(error),
            },
        );
    }
}

/// Builder for `create` expectations.
pub struct CreateExpectationBuilder<T: ActorEntity> {
    expectations: ExpectationQueue<T>,
}

impl<T: ActorEntity> CreateExpectationBuilder<T> {
    /// Sets the expectation to return the stored record.
    pub fn return_ok(self, created: T) {
        push(
            &self.expectations,
            Expectation::Create {
                response: Ok(created),
            },
        );
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        push(
            &self.expectations,
            Expectation::Create {
                response: Err(error),
            },
        );
    }
}

/// Builder for `update` expectations.
pub struct UpdateExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: ExpectationQueue<T>,
}

impl<T: ActorEntity> UpdateExpectationBuilder<T> {
    /// Sets the expectation to return the updated record.
    pub fn return_ok(self, updated: T) {
        push(
            &self.expectations,
            Expectation::Update {
                id: self.id,
                response: Ok(updated),
            },
        );
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        push(
            &self.expectations,
            Expectation::Update {
                id: self.id,
                response: Err(error),
            },
        );
    }
}

/// Builder for `delete` expectations.
pub struct DeleteExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: ExpectationQueue<T>,
}

impl<T: ActorEntity> DeleteExpectationBuilder<T> {
    /// Sets the expectation to confirm the delete.
    pub fn return_ok(self) {
        push(
            &self.expectations,
            Expectation::Delete {
                id: self.id,
                response: Ok(()),
            },
        );
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        push(
            &self.expectations,
            Expectation::Delete {
                id: self.id,
                response: Err(error),
            },
        );
    }
}

// =============================================================================
// RAW REQUEST HELPERS
// =============================================================================

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// The client sends its requests to a channel the test owns. Each `expect_*` helper pulls
/// the next request, checks its kind, and hands back the payload together with the
/// responder. Until the test sends on the responder, the caller stays suspended at its
/// `.await`, which is exactly the window where optimistic state can be asserted.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<oneshot::Sender<Result<Vec<T>, FrameworkError>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<(), FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Tag {
        id: u32,
        label: String,
    }

    #[derive(Debug)]
    struct TagLabel(String);

    #[derive(Debug, thiserror::Error)]
    #[error("Tag error")]
    struct TagError;

    #[async_trait]
    impl ActorEntity for Tag {
        type Id = u32;
        type Create = TagLabel;
        type Update = TagLabel;
        type Error = TagError;

        fn from_create_params(id: u32, params: TagLabel) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                label: params.0,
            })
        }

        async fn on_update(&mut self, update: TagLabel) -> Result<(), Self::Error> {
            self.label = update.0;
            Ok(())
        }
    }

    fn tag(id: u32, label: &str) -> Tag {
        Tag {
            id,
            label: label.to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_client_hand_delivered_create() {
        let (client, mut receiver) = create_mock_client::<Tag>(10);

        let create_task = tokio::spawn(async move { client.create(TagLabel("red".into())).await });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.0, "red");
        responder.send(Ok(tag(7, "red"))).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result.unwrap(), tag(7, "red"));
    }

    #[tokio::test]
    async fn test_mock_client_hand_delivered_update_and_delete() {
        let (client, mut receiver) = create_mock_client::<Tag>(10);

        let update_client = client.clone();
        let update_task =
            tokio::spawn(async move { update_client.update(3, TagLabel("blue".into())).await });
        let (id, update, responder) = expect_update(&mut receiver).await.unwrap();
        assert_eq!(id, 3);
        assert_eq!(update.0, "blue");
        responder.send(Ok(tag(3, "blue"))).unwrap();
        assert_eq!(update_task.await.unwrap().unwrap().label, "blue");

        let delete_task = tokio::spawn(async move { client.delete(3).await });
        let (id, responder) = expect_delete(&mut receiver).await.unwrap();
        assert_eq!(id, 3);
        responder
            .send(Err(FrameworkError::NotFound("3".into())))
            .unwrap();
        assert!(matches!(
            delete_task.await.unwrap(),
            Err(FrameworkError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Tag>::new();

        mock.expect_create().return_ok(tag(1, "red"));
        mock.expect_list().return_ok(vec![tag(1, "red")]);
        mock.expect_get(1).return_ok(Some(tag(1, "red")));
        mock.expect_delete(1).return_ok();

        let client = mock.client();

        let created = client.create(TagLabel("red".into())).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(client.list().await.unwrap(), vec![tag(1, "red")]);
        assert!(client.get(1).await.unwrap().is_some());
        client.delete(1).await.unwrap();

        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_client_rejects_unexpected_id() {
        let mut mock = MockClient::<Tag>::new();
        mock.expect_get(1).return_ok(None);

        let result = mock.client().get(2).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
