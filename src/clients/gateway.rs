//! # Remote Gateway
//!
//! [`ProductGateway`] is the only door between the sync layer and the remote product
//! service. The [`EntityStore`](crate::store::EntityStore) receives one by value at
//! construction; nothing in the crate reaches for a global client.

use crate::model::{Product, ProductFields, ProductId};
use actor_framework::FrameworkError;
use async_trait::async_trait;
use thiserror::Error;

/// Failures a gateway call can resolve to.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GatewayError {
    /// The service has no product under this id.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The service understood the request and refused it.
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// The service could not be reached or dropped the request.
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl From<FrameworkError> for GatewayError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => GatewayError::NotFound(id),
            FrameworkError::EntityError(inner) => GatewayError::Rejected(inner.to_string()),
            closed @ (FrameworkError::ActorClosed | FrameworkError::ActorDropped) => {
                GatewayError::Unavailable(closed.to_string())
            }
        }
    }
}

/// Create/read/update/delete access to the remote product collection.
///
/// Every call is asynchronous and may fail; none are retried or cancelled by callers.
#[async_trait]
pub trait ProductGateway: Send + Sync {
    /// The whole collection, in the service's order.
    async fn list(&self) -> Result<Vec<Product>, GatewayError>;

    /// One product. A missing id is [`GatewayError::NotFound`].
    async fn get(&self, id: ProductId) -> Result<Product, GatewayError>;

    /// Stores a new product and returns it with its server-assigned id.
    async fn create(&self, fields: ProductFields) -> Result<Product, GatewayError>;

    /// Replaces the fields of an existing product and returns the stored result.
    async fn update(&self, id: ProductId, fields: ProductFields) -> Result<Product, GatewayError>;

    async fn delete(&self, id: ProductId) -> Result<(), GatewayError>;
}
