//! # Product Client
//!
//! [`ProductGateway`] over a `ResourceClient<Product>`, i.e. over the
//! [`product_actor`](crate::product_actor) service or a mock of it.
use crate::clients::gateway::{GatewayError, ProductGateway};
use crate::model::{Product, ProductFields, ProductId};
use actor_framework::ResourceClient;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ProductGateway for ProductClient {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Product>, GatewayError> {
        debug!("Sending request");
        self.inner.list().await.map_err(GatewayError::from)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: ProductId) -> Result<Product, GatewayError> {
        debug!("Sending request");
        self.inner
            .get(id.clone())
            .await?
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn create(&self, fields: ProductFields) -> Result<Product, GatewayError> {
        debug!("Sending request");
        self.inner.create(fields).await.map_err(GatewayError::from)
    }

    #[instrument(skip(self))]
    async fn update(&self, id: ProductId, fields: ProductFields) -> Result<Product, GatewayError> {
        debug!("Sending request");
        self.inner.update(id, fields).await.map_err(GatewayError::from)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ProductId) -> Result<(), GatewayError> {
        debug!("Sending request");
        self.inner.delete(id).await.map_err(GatewayError::from)
    }
}
