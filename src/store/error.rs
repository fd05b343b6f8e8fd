//! Error types for the entity store.

use crate::clients::GatewayError;
use crate::model::ProductId;
use thiserror::Error;

/// Gateway failures, named after the store operation they interrupted.
///
/// Local validation never produces one of these: invalid fields are a silent no-op.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("error fetching products: {0}")]
    Fetch(#[source] GatewayError),

    #[error("error getting product {id}: {source}")]
    Lookup { id: ProductId, source: GatewayError },

    #[error("error creating product: {0}")]
    Create(#[source] GatewayError),

    #[error("error updating product {id}: {source}")]
    Update { id: ProductId, source: GatewayError },

    #[error("error deleting product {id}: {source}")]
    Delete { id: ProductId, source: GatewayError },
}
