//! Error types for the Product actor.

use thiserror::Error;

/// Reasons the remote service refuses a product write.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The product name was empty.
    #[error("product name must not be empty")]
    EmptyName,

    /// The price was zero, NaN, or empty text.
    #[error("product price must be present, got {0:?}")]
    MissingPrice(String),
}
