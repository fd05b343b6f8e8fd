//! # Product Actor
//!
//! An in-process stand-in for the remote product service: a
//! [`ResourceActor<Product>`](actor_framework::ResourceActor) that assigns ids
//! (`product_1`, `product_2`, …), keeps creation order, and refuses writes without a name
//! or price.
//!
//! The sync layer never talks to it directly; it goes through a
//! [`ProductClient`](crate::clients::ProductClient), which is just one implementation of
//! [`ProductGateway`](crate::clients::ProductGateway).
//!
//! ## Usage
//!
//! ```rust
//! use product_sync::clients::{ProductClient, ProductGateway};
//! use product_sync::model::ProductFields;
//! use product_sync::product_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = product_actor::new(32);
//!     tokio::spawn(actor.run());
//!
//!     let client = ProductClient::new(generic_client);
//!     let pen = client.create(ProductFields::new("Pen", 2.0)).await?;
//!     assert_eq!(pen.id.unwrap().to_string(), "product_1");
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Product;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(buffer_size)
}
