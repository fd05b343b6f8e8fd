//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract a record type implements to be served by the
//! generic [`ResourceActor`](crate::ResourceActor). It names the id type, the create and
//! update payloads, and the error type, and it provides lifecycle hooks (`on_create`,
//! `on_update`, `on_delete`) where the entity can validate or refuse a change.
//!
//! Implementing this trait is all it takes to get a uniform List + CRUD API for a record
//! type over message passing.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Architecture Note
/// By defining a contract (`ActorEntity`) that every resource type must satisfy,
/// the `ResourceActor` message loop is written *once* and reused everywhere.
///
/// Associated types keep the payloads honest: a `Product` actor takes `ProductFields`
/// for both create and update, and the compiler rejects anything else.
///
/// # Provided Methods (Hooks)
/// - [`ActorEntity::on_create`]
/// - [`ActorEntity::on_delete`]
///
/// The defaults do nothing (`Ok(())`).
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance (DTO - Data Transfer Object).
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// The error type for this entity's hooks.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full Entity from the assigned ID and the payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is built and before it is stored.
    /// Returning an error refuses the create; nothing is stored.
    async fn on_create(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(&mut self, update: Self::Update) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the system.
    async fn on_delete(&self) -> Result<(), Self::Error> {
        Ok(())
    }
}
