//! # Actor Framework
//!
//! Foundational building blocks for serving a collection of records from a Tokio task and
//! talking to it over channels. It follows a **Resource-Oriented Architecture (ROA)** on
//! top of the **Actor Model**: every resource type gets the same List + CRUD vocabulary,
//! and one task owns each collection outright.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - Your record type and its lifecycle hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - Message processing and ordered storage
//! 3. **Interface Layer** ([`ResourceClient`]) - Type-safe, cloneable request handle
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Messages are processed **sequentially** within an actor (no locks needed!)
//! - Callers only suspend their own `.await`; many requests may be in flight at once
//!
//! **Further Reading**:
//! - [Actors with Tokio](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Testing
//!
//! The [`mock`] module scripts or hand-delivers answers to a `ResourceClient<T>` without
//! spawning an actor, including failures that are awkward to provoke for real.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
