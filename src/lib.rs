#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Product Sync
//!
//! > **Optimistic local state for a remote product collection.**
//!
//! This crate keeps a local view of a remote collection of products, lets a user create,
//! select, edit and delete entries, and keeps the view in step with the remote service
//! through asynchronous calls.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Optimistic, then reconcile
//!
//! Every write lands in local state *before* the remote call is made. The UI never waits
//! on the network; the price is that a failed remote write leaves local state diverged
//! until the next refresh. Whether failures are rolled back, and whether created drafts
//! pick up their server id, is policy ([`config::SyncPolicy`]), off by default.
//!
//! ### Stale answers never win
//!
//! Each list/get request is tagged with a per-target sequence number. An answer that was
//! overtaken by a newer request or a local write is dropped instead of applied.
//!
//! ### Explicit coupling
//!
//! The mode state machine does not call the store. It returns [`mode::ModeEvent`]s, and
//! the session dispatches them: leaving edit mode means one refresh.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Core ([`store`], [`mode`], [`form`])
//! - **[`EntityStore`](store::EntityStore)**: the collection and the selection, optimistic
//!   writes, reconciliation with the gateway.
//! - **[`ModeMachine`](mode::ModeMachine)**: `Browsing → Viewing(p) → Editing(p)`.
//! - **[`FormBuffer`](form::FormBuffer)**: unsaved edits.
//!
//! ### 2. The Entry Point ([`session`])
//! [`SyncSession`](session::SyncSession) takes user intents (`on_create_submit`,
//! `on_row_select`, …) and publishes a [`ViewState`](session::ViewState) after each.
//!
//! ### 3. The Interface ([`clients`])
//! - **Role**: the [`ProductGateway`](clients::ProductGateway) trait is everything the core
//!   needs from the remote service. [`ProductClient`](clients::ProductClient) implements it
//!   over an actor client.
//!
//! ### 4. The Service ([`product_actor`])
//! An in-process `ResourceActor<Product>` standing in for the remote service.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`ProductSystem`](lifecycle::ProductSystem) spins up the service and wires a session to
//! it.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//! ```
//!
//! ```bash
//! cargo test
//! ```

pub mod clients;
pub mod config;
pub mod form;
pub mod lifecycle;
pub mod mode;
pub mod model;
pub mod product_actor;
pub mod session;
pub mod store;
