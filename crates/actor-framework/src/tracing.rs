//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide `tracing` subscriber.
//!
//! The format is compact and hides the module path (`with_target(false)`); the actor loop
//! records an `entity_type` field on every event instead, so lines stay short:
//!
//! ```text
//! INFO Created entity_type="Product" id=product_1 size=1
//! WARN Update failed entity_type="Product" id=product_1 error=product name must not be empty
//! ```
//!
//! Verbosity follows `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run     # applied state changes
//! RUST_LOG=debug cargo run    # full payloads at operation entry
//! ```

/// Initializes the global subscriber. Call once, at process start.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact() // Compact format shows spans inline (e.g., "save:update_by_id")
        .init();
}
