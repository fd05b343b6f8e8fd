use crate::clients::ProductClient;
use crate::config::SyncConfig;
use crate::session::SyncSession;
use crate::store::EntityStore;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum ShutdownError {
    #[error("session is still shared; drop every clone before shutdown")]
    SessionShared,
    #[error("product service task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// The in-process product service plus a session wired to it.
///
/// `ProductSystem` is responsible for:
/// - **Lifecycle Management**: spawning the product actor and stopping it again
/// - **Dependency Wiring**: `ProductClient` → `EntityStore` → `SyncSession`, with the
///   configured [`SyncPolicy`](crate::config::SyncPolicy)
///
/// # Example
///
/// ```rust
/// use product_sync::config::SyncConfig;
/// use product_sync::lifecycle::ProductSystem;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let system = ProductSystem::new(SyncConfig::default());
///
/// system.session().on_load().await;
/// assert!(system.session().view().products.is_empty());
///
/// system.shutdown().await?;
/// # Ok(())
/// # }
/// ```
pub struct ProductSystem {
    session: Arc<SyncSession<ProductClient>>,
    handle: tokio::task::JoinHandle<()>,
}

impl ProductSystem {
    /// Spawns the product actor and builds a session on top of it.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: SyncConfig) -> Self {
        let (actor, client) = crate::product_actor::new(config.remote.buffer_size);
        let handle = tokio::spawn(actor.run());

        let store = EntityStore::new(ProductClient::new(client), config.policy);
        info!(policy = ?config.policy, "Product system started");

        Self {
            session: Arc::new(SyncSession::new(store)),
            handle,
        }
    }

    pub fn session(&self) -> &Arc<SyncSession<ProductClient>> {
        &self.session
    }

    /// Drops the session, which closes the actor's channel, then waits for the actor.
    ///
    /// Fails with [`ShutdownError::SessionShared`] when a clone of the session is still
    /// alive, since the actor would never see its channel close.
    pub async fn shutdown(self) -> Result<(), ShutdownError> {
        info!("Shutting down product system...");

        let session = Arc::try_unwrap(self.session).map_err(|_| {
            error!("Session still shared at shutdown");
            ShutdownError::SessionShared
        })?;
        drop(session);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(e.into());
        }

        info!("Product system shutdown complete.");
        Ok(())
    }
}
