//! Scripted walk through a session: load, create, select, edit, save, delete.
//!
//! Reads a TOML config from the path in `PRODUCT_SYNC_CONFIG` when set.

use actor_framework::tracing::setup_tracing;
use product_sync::config::SyncConfig;
use product_sync::lifecycle::ProductSystem;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = match std::env::var("PRODUCT_SYNC_CONFIG") {
        Ok(path) => SyncConfig::load(path)?,
        Err(_) => SyncConfig::default(),
    };
    info!(policy = ?config.policy, "Starting product sync demo");

    let system = ProductSystem::new(config);
    let session = system.session().clone();

    session.on_load().await;

    let span = tracing::info_span!("create");
    async {
        session.on_field_change("name", "Pen")?;
        session.on_field_change("price", 2.0)?;
        session.on_create_submit().await;
        Ok::<_, product_sync::form::FormError>(())
    }
    .instrument(span)
    .await?;

    // The draft has no id; a refresh brings in the server's record.
    session.on_load().await;
    let Some(id) = session.view().products.first().and_then(|p| p.id.clone()) else {
        return Err("service returned no products".into());
    };
    info!(%id, "Product stored remotely");

    let span = tracing::info_span!("edit", %id);
    async {
        session.on_row_select(id.clone()).await;
        session.on_enter_edit_mode();
        session.on_field_change("price", 3.0)?;
        session.on_save_submit().await;
        Ok::<_, product_sync::form::FormError>(())
    }
    .instrument(span)
    .await?;

    let view = session.view();
    info!(products = ?view.products, mode = ?view.mode, "After save");

    session.on_delete_submit(id).await;
    info!(size = session.view().products.len(), "After delete");

    drop(session);
    system.shutdown().await?;
    Ok(())
}
