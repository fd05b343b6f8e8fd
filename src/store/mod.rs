//! # Entity Store
//!
//! The local copy of the product collection and the current selection.
//!
//! ## Optimistic writes
//!
//! Create, update and delete are split in two phases:
//!
//! 1. `begin_*` is synchronous. It validates, mutates local state immediately and hands back
//!    a pending ticket.
//! 2. `complete_*` sends the ticket to the gateway and reconciles the answer.
//!
//! Whoever calls `begin_*` has changed the collection before anything was sent, so any
//! later intent already sees the write. The `create`/`update_by_id`/`delete_by_id`
//! shorthands run both phases back to back.
//!
//! With the default [`SyncPolicy`] a failed gateway call is logged and the local write
//! stays: the collection diverges from the service until the next [`EntityStore::refresh`].
//!
//! ## Stale answers
//!
//! The collection and the selection each carry a sequence number. Every `list`/`get`
//! request takes the next number for its target, and every local write to the collection
//! advances it too. An answer whose number is no longer the latest is dropped, so a slow
//! response can never overwrite newer state.

pub mod error;

pub use error::*;

use crate::clients::ProductGateway;
use crate::config::SyncPolicy;
use crate::model::{Product, ProductFields, ProductId};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};

/// A collection entry. `key` is local and survives edits, so answers can find the entry
/// they belong to even when it has no server id.
#[derive(Debug, Clone)]
struct Slot {
    key: u64,
    product: Product,
}

#[derive(Debug, Default)]
struct StoreState {
    slots: Vec<Slot>,
    selection: Option<Product>,
    next_key: u64,
    collection_seq: u64,
    selection_seq: u64,
}

impl StoreState {
    fn slot(&mut self, product: Product) -> Slot {
        let key = self.next_key;
        self.next_key += 1;
        Slot { key, product }
    }

    fn products(&self) -> Vec<Product> {
        self.slots.iter().map(|s| s.product.clone()).collect()
    }
}

/// What the store holds at one instant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreSnapshot {
    pub products: Vec<Product>,
    pub selection: Option<Product>,
}

/// A draft appended by [`EntityStore::begin_create`], awaiting the gateway.
#[must_use = "an optimistic create does nothing remotely until completed"]
#[derive(Debug)]
pub struct PendingCreate {
    key: u64,
    fields: ProductFields,
}

/// A replacement made by [`EntityStore::begin_update`], awaiting the gateway.
#[must_use = "an optimistic update does nothing remotely until completed"]
#[derive(Debug)]
pub struct PendingUpdate {
    id: ProductId,
    fields: ProductFields,
    written: Product,
    replaced: Vec<Slot>,
    replaced_selection: Option<Product>,
}

impl PendingUpdate {
    /// The product as it now appears locally.
    pub fn written(&self) -> &Product {
        &self.written
    }
}

/// A removal made by [`EntityStore::begin_delete`], awaiting the gateway.
#[must_use = "an optimistic delete does nothing remotely until completed"]
#[derive(Debug)]
pub struct PendingDelete {
    id: ProductId,
    removed: Vec<(usize, Slot)>,
}

/// Local product state kept in step with a [`ProductGateway`].
///
/// All methods take `&self`; share the store behind an `Arc` to run several operations
/// at once. The internal lock is never held across an `.await`.
pub struct EntityStore<G> {
    gateway: G,
    policy: SyncPolicy,
    state: Mutex<StoreState>,
}

impl<G: ProductGateway> EntityStore<G> {
    pub fn new(gateway: G, policy: SyncPolicy) -> Self {
        Self {
            gateway,
            policy,
            state: Mutex::new(StoreState::default()),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.lock();
        StoreSnapshot {
            products: state.products(),
            selection: state.selection.clone(),
        }
    }

    pub fn products(&self) -> Vec<Product> {
        self.lock().products()
    }

    pub fn selection(&self) -> Option<Product> {
        self.lock().selection.clone()
    }

    fn is_latest(&self, issued: u64, latest: u64) -> bool {
        !self.policy.discard_stale_responses || issued == latest
    }

    // --- Reads ---

    /// Replaces the whole collection with the service's list, in the service's order.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<(), StoreError> {
        let issued = {
            let mut state = self.lock();
            state.collection_seq += 1;
            state.collection_seq
        };
        debug!(issued, "Fetching products");

        match self.gateway.list().await {
            Ok(products) => {
                let mut state = self.lock();
                if !self.is_latest(issued, state.collection_seq) {
                    warn!(issued, latest = state.collection_seq, "Discarding stale product list");
                    return Ok(());
                }
                let slots: Vec<Slot> = products.into_iter().map(|p| state.slot(p)).collect();
                state.slots = slots;
                info!(size = state.slots.len(), "Products refreshed");
                Ok(())
            }
            Err(source) => {
                let e = StoreError::Fetch(source);
                warn!(error = %e, "Refresh failed");
                Err(e)
            }
        }
    }

    /// Fetches one product and makes it the selection.
    ///
    /// Returns the product when it was applied, `None` when a newer selection change
    /// overtook this request.
    #[instrument(skip(self))]
    pub async fn select_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let issued = {
            let mut state = self.lock();
            state.selection_seq += 1;
            state.selection_seq
        };

        match self.gateway.get(id.clone()).await {
            Ok(product) => {
                let mut state = self.lock();
                if !self.is_latest(issued, state.selection_seq) {
                    warn!(%id, issued, latest = state.selection_seq, "Discarding stale product lookup");
                    return Ok(None);
                }
                state.selection = Some(product.clone());
                info!(%id, "Product selected");
                Ok(Some(product))
            }
            Err(source) => {
                let e = StoreError::Lookup { id, source };
                warn!(error = %e, "Lookup failed");
                Err(e)
            }
        }
    }

    /// Drops the selection. Lookups still in flight will not reinstate it.
    pub fn clear_selection(&self) {
        let mut state = self.lock();
        state.selection_seq += 1;
        state.selection = None;
        debug!("Selection cleared");
    }

    /// Keeps the selection but makes every lookup still in flight stale.
    pub fn invalidate_lookups(&self) {
        let mut state = self.lock();
        state.selection_seq += 1;
        debug!(latest = state.selection_seq, "Pending lookups invalidated");
    }

    // --- Create ---

    /// Appends a draft (no id) built from `fields`. `None` when the fields are not
    /// submittable; nothing changes in that case.
    pub fn begin_create(&self, fields: ProductFields) -> Option<PendingCreate> {
        if !fields.is_submittable() {
            debug!(?fields, "Ignoring create without name or price");
            return None;
        }
        let mut state = self.lock();
        let slot = state.slot(Product::draft(fields.clone()));
        let key = slot.key;
        state.slots.push(slot);
        state.collection_seq += 1;
        info!(size = state.slots.len(), "Draft appended");
        Some(PendingCreate { key, fields })
    }

    #[instrument(skip(self, pending))]
    pub async fn complete_create(&self, pending: PendingCreate) -> Result<(), StoreError> {
        let PendingCreate { key, fields } = pending;
        debug!(?fields, "Sending create");

        match self.gateway.create(fields).await {
            Ok(created) => {
                if self.policy.reconcile_id_on_create_success {
                    let mut state = self.lock();
                    if let Some(slot) = state.slots.iter_mut().find(|s| s.key == key) {
                        slot.product.id = created.id.clone();
                        info!(id = ?created.id, "Draft reconciled with server id");
                    }
                } else {
                    debug!(id = ?created.id, "Created; draft keeps no id until next refresh");
                }
                Ok(())
            }
            Err(source) => {
                let e = StoreError::Create(source);
                warn!(error = %e, "Create failed");
                if self.policy.rollback_on_failure {
                    let mut state = self.lock();
                    state.slots.retain(|s| s.key != key);
                    info!("Draft rolled back");
                }
                Err(e)
            }
        }
    }

    pub async fn create(&self, fields: ProductFields) -> Result<(), StoreError> {
        match self.begin_create(fields) {
            Some(pending) => self.complete_create(pending).await,
            None => Ok(()),
        }
    }

    // --- Update ---

    /// Replaces every entry carrying `id` (and the selection, if it is that product) with
    /// `{ ..fields, id }`. `None` when the fields are not submittable.
    pub fn begin_update(&self, id: ProductId, fields: ProductFields) -> Option<PendingUpdate> {
        if !fields.is_submittable() {
            debug!(%id, ?fields, "Ignoring update without name or price");
            return None;
        }
        let written = Product::with_id(id.clone(), fields.clone());
        let mut state = self.lock();

        let mut replaced = Vec::new();
        for slot in state.slots.iter_mut().filter(|s| s.product.has_id(&id)) {
            replaced.push(slot.clone());
            slot.product = written.clone();
        }
        let replaced_selection = match state.selection.as_mut() {
            Some(selected) if selected.has_id(&id) => {
                Some(std::mem::replace(selected, written.clone()))
            }
            _ => None,
        };
        state.collection_seq += 1;
        info!(%id, replaced = replaced.len(), "Product replaced");

        Some(PendingUpdate {
            id,
            fields,
            written,
            replaced,
            replaced_selection,
        })
    }

    #[instrument(skip(self, pending), fields(id = %pending.id))]
    pub async fn complete_update(&self, pending: PendingUpdate) -> Result<(), StoreError> {
        let PendingUpdate {
            id,
            fields,
            written,
            replaced,
            replaced_selection,
        } = pending;

        match self.gateway.update(id.clone(), fields).await {
            Ok(_) => Ok(()),
            Err(source) => {
                let e = StoreError::Update { id, source };
                warn!(error = %e, "Update failed");
                if self.policy.rollback_on_failure {
                    let mut state = self.lock();
                    // Only undo entries still showing this write; a later edit wins.
                    for old in replaced {
                        if let Some(slot) = state
                            .slots
                            .iter_mut()
                            .find(|s| s.key == old.key && s.product == written)
                        {
                            slot.product = old.product;
                        }
                    }
                    if let Some(old) = replaced_selection {
                        if state.selection.as_ref() == Some(&written) {
                            state.selection = Some(old);
                        }
                    }
                    info!("Update rolled back");
                }
                Err(e)
            }
        }
    }

    pub async fn update_by_id(&self, id: ProductId, fields: ProductFields) -> Result<(), StoreError> {
        match self.begin_update(id, fields) {
            Some(pending) => self.complete_update(pending).await,
            None => Ok(()),
        }
    }

    // --- Delete ---

    /// Removes every entry carrying `id` and clears the selection.
    pub fn begin_delete(&self, id: ProductId) -> PendingDelete {
        let mut state = self.lock();

        let mut removed = Vec::new();
        let mut index = 0;
        state.slots.retain(|slot| {
            let keep = !slot.product.has_id(&id);
            if !keep {
                removed.push((index, slot.clone()));
            }
            index += 1;
            keep
        });
        state.selection = None;
        state.selection_seq += 1;
        state.collection_seq += 1;
        info!(%id, removed = removed.len(), size = state.slots.len(), "Product removed");

        PendingDelete { id, removed }
    }

    #[instrument(skip(self, pending), fields(id = %pending.id))]
    pub async fn complete_delete(&self, pending: PendingDelete) -> Result<(), StoreError> {
        let PendingDelete { id, removed } = pending;

        match self.gateway.delete(id.clone()).await {
            Ok(()) => Ok(()),
            Err(source) => {
                let e = StoreError::Delete { id, source };
                warn!(error = %e, "Delete failed");
                if self.policy.rollback_on_failure {
                    let mut state = self.lock();
                    // Ascending original positions rebuild the old order.
                    for (index, slot) in removed {
                        let at = index.min(state.slots.len());
                        state.slots.insert(at, slot);
                    }
                    info!("Delete rolled back");
                }
                Err(e)
            }
        }
    }

    pub async fn delete_by_id(&self, id: ProductId) -> Result<(), StoreError> {
        let pending = self.begin_delete(id);
        self.complete_delete(pending).await
    }
}
