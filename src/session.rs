//! # Sync Session
//!
//! The entry point for the presentation layer. A [`SyncSession`] owns the
//! [`EntityStore`], the [`ModeMachine`] and the [`FormBuffer`], turns user intents into calls
//! on them, and publishes a [`ViewState`] after every change.
//!
//! Intent handlers never fail on Gateway errors. The store has already logged them, and the
//! collection is left as the optimistic write made it.
//!
//! ## Example
//!
//! ```rust
//! use product_sync::clients::ProductClient;
//! use product_sync::config::SyncPolicy;
//! use product_sync::session::SyncSession;
//! use product_sync::store::EntityStore;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (actor, client) = product_sync::product_actor::new(8);
//! tokio::spawn(actor.run());
//!
//! let store = EntityStore::new(ProductClient::new(client), SyncPolicy::default());
//! let session = SyncSession::new(store);
//!
//! session.on_field_change("name", "Pen").unwrap();
//! session.on_field_change("price", 2.0).unwrap();
//! session.on_create_submit().await;
//!
//! assert_eq!(session.view().products.len(), 1);
//! # }
//! ```

use crate::clients::ProductGateway;
use crate::form::{FieldValue, FormBuffer, FormError, FormField};
use crate::mode::{Mode, ModeEvent, ModeMachine, Transition};
use crate::model::{Product, ProductFields, ProductId};
use crate::store::EntityStore;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// What the presentation layer renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub products: Vec<Product>,
    pub selection: Option<Product>,
    pub mode: Mode,
    pub form: ProductFields,
}

#[derive(Debug, Default)]
struct UiState {
    machine: ModeMachine,
    form: FormBuffer,
}

impl UiState {
    /// Applies mode side effects to the form. Returns whether a refresh is due.
    fn dispatch(&mut self, events: Vec<ModeEvent>) -> bool {
        let mut refresh = false;
        for event in events {
            match event {
                ModeEvent::SelectionChanged => self.form.reset(),
                ModeEvent::EnteredEditing(fields) => self.form.seed(fields),
                ModeEvent::LeftEditing => {
                    self.form.reset();
                    refresh = true;
                }
                ModeEvent::SelectionCleared => self.form.reset(),
            }
        }
        refresh
    }

    fn apply(&mut self, transition: Transition) -> Option<bool> {
        match self.machine.apply(transition) {
            Ok(events) => Some(self.dispatch(events)),
            Err(e) => {
                debug!(error = %e, "Ignoring intent");
                None
            }
        }
    }
}

pub struct SyncSession<G> {
    store: EntityStore<G>,
    ui: Mutex<UiState>,
    view: watch::Sender<ViewState>,
}

impl<G: ProductGateway> SyncSession<G> {
    pub fn new(store: EntityStore<G>) -> Self {
        let snapshot = store.snapshot();
        let (view, _) = watch::channel(ViewState {
            products: snapshot.products,
            selection: snapshot.selection,
            mode: Mode::Browsing,
            form: ProductFields::default(),
        });
        Self {
            store,
            ui: Mutex::new(UiState::default()),
            view,
        }
    }

    pub fn store(&self) -> &EntityStore<G> {
        &self.store
    }

    /// The latest published state.
    pub fn view(&self) -> ViewState {
        self.view.borrow().clone()
    }

    /// A receiver that is notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.view.subscribe()
    }

    fn lock_ui(&self) -> MutexGuard<'_, UiState> {
        self.ui.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_editing(&self) -> bool {
        self.lock_ui().machine.mode().is_editing()
    }

    fn publish(&self) {
        let snapshot = self.store.snapshot();
        let state = {
            let ui = self.lock_ui();
            ViewState {
                products: snapshot.products,
                selection: snapshot.selection,
                mode: ui.machine.mode().clone(),
                form: ui.form.fields().clone(),
            }
        };
        self.view.send_replace(state);
    }

    async fn refresh(&self) {
        if let Err(e) = self.store.refresh().await {
            debug!(error = %e, "Keeping current collection");
        }
        self.publish();
    }

    // --- Intents ---

    /// Initial population of the collection.
    pub async fn on_load(&self) {
        info!("Loading products");
        self.refresh().await;
    }

    pub fn on_field_change(
        &self,
        key: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), FormError> {
        let field: FormField = key.parse()?;
        self.lock_ui().form.set_field(field, value.into())?;
        self.publish();
        Ok(())
    }

    /// Submits the form as a new product. Invalid fields leave everything untouched.
    #[instrument(skip(self))]
    pub async fn on_create_submit(&self) {
        let pending = {
            let mut ui = self.lock_ui();
            if ui.machine.mode().is_editing() {
                debug!("Ignoring create while editing");
                return;
            }
            let pending = self.store.begin_create(ui.form.fields().clone());
            if pending.is_some() {
                ui.form.reset();
            }
            pending
        };
        let Some(pending) = pending else {
            return;
        };
        self.publish();

        if let Err(e) = self.store.complete_create(pending).await {
            debug!(error = %e, "Keeping optimistic draft");
        }
        self.publish();
    }

    #[instrument(skip(self))]
    pub async fn on_row_select(&self, id: ProductId) {
        if self.is_editing() {
            debug!("Ignoring row select while editing");
            return;
        }
        match self.store.select_by_id(id).await {
            Ok(Some(product)) => {
                if self.lock_ui().apply(Transition::Select(product)).is_none() {
                    warn!("Selection arrived after the mode moved on");
                }
            }
            Ok(None) => {}
            Err(e) => debug!(error = %e, "Keeping current selection"),
        }
        self.publish();
    }

    /// Enters editing. A lookup still in flight can no longer replace the selection.
    pub fn on_enter_edit_mode(&self) {
        {
            let mut ui = self.lock_ui();
            if ui.apply(Transition::EnterEdit).is_some() {
                self.store.invalidate_lookups();
            }
        }
        self.publish();
    }

    /// Saves the form over the edited product and leaves editing.
    ///
    /// Local state is replaced and published first, then the update is sent, then the
    /// collection is refreshed once. Invalid fields skip the update but still leave
    /// editing.
    #[instrument(skip(self))]
    pub async fn on_save_submit(&self) {
        let (pending, refresh) = {
            let mut ui = self.lock_ui();
            let (editing, fields) = match ui.machine.mode() {
                Mode::Editing(p) => (p.clone(), ui.form.fields().clone()),
                _ => {
                    debug!("Ignoring save outside editing");
                    return;
                }
            };
            let pending = editing
                .id
                .clone()
                .and_then(|id| self.store.begin_update(id, fields));
            let saved = pending
                .as_ref()
                .map(|p| p.written().clone())
                .unwrap_or(editing);
            (pending, ui.apply(Transition::Save(saved)).unwrap_or(false))
        };
        self.publish();

        if let Some(pending) = pending {
            if let Err(e) = self.store.complete_update(pending).await {
                debug!(error = %e, "Keeping optimistic update");
            }
        }
        if refresh {
            self.refresh().await;
        } else {
            self.publish();
        }
    }

    pub async fn on_cancel_edit(&self) {
        let refresh = self.lock_ui().apply(Transition::Cancel).unwrap_or(false);
        self.publish();
        if refresh {
            self.refresh().await;
        }
    }

    pub fn on_deselect(&self) {
        if self.lock_ui().apply(Transition::Deselect).is_some() {
            self.store.clear_selection();
        }
        self.publish();
    }

    #[instrument(skip(self))]
    pub async fn on_delete_submit(&self, id: ProductId) {
        let pending = {
            let mut ui = self.lock_ui();
            if ui.machine.mode().is_editing() {
                debug!("Ignoring delete while editing");
                return;
            }
            let pending = self.store.begin_delete(id);
            ui.apply(Transition::Deleted);
            pending
        };
        self.publish();

        if let Err(e) = self.store.complete_delete(pending).await {
            debug!(error = %e, "Keeping optimistic delete");
        }
        self.publish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ProductClient;
    use crate::config::SyncPolicy;
    use actor_framework::mock::{create_mock_client, expect_get, expect_list, MockClient};
    use actor_framework::FrameworkError;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_field_change_rejects_unknown_keys() {
        let mock = MockClient::<Product>::new();
        let session = SyncSession::new(EntityStore::new(
            ProductClient::new(mock.client()),
            SyncPolicy::default(),
        ));

        assert!(session.on_field_change("colour", "red").is_err());
        session.on_field_change("name", "Pen").unwrap();
        assert_eq!(session.view().form, ProductFields::new("Pen", 0.0));
        mock.verify();
    }

    #[tokio::test]
    async fn test_invalid_create_leaves_form_and_collection() {
        let mock = MockClient::<Product>::new();
        let session = SyncSession::new(EntityStore::new(
            ProductClient::new(mock.client()),
            SyncPolicy::default(),
        ));

        session.on_field_change("price", 5.0).unwrap();
        session.on_create_submit().await;

        let view = session.view();
        assert!(view.products.is_empty());
        assert_eq!(view.form, ProductFields::new("", 5.0));
        mock.verify();
    }

    #[tokio::test]
    async fn test_create_publishes_draft_and_clears_form_before_answer() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let session = Arc::new(SyncSession::new(EntityStore::new(
            ProductClient::new(client),
            SyncPolicy::default(),
        )));
        let mut updates = session.subscribe();

        session.on_field_change("name", "Pen").unwrap();
        session.on_field_change("price", 2.0).unwrap();
        let task = tokio::spawn({
            let session = session.clone();
            async move { session.on_create_submit().await }
        });

        let (_, responder) = actor_framework::mock::expect_create(&mut receiver)
            .await
            .unwrap();
        let view = updates.borrow_and_update().clone();
        assert_eq!(view.products, vec![Product::draft(ProductFields::new("Pen", 2.0))]);
        assert_eq!(view.form, ProductFields::default());

        responder.send(Err(FrameworkError::ActorClosed)).unwrap();
        task.await.unwrap();
        assert_eq!(session.view().products.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_empty_collection() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let session = Arc::new(SyncSession::new(EntityStore::new(
            ProductClient::new(client),
            SyncPolicy::default(),
        )));

        let task = tokio::spawn({
            let session = session.clone();
            async move { session.on_load().await }
        });
        let responder = expect_list(&mut receiver).await.unwrap();
        responder.send(Err(FrameworkError::ActorDropped)).unwrap();
        task.await.unwrap();

        assert!(session.view().products.is_empty());
    }

    #[tokio::test]
    async fn test_row_select_resets_form() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let session = Arc::new(SyncSession::new(EntityStore::new(
            ProductClient::new(client),
            SyncPolicy::default(),
        )));
        session.on_field_change("name", "Draft").unwrap();

        let task = tokio::spawn({
            let session = session.clone();
            async move { session.on_row_select(ProductId::from("p1")).await }
        });
        let (id, responder) = expect_get(&mut receiver).await.unwrap();
        assert_eq!(id, ProductId::from("p1"));
        responder.send(Ok(Some(Product::new("p1", "Pen", 2.0)))).unwrap();
        task.await.unwrap();

        let view = session.view();
        assert_eq!(view.mode, Mode::Viewing(Product::new("p1", "Pen", 2.0)));
        assert_eq!(view.selection, Some(Product::new("p1", "Pen", 2.0)));
        assert_eq!(view.form, ProductFields::default());
    }

    #[tokio::test]
    async fn test_deselect_clears_selection_and_form() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_get(ProductId::from("p1"))
            .return_ok(Some(Product::new("p1", "Pen", 2.0)));
        let session = SyncSession::new(EntityStore::new(
            ProductClient::new(mock.client()),
            SyncPolicy::default(),
        ));

        session.on_row_select(ProductId::from("p1")).await;
        session.on_field_change("name", "Ink").unwrap();
        session.on_deselect();

        let view = session.view();
        assert_eq!(view.mode, Mode::Browsing);
        assert_eq!(view.selection, None);
        assert_eq!(view.form, ProductFields::default());
        mock.verify();
    }
}
