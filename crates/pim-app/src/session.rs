//! # Session
//!
//! Sole owner of the record store and both controllers.
//!
//! Every user action is one method call on a `&mut Session`. After the call
//! returns the three parts agree with each other:
//!
//! - the form shows the edit target whenever the edit target changed,
//! - the list is on page 1 whenever the collection changed,
//! - the persistence hook has written the new state.
//!
//! Opening a session restores the last snapshot from the blob store (or the
//! empty state if there is none or it is unreadable) and populates the form
//! from the restored edit target.

use chrono::NaiveDate;

use pim_core::{PersonRecord, RecordId};
use pim_state::{
    BlobStore, EditTarget, FileBlobStore, MemoryBlobStore, PersistenceBridge, RecordStore,
};

use crate::config::PimConfig;
use crate::form::{FormController, SubmitError, SubmitOutcome};
use crate::list::{ListController, PageLink, RowView};

/// The application state owner.
#[derive(Debug)]
pub struct Session {
    store: RecordStore,
    form: FormController,
    list: ListController,
}

impl Session {
    /// Restore from `blob` under `key` and persist every later mutation there.
    pub fn open<B: BlobStore + 'static>(blob: B, key: impl Into<String>) -> Self {
        let bridge = PersistenceBridge::new(blob, key);
        let state = bridge.load();
        let store = RecordStore::from_state(state).with_hook(bridge);
        let mut form = FormController::new();
        form.populate(store.edit_target());
        tracing::debug!(
            records = store.total(),
            editing = store.edit_target().is_editing(),
            "session opened"
        );
        Self {
            store,
            form,
            list: ListController::new(),
        }
    }

    /// A session that persists to a fresh in-memory blob store.
    pub fn in_memory() -> Self {
        Self::open(MemoryBlobStore::new(), pim_state::DEFAULT_STORAGE_KEY)
    }

    /// A session backed by one JSON file in the configured data directory.
    pub fn from_config(config: &PimConfig) -> Self {
        Self::open(
            FileBlobStore::new(config.data_dir.clone()),
            config.storage_key.clone(),
        )
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    /// Mutable form access for typing into fields.
    pub fn form_mut(&mut self) -> &mut FormController {
        &mut self.form
    }

    pub fn list(&self) -> &ListController {
        &self.list
    }

    /// The record currently loaded into the form, if any.
    pub fn editing(&self) -> Option<&PersonRecord> {
        self.store.edit_target().record()
    }

    // ── Form actions ─────────────────────────────────────────────────

    /// Submit the form. On success the list returns to page 1.
    pub fn submit(&mut self, today: NaiveDate) -> Result<SubmitOutcome, SubmitError> {
        let outcome = self.form.submit(&mut self.store, today)?;
        self.list.on_collection_changed();
        Ok(outcome)
    }

    /// Load record `id` into the form. Returns `false` when it does not exist.
    pub fn request_edit(&mut self, id: RecordId) -> bool {
        if !self.list.request_edit(&mut self.store, id) {
            tracing::debug!(%id, "edit requested for unknown record");
            return false;
        }
        self.form.populate(self.store.edit_target());
        true
    }

    /// Leave edit mode and reset the form.
    pub fn cancel_edit(&mut self) {
        self.store.clear_edit_target();
        self.form.populate(&EditTarget::Creating);
    }

    // ── List actions ─────────────────────────────────────────────────

    pub fn toggle(&mut self, id: RecordId) {
        self.list.select_one(&mut self.store, id);
    }

    pub fn select_all(&mut self, flag: bool) {
        self.list.select_all(&mut self.store, flag);
    }

    pub fn delete(&mut self, id: RecordId) {
        self.list.delete_one(&mut self.store, id);
    }

    /// Bulk delete, if some displayed record is selected.
    pub fn delete_selected(&mut self) -> bool {
        self.list.delete_selected(&mut self.store)
    }

    /// Remove every record and leave edit mode.
    pub fn reset(&mut self) {
        self.store.set_all_selected(true);
        self.store.remove_selected();
        self.cancel_edit();
        self.list.on_collection_changed();
        tracing::info!("all records removed");
    }

    // ── Navigation ───────────────────────────────────────────────────

    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.list.go_to(page, &self.store)
    }

    pub fn prev_page(&mut self) -> usize {
        self.list.prev(&self.store)
    }

    pub fn next_page(&mut self) -> usize {
        self.list.next(&self.store)
    }

    pub fn can_prev(&self) -> bool {
        self.list.can_prev()
    }

    pub fn can_next(&self) -> bool {
        self.list.can_next(&self.store)
    }

    pub fn can_delete_selected(&self) -> bool {
        self.list.can_delete_selected(&self.store)
    }

    // ── Views ────────────────────────────────────────────────────────

    pub fn rows(&self) -> Vec<RowView> {
        self.list.rows(&self.store)
    }

    pub fn page_links(&self) -> Vec<PageLink> {
        self.list.page_links(&self.store)
    }

    pub fn page_count(&self) -> usize {
        self.list.page_count(&self.store)
    }
}
