//! # Record Store
//!
//! The ordered collection of person records plus the edit target.
//!
//! ## Operations
//!
//! ```text
//! create(record)         append (id assigned by caller via next_id)
//! update(record)         replace the record with the same id, else no-op
//! remove(id)             drop the record with that id
//! remove_selected()      drop every selected record, order preserved
//! set_all_selected(flag) set every record's checkbox
//! toggle_selected(id)    flip one record's checkbox
//! set_edit_target(rec)   load a record into the form
//! clear_edit_target()    back to "creating new"
//! ```
//!
//! Every operation is total: it cannot fail, only degrade to a no-op. After
//! each one the registered [`MutationHook`]s observe the new [`StoreState`].
//!
//! ## Invariant
//!
//! Record identifiers are unique. [`RecordStore::next_id`] yields
//! `max(id) + 1`, or 1 when empty, and `create` refuses an id that is
//! already present. When the highest id is `u64::MAX` there is no next id.

use serde::{Deserialize, Serialize};

use pim_core::{PersonRecord, RecordId};

// ─── Edit target ─────────────────────────────────────────────────────

/// What the form is currently doing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<PersonRecord>", into = "Option<PersonRecord>")]
pub enum EditTarget {
    /// Creating a new record.
    #[default]
    Creating,
    /// Editing an existing record; holds the values it was loaded with.
    Editing(PersonRecord),
}

impl EditTarget {
    /// The record being edited, if any.
    pub fn record(&self) -> Option<&PersonRecord> {
        match self {
            Self::Creating => None,
            Self::Editing(record) => Some(record),
        }
    }

    /// Whether a record is loaded for editing.
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }
}

impl From<Option<PersonRecord>> for EditTarget {
    fn from(value: Option<PersonRecord>) -> Self {
        match value {
            Some(record) => Self::Editing(record),
            None => Self::Creating,
        }
    }
}

impl From<EditTarget> for Option<PersonRecord> {
    fn from(value: EditTarget) -> Self {
        match value {
            EditTarget::Creating => None,
            EditTarget::Editing(record) => Some(record),
        }
    }
}

// ─── Store state ─────────────────────────────────────────────────────

/// Everything the store holds. This is the persisted snapshot shape.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    /// Records in insertion order.
    pub info_persons: Vec<PersonRecord>,
    /// The record loaded into the form, if any.
    #[serde(default)]
    pub info_person_to_edit: EditTarget,
}

// ─── Mutation hooks ──────────────────────────────────────────────────

/// The store operation that just ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create(RecordId),
    Update(RecordId),
    Remove(RecordId),
    RemoveSelected { removed: usize },
    SetAllSelected(bool),
    ToggleSelected(RecordId),
    SetEditTarget(RecordId),
    ClearEditTarget,
}

impl Mutation {
    /// Short operation name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create(_) => "create",
            Self::Update(_) => "update",
            Self::Remove(_) => "remove",
            Self::RemoveSelected { .. } => "remove_selected",
            Self::SetAllSelected(_) => "set_all_selected",
            Self::ToggleSelected(_) => "toggle_selected",
            Self::SetEditTarget(_) => "set_edit_target",
            Self::ClearEditTarget => "clear_edit_target",
        }
    }
}

/// Observer run synchronously after every store mutation.
pub trait MutationHook {
    /// Called with the operation and the complete post-mutation state.
    fn after_mutation(&mut self, mutation: Mutation, state: &StoreState);
}

// ─── Store ───────────────────────────────────────────────────────────

/// In-memory record store with post-mutation hooks.
#[derive(Default)]
pub struct RecordStore {
    state: StoreState,
    hooks: Vec<Box<dyn MutationHook>>,
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("state", &self.state)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl RecordStore {
    /// An empty store with no hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded from restored state. Hooks are not run for seeding.
    pub fn from_state(state: StoreState) -> Self {
        Self {
            state,
            hooks: Vec::new(),
        }
    }

    /// Register a hook, builder style.
    pub fn with_hook(mut self, hook: impl MutationHook + 'static) -> Self {
        self.add_hook(Box::new(hook));
        self
    }

    /// Register a hook.
    pub fn add_hook(&mut self, hook: Box<dyn MutationHook>) {
        self.hooks.push(hook);
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// All records in order.
    pub fn records(&self) -> &[PersonRecord] {
        &self.state.info_persons
    }

    /// Number of records.
    pub fn total(&self) -> usize {
        self.state.info_persons.len()
    }

    /// Look up a record by id.
    pub fn get(&self, id: RecordId) -> Option<&PersonRecord> {
        self.state.info_persons.iter().find(|r| r.id == id)
    }

    /// The current edit target.
    pub fn edit_target(&self) -> &EditTarget {
        &self.state.info_person_to_edit
    }

    /// The whole state, as persisted.
    pub fn state(&self) -> &StoreState {
        &self.state
    }

    /// Identifier for the next new record: `max + 1`, or 1 when empty.
    ///
    /// `None` once the highest id is `u64::MAX`; no fresh id exists then.
    pub fn next_id(&self) -> Option<RecordId> {
        match self.state.info_persons.iter().map(|r| r.id).max() {
            Some(max) => max.next(),
            None => Some(RecordId::FIRST),
        }
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Append a record. A record whose id is already taken is dropped.
    pub fn create(&mut self, record: PersonRecord) -> &[PersonRecord] {
        let id = record.id;
        if self.get(id).is_some() {
            tracing::warn!(%id, "create ignored: record id already present");
            return self.records();
        }
        self.state.info_persons.push(record);
        self.notify(Mutation::Create(id));
        self.records()
    }

    /// Replace the record sharing `record.id`. No-op when there is none.
    pub fn update(&mut self, record: PersonRecord) -> &[PersonRecord] {
        let id = record.id;
        match self.state.info_persons.iter_mut().find(|r| r.id == id) {
            Some(slot) => {
                *slot = record;
                self.notify(Mutation::Update(id));
            }
            None => {
                tracing::debug!(%id, "update dropped: no record with this id");
            }
        }
        self.records()
    }

    /// Remove the record with `id`.
    pub fn remove(&mut self, id: RecordId) -> &[PersonRecord] {
        self.state.info_persons.retain(|r| r.id != id);
        self.notify(Mutation::Remove(id));
        self.records()
    }

    /// Remove every selected record, keeping the rest in order.
    pub fn remove_selected(&mut self) -> &[PersonRecord] {
        let before = self.total();
        self.state.info_persons.retain(|r| !r.selected);
        let removed = before - self.total();
        self.notify(Mutation::RemoveSelected { removed });
        self.records()
    }

    /// Set every record's `selected` flag.
    pub fn set_all_selected(&mut self, flag: bool) -> &[PersonRecord] {
        for record in &mut self.state.info_persons {
            record.selected = flag;
        }
        self.notify(Mutation::SetAllSelected(flag));
        self.records()
    }

    /// Flip the `selected` flag of the record with `id`.
    pub fn toggle_selected(&mut self, id: RecordId) -> &[PersonRecord] {
        if let Some(record) = self.state.info_persons.iter_mut().find(|r| r.id == id) {
            record.selected = !record.selected;
        }
        self.notify(Mutation::ToggleSelected(id));
        self.records()
    }

    /// Load `record` into the edit target.
    pub fn set_edit_target(&mut self, record: PersonRecord) -> &EditTarget {
        let id = record.id;
        self.state.info_person_to_edit = EditTarget::Editing(record);
        self.notify(Mutation::SetEditTarget(id));
        self.edit_target()
    }

    /// Reset the edit target to "creating new".
    pub fn clear_edit_target(&mut self) -> &EditTarget {
        self.state.info_person_to_edit = EditTarget::Creating;
        self.notify(Mutation::ClearEditTarget);
        self.edit_target()
    }

    fn notify(&mut self, mutation: Mutation) {
        tracing::debug!(
            op = mutation.name(),
            records = self.state.info_persons.len(),
            editing = self.state.info_person_to_edit.is_editing(),
            "store mutated"
        );
        for hook in &mut self.hooks {
            hook.after_mutation(mutation, &self.state);
        }
    }
}
