//! # Persistence Bridge
//!
//! Snapshots the whole [`StoreState`] into a blob after every mutation and
//! restores it on startup.
//!
//! ## Snapshot format
//!
//! ```json
//! { "infoPersons": [ { "id": 1, "firstName": "...", ... } ],
//!   "infoPersonToEdit": null }
//! ```
//!
//! There is no schema version. On load the blob is decoded into the typed
//! state, so a shape mismatch is a decode error, and the identifiers are
//! checked for uniqueness. Anything that fails either step is discarded and
//! the default state is used instead.
//!
//! ## Failure policy
//!
//! Persistence never fails the caller. A write error leaves the in-memory
//! state as it is and is logged at `warn`; the next mutation tries again.
//! A read or decode error on startup is logged and yields the empty state.

use std::collections::HashSet;

use thiserror::Error;

use crate::blob::{BlobError, BlobStore};
use crate::store::{Mutation, MutationHook, StoreState};
use pim_core::RecordId;

/// Key the snapshot is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "state";

/// Error encoding, decoding, or storing a snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// The blob is not a well-formed snapshot.
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Two records in the snapshot share an identifier.
    #[error("snapshot contains duplicate record id {0}")]
    DuplicateId(RecordId),

    /// The blob store failed.
    #[error(transparent)]
    Blob(#[from] BlobError),
}

/// Serialize a store state to snapshot JSON.
pub fn encode_snapshot(state: &StoreState) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(state)?)
}

/// Parse snapshot JSON back into a store state.
///
/// # Errors
///
/// [`SnapshotError::Malformed`] for JSON or shape errors,
/// [`SnapshotError::DuplicateId`] when identifiers collide.
pub fn decode_snapshot(blob: &str) -> Result<StoreState, SnapshotError> {
    let state: StoreState = serde_json::from_str(blob)?;
    let mut seen = HashSet::with_capacity(state.info_persons.len());
    for record in &state.info_persons {
        if !seen.insert(record.id) {
            return Err(SnapshotError::DuplicateId(record.id));
        }
    }
    Ok(state)
}

/// Writes snapshots of the store to a [`BlobStore`] under one fixed key.
#[derive(Debug)]
pub struct PersistenceBridge<B> {
    blob: B,
    key: String,
}

impl<B: BlobStore> PersistenceBridge<B> {
    /// Bridge to `blob` under `key`.
    pub fn new(blob: B, key: impl Into<String>) -> Self {
        Self {
            blob,
            key: key.into(),
        }
    }

    /// Read the stored snapshot, strictly.
    ///
    /// `Ok(None)` when nothing is stored.
    pub fn try_load(&self) -> Result<Option<StoreState>, SnapshotError> {
        match self.blob.get(&self.key)? {
            Some(blob) => decode_snapshot(&blob).map(Some),
            None => Ok(None),
        }
    }

    /// Restore the stored state, falling back to the default on any failure.
    pub fn load(&self) -> StoreState {
        match self.try_load() {
            Ok(Some(state)) => {
                tracing::debug!(
                    key = %self.key,
                    records = state.info_persons.len(),
                    "restored snapshot"
                );
                state
            }
            Ok(None) => {
                tracing::debug!(key = %self.key, "no snapshot stored; starting empty");
                StoreState::default()
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "discarding unreadable snapshot");
                StoreState::default()
            }
        }
    }

    /// Write `state` under the key.
    pub fn save(&mut self, state: &StoreState) -> Result<(), SnapshotError> {
        let blob = encode_snapshot(state)?;
        self.blob.set(&self.key, &blob)?;
        Ok(())
    }

    /// Remove the stored snapshot.
    pub fn clear(&mut self) -> Result<(), SnapshotError> {
        self.blob.clear(&self.key)?;
        Ok(())
    }
}

impl<B: BlobStore> MutationHook for PersistenceBridge<B> {
    fn after_mutation(&mut self, mutation: Mutation, state: &StoreState) {
        if let Err(e) = self.save(state) {
            tracing::warn!(
                key = %self.key,
                op = mutation.name(),
                error = %e,
                "snapshot write failed; continuing in memory"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::MemoryBlobStore;
    use crate::store::{EditTarget, RecordStore};

    use chrono::NaiveDate;
    use pim_core::{
        CallingCode, CitizenId, Gender, MobilePhoneNumber, Nationality, PassportNumber,
        PersonDraft, PersonRecord, Salary, Title,
    };

    fn record(id: u64) -> PersonRecord {
        PersonDraft {
            title: Title::Mrs,
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1970, 1, 31).unwrap(),
            nationality: Some(Nationality::British),
            citizen_id: CitizenId::from_parts(["1", "2345", "67890", "12", "3"]),
            gender: Gender::Female,
            mobile_phone_number: MobilePhoneNumber::new(CallingCode::UnitedKingdom, "0712345678")
                .unwrap(),
            passport_number: Some(PassportNumber::new("GB1234567").unwrap()),
            salary: Salary::new("42000.5").unwrap(),
        }
        .into_record(RecordId::new(id))
    }

    /// Blob store whose medium is unavailable.
    struct Unavailable;

    impl BlobStore for Unavailable {
        fn get(&self, key: &str) -> Result<Option<String>, BlobError> {
            Err(BlobError::Io {
                key: key.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        }

        fn set(&mut self, key: &str, _blob: &str) -> Result<(), BlobError> {
            Err(BlobError::Io {
                key: key.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            })
        }

        fn clear(&mut self, _key: &str) -> Result<(), BlobError> {
            Ok(())
        }
    }

    #[test]
    fn snapshot_round_trip_is_structurally_equal() {
        let mut selected = record(2);
        selected.selected = true;
        let state = StoreState {
            info_persons: vec![record(1), selected],
            info_person_to_edit: EditTarget::Editing(record(1)),
        };
        let blob = encode_snapshot(&state).unwrap();
        assert_eq!(decode_snapshot(&blob).unwrap(), state);
    }

    #[test]
    fn snapshot_has_expected_top_level_keys() {
        let blob = encode_snapshot(&StoreState::default()).unwrap();
        assert_eq!(blob, r#"{"infoPersons":[],"infoPersonToEdit":null}"#);
    }

    #[test]
    fn missing_edit_target_key_defaults() {
        let state = decode_snapshot(r#"{"infoPersons":[]}"#).unwrap();
        assert_eq!(state, StoreState::default());
    }

    #[test]
    fn decode_rejects_garbage_and_duplicates() {
        assert!(matches!(
            decode_snapshot("not json"),
            Err(SnapshotError::Malformed(_))
        ));
        assert!(matches!(
            decode_snapshot(r#"{"infoPersons":[{"id":1}]}"#),
            Err(SnapshotError::Malformed(_))
        ));
        let dup = StoreState {
            info_persons: vec![record(1), record(1)],
            info_person_to_edit: EditTarget::Creating,
        };
        let blob = serde_json::to_string(&dup).unwrap();
        assert!(matches!(
            decode_snapshot(&blob),
            Err(SnapshotError::DuplicateId(id)) if id == RecordId::new(1)
        ));
    }

    #[test]
    fn load_absent_blob_yields_default() {
        let bridge = PersistenceBridge::new(MemoryBlobStore::new(), DEFAULT_STORAGE_KEY);
        assert_eq!(bridge.load(), StoreState::default());
        assert!(bridge.try_load().unwrap().is_none());
    }

    #[test]
    fn load_corrupt_blob_yields_default() {
        let mut blob = MemoryBlobStore::new();
        blob.set(DEFAULT_STORAGE_KEY, "{\"infoPersons\": [").unwrap();
        let bridge = PersistenceBridge::new(blob, DEFAULT_STORAGE_KEY);
        assert_eq!(bridge.load(), StoreState::default());
        assert!(bridge.try_load().is_err());
    }

    #[test]
    fn load_unavailable_store_yields_default() {
        let bridge = PersistenceBridge::new(Unavailable, DEFAULT_STORAGE_KEY);
        assert_eq!(bridge.load(), StoreState::default());
    }

    #[test]
    fn hook_writes_after_every_mutation() {
        let blob = MemoryBlobStore::new();
        let bridge = PersistenceBridge::new(blob.clone(), "people");
        let mut store = RecordStore::new().with_hook(bridge);

        store.create(record(1));
        let saved = decode_snapshot(&blob.get("people").unwrap().unwrap()).unwrap();
        assert_eq!(saved.info_persons.len(), 1);

        store.toggle_selected(RecordId::new(1));
        let saved = decode_snapshot(&blob.get("people").unwrap().unwrap()).unwrap();
        assert!(saved.info_persons[0].selected);

        store.set_edit_target(record(1));
        let saved = decode_snapshot(&blob.get("people").unwrap().unwrap()).unwrap();
        assert_eq!(&saved, store.state());
    }

    #[test]
    fn write_failure_keeps_in_memory_state() {
        let mut store =
            RecordStore::new().with_hook(PersistenceBridge::new(Unavailable, DEFAULT_STORAGE_KEY));
        store.create(record(1));
        store.create(record(2));
        assert_eq!(store.total(), 2);
    }

    #[test]
    fn clear_removes_snapshot() {
        let blob = MemoryBlobStore::new();
        let mut bridge = PersistenceBridge::new(blob.clone(), DEFAULT_STORAGE_KEY);
        bridge.save(&StoreState::default()).unwrap();
        assert_eq!(blob.len(), 1);
        bridge.clear().unwrap();
        assert!(blob.is_empty());
    }
}
