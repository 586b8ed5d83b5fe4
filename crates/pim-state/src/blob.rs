//! # Blob Stores
//!
//! The durable medium behind persistence is an opaque key-value store of
//! text blobs: `get`, `set`, `clear`. Nothing above this module knows
//! whether a blob lives in memory or on disk.
//!
//! [`FileBlobStore`] keeps one `{key}.json` file per key under a data
//! directory. Writes go to a sibling temp file first and are renamed into
//! place; a crash mid-write leaves the previous blob intact.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use thiserror::Error;

/// Error from a blob store operation.
#[derive(Error, Debug)]
pub enum BlobError {
    /// The key cannot be mapped onto the medium.
    #[error("invalid blob key {0:?}: use ASCII letters, digits, '-', '_' or '.'")]
    InvalidKey(String),

    /// The medium failed.
    #[error("blob store io error for key '{key}': {source}")]
    Io {
        /// Key being accessed.
        key: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Key-value storage for serialized snapshots.
pub trait BlobStore {
    /// Read the blob under `key`. `Ok(None)` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, BlobError>;

    /// Write `blob` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, blob: &str) -> Result<(), BlobError>;

    /// Remove the blob under `key`. Removing an absent key succeeds.
    fn clear(&mut self, key: &str) -> Result<(), BlobError>;
}

// ─── In-memory ───────────────────────────────────────────────────────

/// Blob store held in memory.
///
/// Clones share the same entries, so a test can keep a handle while the
/// persistence bridge owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryBlobStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, BlobError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, blob: &str) -> Result<(), BlobError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), BlobError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

// ─── File-backed ─────────────────────────────────────────────────────

/// Blob store writing `{dir}/{key}.json`.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// A store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, BlobError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

/// Check that `key` can name a file: non-empty, no leading `.`, and only
/// ASCII alphanumerics, `-`, `_`, or `.`.
pub fn validate_key(key: &str) -> Result<(), BlobError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(BlobError::InvalidKey(key.to_string()))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, BlobError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(BlobError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, blob: &str) -> Result<(), BlobError> {
        let path = self.path_for(key)?;
        let io_err = |source| BlobError::Io {
            key: key.to_string(),
            source,
        };
        std::fs::create_dir_all(&self.dir).map_err(io_err)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, blob).map_err(io_err)?;
        std::fs::rename(&tmp, &path).map_err(io_err)?;
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), BlobError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(BlobError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}
