//! # pim-state — Record Store and Persistence
//!
//! Owns the mutable state of the record manager and keeps it durable.
//!
//! ## Components
//!
//! - **Record store** (`store.rs`): the ordered person records plus the
//!   [`EditTarget`]. All mutation goes through the store's operation set;
//!   fields are never assigned from outside. Each operation hands back the
//!   full collection so consumers re-render from a fresh snapshot.
//!
//! - **Blob stores** (`blob.rs`): the opaque key-value medium behind
//!   persistence. [`MemoryBlobStore`] for tests and ephemeral sessions,
//!   [`FileBlobStore`] for one-JSON-file-per-key durability.
//!
//! - **Persistence bridge** (`persist.rs`): a [`MutationHook`] that writes the
//!   entire [`StoreState`] to a blob after every mutation and restores it on
//!   startup. Read and write failures are logged and swallowed.
//!
//! ## Execution model
//!
//! Single-threaded and synchronous. The store is owned by one session and
//! lent out by `&mut`; nothing here is `Sync` or needs to be.

pub mod blob;
pub mod persist;
pub mod store;

pub use blob::{validate_key, BlobError, BlobStore, FileBlobStore, MemoryBlobStore};
pub use persist::{
    decode_snapshot, encode_snapshot, PersistenceBridge, SnapshotError, DEFAULT_STORAGE_KEY,
};
pub use store::{EditTarget, Mutation, MutationHook, RecordStore, StoreState};
