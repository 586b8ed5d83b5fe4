//! # pim-app — Controllers and Session
//!
//! The two clients of the record store and the object that owns them.
//!
//! - **Form controller** (`form.rs`): transient input and per-field validity
//!   flags. Submitting validates everything and, on success, creates or
//!   updates a record depending on the edit target.
//! - **List controller** (`list.rs`): five-row pagination over the records,
//!   selection, deletion, and edit requests.
//! - **Session** (`session.rs`): owns the [`pim_state::RecordStore`] (with its
//!   persistence hook) and both controllers, and keeps them consistent: the
//!   form is repopulated whenever the edit target changes and the list returns
//!   to page 1 whenever the collection changes.
//! - **Config** (`config.rs`): where the snapshot lives and how to log.
//!
//! Everything runs on the caller's thread, one action at a time.

pub mod config;
pub mod form;
pub mod list;
pub mod session;

pub use config::{ConfigError, LogFormat, PimConfig};
pub use form::{FormController, SubmitError, SubmitOutcome};
pub use list::{ListController, PageLink, RowView, PAGE_SIZE};
pub use session::Session;
