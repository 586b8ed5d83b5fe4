//! # pim-cli — Personal Information Manager Command Line
//!
//! A thin front end over [`pim_app::Session`]. Each invocation restores the
//! persisted state, performs one action, and exits; persistence happens
//! through the session's mutation hook.
//!
//! ## Subcommands
//!
//! - `list` — show one page of records
//! - `submit` — fill form fields and submit (creates, or updates in edit mode)
//! - `edit` / `cancel-edit` — enter or leave edit mode
//! - `toggle` / `select-all` — selection
//! - `delete` / `delete-selected` — removal
//! - `countries` — the supported nationality and calling-code table
//! - `reset` — remove every record
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; behaviour lives in `pim-app`.
//! - Handlers write to a caller-supplied writer and return an exit code.

pub mod commands;
