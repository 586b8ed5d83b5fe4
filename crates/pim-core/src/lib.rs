//! # pim-core — Foundational Types for the Record Manager
//!
//! Defines the person record, the small fixed locale tables it draws its
//! enumerations from, and the per-field validation rules that gate every
//! write into the record store. Every other crate in the workspace depends
//! on `pim-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtypes for constrained fields.** `RecordId`, `PassportNumber`,
//!    `Salary`, `CitizenId`, and `MobilePhoneNumber` carry their own format.
//!    A `PersonRecord` can only be built from a validated `PersonDraft`.
//!
//! 2. **Raw input stays raw.** `PersonInput` holds the untrusted strings a
//!    form collects. The only path from `PersonInput` to `PersonDraft` is
//!    [`validation::validate_input`], which reports per-field validity.
//!
//! 3. **Injected "today".** Date rules take the current date as a parameter.
//!    Nothing in this crate reads the system clock except [`temporal::local_today`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `pim-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod locale;
pub mod record;
pub mod temporal;
pub mod validation;

// Re-export primary types for ergonomic imports.
pub use error::{Field, ValidationError};
pub use identity::{CitizenId, MobilePhoneNumber, PassportNumber, RecordId, Salary};
pub use locale::{CallingCode, Country, Gender, Nationality, Title, COUNTRIES};
pub use record::{PersonDraft, PersonInput, PersonRecord};
pub use temporal::{birth_date_bounds, local_today, parse_birth_date};
pub use validation::{validate_input, CitizenIdValidity, FormValidity, InputReport};
