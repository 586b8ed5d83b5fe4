//! # Form Controller
//!
//! Holds what the user has typed and the validity flag of every field.
//!
//! ## Submit
//!
//! 1. Run every validation rule and refresh every flag.
//! 2. Any failure: stop. The store is not touched.
//! 3. Otherwise build the record. While editing, it keeps the edited
//!    record's id and replaces it; while creating, it gets the store's
//!    next id and is appended.
//! 4. Clear the edit target and reset the form to its defaults.
//!
//! Persistence happens through the store's mutation hooks.
//!
//! ## Edit mode
//!
//! [`FormController::populate`] overwrites every field from the edit target,
//! discarding unsaved input. Flags are reset so stale feedback from the
//! previous input does not linger.

use chrono::NaiveDate;
use thiserror::Error;

use pim_core::temporal::{birth_date_bounds, format_date};
use pim_core::{validate_input, Field, FormValidity, PersonInput, RecordId, ValidationError};
use pim_state::{EditTarget, RecordStore};

/// What a successful submit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new record was appended.
    Created(RecordId),
    /// The edited record was replaced.
    Updated(RecordId),
    /// The edited record no longer exists; nothing was written.
    Dropped(RecordId),
}

/// Why a submit did not reach the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// One or more fields failed validation.
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(Vec<ValidationError>),

    /// The store holds id `u64::MAX`, so no new id can be assigned.
    #[error("no record id left after {0}")]
    IdsExhausted(RecordId),
}

/// Transient form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormController {
    input: PersonInput,
    validity: FormValidity,
}

impl FormController {
    /// A blank form with default title and calling code.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current input.
    pub fn input(&self) -> &PersonInput {
        &self.input
    }

    /// Flags from the last validation.
    pub fn validity(&self) -> &FormValidity {
        &self.validity
    }

    /// Whether `field` passed the last validation.
    pub fn is_valid(&self, field: Field) -> bool {
        let v = &self.validity;
        match field {
            Field::Title => v.title,
            Field::FirstName => v.first_name,
            Field::LastName => v.last_name,
            Field::BirthDate => v.birth_date,
            Field::Nationality => v.nationality,
            Field::CitizenIdPart(n) => v.citizen_id.part(n),
            Field::Gender => v.gender,
            Field::CallingCode => v.calling_code,
            Field::PhoneNumber => v.phone_number,
            Field::PassportNumber => v.passport_number,
            Field::Salary => v.salary,
        }
    }

    /// Set the text of one field.
    ///
    /// Returns `false` for a citizen ID part index outside `1..=5`.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> bool {
        let value = value.into();
        let input = &mut self.input;
        let slot = match field {
            Field::Title => &mut input.title,
            Field::FirstName => &mut input.first_name,
            Field::LastName => &mut input.last_name,
            Field::BirthDate => &mut input.birth_date,
            Field::Nationality => &mut input.nationality,
            Field::CitizenIdPart(n) => match input.citizen_id.part_mut(n) {
                Some(part) => part,
                None => return false,
            },
            Field::Gender => &mut input.gender,
            Field::CallingCode => &mut input.calling_code,
            Field::PhoneNumber => &mut input.phone_number,
            Field::PassportNumber => &mut input.passport_number,
            Field::Salary => &mut input.salary,
        };
        *slot = value;
        true
    }

    /// Earliest and latest acceptable birth dates, as `YYYY-MM-DD`.
    pub fn birth_date_range(today: NaiveDate) -> (String, String) {
        let (min, max) = birth_date_bounds(today);
        (format_date(min), format_date(max))
    }

    /// Load the edit target into the form, discarding unsaved input.
    pub fn populate(&mut self, target: &EditTarget) {
        self.input = match target {
            EditTarget::Editing(record) => record.to_input(),
            EditTarget::Creating => PersonInput::default(),
        };
        self.validity = FormValidity::default();
    }

    /// Run every rule and refresh the flags. Returns the failures, if any.
    pub fn validate(&mut self, today: NaiveDate) -> Result<(), Vec<ValidationError>> {
        let report = validate_input(&self.input, today);
        self.validity = report.validity;
        report.result.map(|_| ())
    }

    /// Validate and, when everything passes, write the record into `store`.
    pub fn submit(
        &mut self,
        store: &mut RecordStore,
        today: NaiveDate,
    ) -> Result<SubmitOutcome, SubmitError> {
        let report = validate_input(&self.input, today);
        self.validity = report.validity;
        let draft = match report.result {
            Ok(draft) => draft,
            Err(errors) => {
                tracing::debug!(failed = errors.len(), "submit blocked by validation");
                return Err(SubmitError::Invalid(errors));
            }
        };

        let outcome = match store.edit_target().record().map(|r| r.id) {
            Some(id) => {
                if store.get(id).is_some() {
                    store.update(draft.into_record(id));
                    tracing::info!(%id, "record updated");
                    SubmitOutcome::Updated(id)
                } else {
                    tracing::debug!(%id, "edited record is gone; update dropped");
                    SubmitOutcome::Dropped(id)
                }
            }
            None => {
                let Some(id) = store.next_id() else {
                    let highest = store.records().iter().map(|r| r.id).max();
                    let highest = highest.unwrap_or(RecordId::FIRST);
                    tracing::warn!(%highest, "create refused: record ids exhausted");
                    return Err(SubmitError::IdsExhausted(highest));
                };
                store.create(draft.into_record(id));
                tracing::info!(%id, "record created");
                SubmitOutcome::Created(id)
            }
        };

        store.clear_edit_target();
        self.populate(store.edit_target());
        Ok(outcome)
    }
}
