//! # Subcommand Handlers
//!
//! ```bash
//! pim submit --first-name Jane --last-name Doe --birth-date 1990-04-01 \
//!     --phone 0812345678 --salary 35000
//! pim list --page 2
//! pim edit 3
//! pim submit --last-name Smith      # updates record 3
//! pim toggle 4
//! pim delete-selected
//! ```
//!
//! Exit codes: `0` success, `1` the action could not be applied (unknown
//! record, nothing selected), `2` the form failed validation, `3` an
//! internal error such as an unreadable configuration file.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};

use pim_app::{Session, SubmitError, SubmitOutcome};
use pim_core::{Field, RecordId, COUNTRIES};

/// Exit code for an action that could not be applied.
pub const EXIT_REJECTED: u8 = 1;
/// Exit code for a submit blocked by validation.
pub const EXIT_INVALID: u8 = 2;
/// Exit code for an error that stopped the command from running.
pub const EXIT_ERROR: u8 = 3;

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum PimCommand {
    /// Show one page of records.
    List {
        /// Page to show (clamped to the available range).
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Fill form fields and submit.
    ///
    /// In edit mode, fields that are not given keep the edited record's
    /// values; otherwise they start from the blank form.
    Submit(SubmitArgs),

    /// Load a record into the form for editing.
    Edit {
        /// Record identifier.
        id: u64,
    },

    /// Leave edit mode without saving.
    CancelEdit,

    /// Delete one record.
    Delete {
        /// Record identifier.
        id: u64,
    },

    /// Toggle one record's selection.
    Toggle {
        /// Record identifier.
        id: u64,
    },

    /// Select every record.
    SelectAll {
        /// Clear the selection instead.
        #[arg(long)]
        clear: bool,
    },

    /// Delete every selected record.
    ///
    /// Only allowed when a record on the given page is selected.
    DeleteSelected {
        /// Page whose selection enables the delete.
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Show the supported countries.
    Countries,

    /// Remove every record and leave edit mode.
    Reset,
}

/// Form fields for `submit`.
#[derive(Args, Debug, Default)]
pub struct SubmitArgs {
    /// Title (Mr., Miss, Mrs.).
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    /// Birth date as YYYY-MM-DD.
    #[arg(long)]
    pub birth_date: Option<String>,

    /// Thai, American, or British.
    #[arg(long)]
    pub nationality: Option<String>,

    /// Citizen ID as five dash-separated groups, e.g. 1-2345-67890-12-3.
    #[arg(long)]
    pub citizen_id: Option<String>,

    /// Male, Female, or Unisex.
    #[arg(long)]
    pub gender: Option<String>,

    /// +66, +1, or +44.
    #[arg(long)]
    pub calling_code: Option<String>,

    /// Ten-digit mobile number.
    #[arg(long)]
    pub phone: Option<String>,

    /// Nine uppercase letters or digits.
    #[arg(long)]
    pub passport: Option<String>,

    /// Expected salary, zero or positive.
    #[arg(long)]
    pub salary: Option<String>,
}

impl SubmitArgs {
    /// Field assignments for every flag that was given.
    fn assignments(&self) -> Vec<(Field, String)> {
        let mut out = Vec::new();
        let simple = [
            (Field::Title, &self.title),
            (Field::FirstName, &self.first_name),
            (Field::LastName, &self.last_name),
            (Field::BirthDate, &self.birth_date),
            (Field::Nationality, &self.nationality),
            (Field::Gender, &self.gender),
            (Field::CallingCode, &self.calling_code),
            (Field::PhoneNumber, &self.phone),
            (Field::PassportNumber, &self.passport),
            (Field::Salary, &self.salary),
        ];
        for (field, value) in simple {
            if let Some(v) = value {
                out.push((field, v.clone()));
            }
        }
        if let Some(id) = &self.citizen_id {
            // Missing groups are left empty so validation flags them.
            let mut groups = id.split('-');
            for part in 1..=5u8 {
                let group = groups.next().unwrap_or("");
                out.push((Field::CitizenIdPart(part), group.to_string()));
            }
        }
        out
    }
}

/// Execute one subcommand against `session`.
pub fn run_command(
    command: &PimCommand,
    session: &mut Session,
    today: NaiveDate,
    out: &mut dyn Write,
) -> Result<u8> {
    match command {
        PimCommand::List { page } => {
            session.go_to_page(*page);
            print_page(session, out)
        }
        PimCommand::Submit(args) => run_submit(args, session, today, out),
        PimCommand::Edit { id } => run_edit(RecordId::new(*id), session, out),
        PimCommand::CancelEdit => {
            session.cancel_edit();
            writeln!(out, "edit cancelled")?;
            Ok(0)
        }
        PimCommand::Delete { id } => {
            let id = RecordId::new(*id);
            if session.store().get(id).is_none() {
                writeln!(out, "no record with id {id}")?;
                return Ok(EXIT_REJECTED);
            }
            session.delete(id);
            writeln!(out, "deleted record {id}")?;
            Ok(0)
        }
        PimCommand::Toggle { id } => {
            let id = RecordId::new(*id);
            if session.store().get(id).is_none() {
                writeln!(out, "no record with id {id}")?;
                return Ok(EXIT_REJECTED);
            }
            session.toggle(id);
            let selected = session.store().get(id).is_some_and(|r| r.selected);
            writeln!(
                out,
                "record {id} {}",
                if selected { "selected" } else { "deselected" }
            )?;
            Ok(0)
        }
        PimCommand::SelectAll { clear } => {
            session.select_all(!clear);
            writeln!(
                out,
                "{} {} record(s)",
                if *clear { "deselected" } else { "selected" },
                session.store().total()
            )?;
            Ok(0)
        }
        PimCommand::DeleteSelected { page } => {
            let page = session.go_to_page(*page);
            let before = session.store().total();
            if !session.delete_selected() {
                writeln!(out, "no selected record on page {page}")?;
                return Ok(EXIT_REJECTED);
            }
            writeln!(
                out,
                "deleted {} record(s)",
                before - session.store().total()
            )?;
            Ok(0)
        }
        PimCommand::Countries => {
            for country in &COUNTRIES {
                writeln!(
                    out,
                    "  {:<10} {}",
                    country.nationality.as_str(),
                    country.calling_code_label()
                )?;
            }
            Ok(0)
        }
        PimCommand::Reset => {
            let removed = session.store().total();
            session.reset();
            writeln!(out, "removed {removed} record(s)")?;
            Ok(0)
        }
    }
}

fn run_submit(
    args: &SubmitArgs,
    session: &mut Session,
    today: NaiveDate,
    out: &mut dyn Write,
) -> Result<u8> {
    for (field, value) in args.assignments() {
        session.form_mut().set(field, value);
    }
    match session.submit(today) {
        Ok(SubmitOutcome::Created(id)) => writeln!(out, "created record {id}")?,
        Ok(SubmitOutcome::Updated(id)) => writeln!(out, "updated record {id}")?,
        Ok(SubmitOutcome::Dropped(id)) => {
            writeln!(out, "record {id} no longer exists; edit discarded")?;
            return Ok(EXIT_REJECTED);
        }
        Err(SubmitError::Invalid(errors)) => {
            writeln!(out, "submission rejected:")?;
            for e in &errors {
                writeln!(out, "  {}: {e}", e.field())?;
            }
            return Ok(EXIT_INVALID);
        }
        Err(e @ SubmitError::IdsExhausted(_)) => {
            writeln!(out, "submission rejected: {e}")?;
            return Ok(EXIT_REJECTED);
        }
    }
    Ok(0)
}

fn run_edit(id: RecordId, session: &mut Session, out: &mut dyn Write) -> Result<u8> {
    if !session.request_edit(id) {
        writeln!(out, "no record with id {id}")?;
        return Ok(EXIT_REJECTED);
    }
    let form = serde_json::to_string_pretty(session.form().input())
        .context("failed to render form input")?;
    writeln!(out, "editing record {id}")?;
    writeln!(out, "{form}")?;
    Ok(0)
}

fn print_page(session: &Session, out: &mut dyn Write) -> Result<u8> {
    let rows = session.rows();
    if rows.is_empty() {
        writeln!(out, "no records")?;
        return Ok(0);
    }
    writeln!(
        out,
        "     {:>4}  {:<24} {:<8} {:<16} {}",
        "ID", "NAME", "GENDER", "MOBILE PHONE", "NATIONALITY"
    )?;
    for row in &rows {
        writeln!(
            out,
            "  [{}] {:>4}  {:<24} {:<8} {:<16} {}",
            if row.selected { "x" } else { " " },
            row.id,
            row.name,
            row.gender,
            row.mobile_phone,
            row.nationality
        )?;
    }
    let links: Vec<String> = session
        .page_links()
        .iter()
        .map(|l| {
            if l.active {
                format!("[{}]", l.number)
            } else {
                l.number.to_string()
            }
        })
        .collect();
    writeln!(
        out,
        "page {} of {} ({} records)  {}  {} {}",
        session.list().page(),
        session.page_count(),
        session.store().total(),
        links.join(" "),
        if session.can_prev() { "<prev" } else { "" },
        if session.can_next() { "next>" } else { "" },
    )?;
    if let Some(record) = session.editing() {
        writeln!(out, "editing record {}", record.id)?;
    }
    Ok(0)
}
