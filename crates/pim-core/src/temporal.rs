//! # Birth Date Handling
//!
//! Birth dates are calendar dates with no time or zone. The valid window is
//! `[today - 100 years, today]`, both ends inclusive. "100 years ago" is
//! computed by calendar months, so 29 February clamps to 28 February in a
//! non-leap target year.
//!
//! Every function takes `today` explicitly; [`local_today`] is the single
//! place that reads the system clock.

use chrono::{Local, Months, NaiveDate};

/// Width of the birth date window, in years.
pub const MAX_AGE_YEARS: u32 = 100;

/// Wire format of a birth date (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Alternate entry format accepted from forms (`MM/DD/YYYY`).
const US_DATE_FORMAT: &str = "%m/%d/%Y";

/// Today's date in the local time zone.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// The inclusive `(earliest, latest)` birth dates accepted on `today`.
pub fn birth_date_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let earliest = today
        .checked_sub_months(Months::new(MAX_AGE_YEARS * 12))
        .unwrap_or(NaiveDate::MIN);
    (earliest, today)
}

/// Parse a birth date from `YYYY-MM-DD` or `MM/DD/YYYY`.
pub fn parse_birth_date(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(s, US_DATE_FORMAT))
        .ok()
}

/// Whether `date` falls inside the birth date window for `today`.
pub fn is_within_bounds(date: NaiveDate, today: NaiveDate) -> bool {
    let (earliest, latest) = birth_date_bounds(today);
    earliest <= date && date <= latest
}

/// Render a date in the wire format.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
