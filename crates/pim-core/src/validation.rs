//! # Field Validation Rules
//!
//! One rule per form field. Each rule is a pure function of the raw input
//! (plus `today` for the birth date) and returns either the typed value or
//! the [`ValidationError`] whose message is shown beside the field.
//!
//! [`validate_input`] runs every rule, always to completion, and reports the
//! per-field validity flags alongside the combined result. A form is valid
//! only when every rule passes.
//!
//! ## Optional fields
//!
//! - Nationality and passport number: empty means "not provided".
//! - Citizen ID: all five parts empty means "not provided". As soon as any
//!   part is filled in, every part must match its digit count.
//! - Gender: empty means unset.

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::identity::{is_digits, CitizenId, MobilePhoneNumber, PassportNumber, Salary};
use crate::locale::{CallingCode, Gender, Nationality, Title};
use crate::record::{PersonDraft, PersonInput};
use crate::temporal::{is_within_bounds, parse_birth_date};

// ─── Per-field rules ─────────────────────────────────────────────────

/// Title must be one of the known salutations.
pub fn check_title(input: &str) -> Result<Title, ValidationError> {
    Title::parse(input).ok_or(ValidationError::Title)
}

/// First name: non-empty ASCII letters only.
pub fn check_first_name(input: &str) -> Result<String, ValidationError> {
    if is_alpha_word(input) {
        Ok(input.to_string())
    } else {
        Err(ValidationError::FirstName)
    }
}

/// Last name: non-empty ASCII letters only.
pub fn check_last_name(input: &str) -> Result<String, ValidationError> {
    if is_alpha_word(input) {
        Ok(input.to_string())
    } else {
        Err(ValidationError::LastName)
    }
}

/// Birth date: parseable and within `[today - 100 years, today]`.
pub fn check_birth_date(input: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    match parse_birth_date(input) {
        Some(date) if is_within_bounds(date, today) => Ok(date),
        _ => Err(ValidationError::BirthDate),
    }
}

/// Nationality: empty, or one of the supported countries.
pub fn check_nationality(input: &str) -> Result<Option<Nationality>, ValidationError> {
    if input.is_empty() {
        return Ok(None);
    }
    Nationality::parse(input)
        .map(Some)
        .ok_or_else(|| ValidationError::Nationality(input.to_string()))
}

/// Gender: empty (unset) or one of the three options.
pub fn check_gender(input: &str) -> Result<Gender, ValidationError> {
    Gender::parse(input).ok_or_else(|| ValidationError::Gender(input.to_string()))
}

/// Calling code: required, and one of the supported prefixes.
pub fn check_calling_code(input: &str) -> Result<CallingCode, ValidationError> {
    CallingCode::parse(input).ok_or(ValidationError::CallingCode)
}

/// Subscriber number: exactly ten ASCII digits.
pub fn check_phone_number(input: &str) -> Result<String, ValidationError> {
    if is_digits(input, MobilePhoneNumber::DIGITS) {
        Ok(input.to_string())
    } else {
        Err(ValidationError::PhoneNumber)
    }
}

/// Passport number: empty, or nine characters from `[A-Z0-9]`.
pub fn check_passport_number(input: &str) -> Result<Option<PassportNumber>, ValidationError> {
    if input.is_empty() {
        return Ok(None);
    }
    PassportNumber::new(input).map(Some)
}

/// Salary: required, numeric, non-negative.
pub fn check_salary(input: &str) -> Result<Salary, ValidationError> {
    Salary::new(input)
}

/// Per-part validity of a citizen ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CitizenIdValidity(pub [bool; 5]);

impl Default for CitizenIdValidity {
    fn default() -> Self {
        Self([true; 5])
    }
}

impl CitizenIdValidity {
    /// Whether every part passed.
    pub fn is_valid(&self) -> bool {
        self.0.iter().all(|ok| *ok)
    }

    /// Whether the 1-based part passed.
    pub fn part(&self, index: u8) -> bool {
        usize::from(index)
            .checked_sub(1)
            .and_then(|i| self.0.get(i))
            .copied()
            .unwrap_or(false)
    }

    /// One error per failing part.
    pub fn errors(&self) -> Vec<ValidationError> {
        self.0
            .iter()
            .zip(CitizenId::PART_DIGITS)
            .enumerate()
            .filter(|(_, (ok, _))| !**ok)
            .map(|(i, (_, digits))| ValidationError::CitizenIdPart {
                part: (i + 1) as u8,
                digits,
            })
            .collect()
    }
}

/// Citizen ID: all blank passes; otherwise each part must match its width.
pub fn check_citizen_id(id: &CitizenId) -> CitizenIdValidity {
    if id.is_blank() {
        return CitizenIdValidity::default();
    }
    let mut flags = [false; 5];
    for (flag, (part, digits)) in flags
        .iter_mut()
        .zip(id.parts().into_iter().zip(CitizenId::PART_DIGITS))
    {
        *flag = is_digits(part, digits);
    }
    CitizenIdValidity(flags)
}

fn is_alpha_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic())
}

// ─── Whole-form validation ───────────────────────────────────────────

/// Validity flag per form field, used to render feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormValidity {
    pub title: bool,
    pub first_name: bool,
    pub last_name: bool,
    pub birth_date: bool,
    pub nationality: bool,
    pub citizen_id: CitizenIdValidity,
    pub gender: bool,
    pub calling_code: bool,
    pub phone_number: bool,
    pub passport_number: bool,
    pub salary: bool,
}

impl Default for FormValidity {
    /// Every flag starts valid so a fresh form shows no feedback.
    fn default() -> Self {
        Self {
            title: true,
            first_name: true,
            last_name: true,
            birth_date: true,
            nationality: true,
            citizen_id: CitizenIdValidity::default(),
            gender: true,
            calling_code: true,
            phone_number: true,
            passport_number: true,
            salary: true,
        }
    }
}

impl FormValidity {
    /// Logical AND of every flag.
    pub fn all_valid(&self) -> bool {
        self.title
            && self.first_name
            && self.last_name
            && self.birth_date
            && self.nationality
            && self.citizen_id.is_valid()
            && self.gender
            && self.calling_code
            && self.phone_number
            && self.passport_number
            && self.salary
    }
}

/// Outcome of running every rule against a form's input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputReport {
    /// Per-field flags, always fully populated.
    pub validity: FormValidity,
    /// The validated draft, or every failure in field order.
    pub result: Result<PersonDraft, Vec<ValidationError>>,
}

impl InputReport {
    /// Whether the input passed every rule.
    pub fn is_valid(&self) -> bool {
        self.result.is_ok()
    }
}

/// Run every field rule against `input` on `today`.
pub fn validate_input(input: &PersonInput, today: NaiveDate) -> InputReport {
    let mut errors = Vec::new();

    let title = check_title(&input.title);
    let first_name = check_first_name(&input.first_name);
    let last_name = check_last_name(&input.last_name);
    let birth_date = check_birth_date(&input.birth_date, today);
    let nationality = check_nationality(&input.nationality);
    let citizen_id = check_citizen_id(&input.citizen_id);
    let gender = check_gender(&input.gender);
    let calling_code = check_calling_code(&input.calling_code);
    let phone_number = check_phone_number(&input.phone_number);
    let passport_number = check_passport_number(&input.passport_number);
    let salary = check_salary(&input.salary);

    let validity = FormValidity {
        title: title.is_ok(),
        first_name: first_name.is_ok(),
        last_name: last_name.is_ok(),
        birth_date: birth_date.is_ok(),
        nationality: nationality.is_ok(),
        citizen_id,
        gender: gender.is_ok(),
        calling_code: calling_code.is_ok(),
        phone_number: phone_number.is_ok(),
        passport_number: passport_number.is_ok(),
        salary: salary.is_ok(),
    };

    let title = collect(title, &mut errors);
    let first_name = collect(first_name, &mut errors);
    let last_name = collect(last_name, &mut errors);
    let birth_date = collect(birth_date, &mut errors);
    let nationality = collect(nationality, &mut errors);
    errors.extend(citizen_id.errors());
    let gender = collect(gender, &mut errors);
    let calling_code = collect(calling_code, &mut errors);
    let phone_number = collect(phone_number, &mut errors);
    let passport_number = collect(passport_number, &mut errors);
    let salary = collect(salary, &mut errors);

    let result = match (
        title,
        first_name,
        last_name,
        birth_date,
        nationality,
        gender,
        calling_code,
        phone_number,
        passport_number,
        salary,
    ) {
        (
            Some(title),
            Some(first_name),
            Some(last_name),
            Some(birth_date),
            Some(nationality),
            Some(gender),
            Some(calling_code),
            Some(phone_number),
            Some(passport_number),
            Some(salary),
        ) if errors.is_empty() => MobilePhoneNumber::new(calling_code, phone_number)
            .map(|mobile_phone_number| PersonDraft {
                title,
                first_name,
                last_name,
                birth_date,
                nationality,
                citizen_id: input.citizen_id.clone(),
                gender,
                mobile_phone_number,
                passport_number,
                salary,
            })
            .map_err(|e| vec![e]),
        _ => Err(errors),
    };

    InputReport { validity, result }
}

fn collect<T>(r: Result<T, ValidationError>, errors: &mut Vec<ValidationError>) -> Option<T> {
    match r {
        Ok(v) => Some(v),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Field;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn valid_input() -> PersonInput {
        PersonInput {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            birth_date: "1990-12-10".to_string(),
            phone_number: "0812345678".to_string(),
            salary: "50000".to_string(),
            ..PersonInput::default()
        }
    }

    // ── Names ────────────────────────────────────────────────────────

    #[test]
    fn names_must_be_letters() {
        assert!(check_first_name("Ada").is_ok());
        assert_eq!(check_first_name(""), Err(ValidationError::FirstName));
        assert_eq!(check_first_name("Ada1"), Err(ValidationError::FirstName));
        assert_eq!(check_first_name("Mary Ann"), Err(ValidationError::FirstName));
        assert_eq!(check_last_name("O'Neil"), Err(ValidationError::LastName));
        assert_eq!(check_last_name("Müller"), Err(ValidationError::LastName));
    }

    // ── Birth date ───────────────────────────────────────────────────

    #[test]
    fn birth_date_edges() {
        let today = today();
        assert!(check_birth_date("1926-10-19", today).is_ok());
        assert!(check_birth_date("1926-10-18", today).is_err());
        assert!(check_birth_date("2026-10-19", today).is_ok());
        assert!(check_birth_date("2026-10-20", today).is_err());
        assert!(check_birth_date("", today).is_err());
        assert!(check_birth_date("not a date", today).is_err());
    }

    // ── Citizen ID ───────────────────────────────────────────────────

    #[test]
    fn blank_citizen_id_is_valid() {
        assert!(check_citizen_id(&CitizenId::default()).is_valid());
    }

    #[test]
    fn complete_citizen_id_is_valid() {
        let id = CitizenId::from_parts(["1", "2345", "67890", "12", "3"]);
        assert!(check_citizen_id(&id).is_valid());
    }

    #[test]
    fn partial_citizen_id_flags_missing_parts() {
        let id = CitizenId::from_parts(["1", "", "67890", "", ""]);
        let validity = check_citizen_id(&id);
        assert!(!validity.is_valid());
        assert_eq!(validity.0, [true, false, true, false, false]);
        assert!(validity.part(1));
        assert!(!validity.part(2));
        assert!(!validity.part(0));
        let fields: Vec<Field> = validity.errors().iter().map(|e| e.field()).collect();
        assert_eq!(
            fields,
            vec![
                Field::CitizenIdPart(2),
                Field::CitizenIdPart(4),
                Field::CitizenIdPart(5)
            ]
        );
    }

    #[test]
    fn citizen_id_part_with_wrong_width() {
        let id = CitizenId::from_parts(["12", "2345", "67890", "12", "3"]);
        assert_eq!(check_citizen_id(&id).0, [false, true, true, true, true]);
    }

    // ── Phone / passport / salary ────────────────────────────────────

    #[test]
    fn phone_number_width() {
        assert!(check_phone_number("0123456789").is_ok());
        assert!(check_phone_number("012345678").is_err());
        assert!(check_phone_number("01234567890").is_err());
        assert!(check_phone_number("01234x6789").is_err());
        assert!(check_phone_number("").is_err());
    }

    #[test]
    fn calling_code_required() {
        assert_eq!(check_calling_code(""), Err(ValidationError::CallingCode));
        assert_eq!(check_calling_code("+1"), Ok(CallingCode::UnitedStates));
    }

    #[test]
    fn passport_optional() {
        assert_eq!(check_passport_number(""), Ok(None));
        assert!(check_passport_number("AB1234567").unwrap().is_some());
        assert!(check_passport_number("ab1234567").is_err());
    }

    #[test]
    fn salary_rules() {
        assert!(check_salary("0").is_ok());
        assert!(check_salary("").is_err());
        assert!(check_salary("-5").is_err());
    }

    #[test]
    fn optional_enums() {
        assert_eq!(check_nationality(""), Ok(None));
        assert_eq!(check_nationality("British"), Ok(Some(Nationality::British)));
        assert!(check_nationality("Martian").is_err());
        assert_eq!(check_gender(""), Ok(Gender::Unset));
        assert!(check_gender("Other").is_err());
        assert!(check_title("").is_err());
    }

    // ── Whole form ───────────────────────────────────────────────────

    #[test]
    fn valid_input_produces_draft() {
        let report = validate_input(&valid_input(), today());
        assert!(report.is_valid());
        assert!(report.validity.all_valid());
        let draft = report.result.unwrap();
        assert_eq!(draft.title, Title::Mr);
        assert_eq!(draft.mobile_phone_number.calling_code, CallingCode::Thailand);
        assert_eq!(draft.nationality, None);
        assert_eq!(draft.passport_number, None);
    }

    #[test]
    fn blank_form_reports_every_required_field() {
        let report = validate_input(&PersonInput::default(), today());
        assert!(!report.is_valid());
        let v = report.validity;
        assert!(v.title);
        assert!(!v.first_name);
        assert!(!v.last_name);
        assert!(!v.birth_date);
        assert!(v.citizen_id.is_valid());
        assert!(v.calling_code);
        assert!(!v.phone_number);
        assert!(v.passport_number);
        assert!(!v.salary);
        let fields: Vec<Field> = report
            .result
            .unwrap_err()
            .iter()
            .map(|e| e.field())
            .collect();
        assert_eq!(
            fields,
            vec![
                Field::FirstName,
                Field::LastName,
                Field::BirthDate,
                Field::PhoneNumber,
                Field::Salary
            ]
        );
    }

    #[test]
    fn one_bad_citizen_part_fails_whole_form() {
        let mut input = valid_input();
        input.citizen_id = CitizenId::from_parts(["1", "2345", "6789", "12", "3"]);
        let report = validate_input(&input, today());
        assert!(!report.is_valid());
        assert!(!report.validity.citizen_id.part(3));
        assert_eq!(
            report.result.unwrap_err(),
            vec![ValidationError::CitizenIdPart { part: 3, digits: 5 }]
        );
    }
}
