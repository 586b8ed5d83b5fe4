//! # Person Records
//!
//! Three shapes of the same data:
//!
//! - [`PersonInput`]: the raw strings a form holds while the user types.
//! - [`PersonDraft`]: a fully validated person with no identity yet.
//! - [`PersonRecord`]: a draft that the store has given an identifier.
//!
//! `PersonRecord` serializes with the camelCase keys of the persisted
//! snapshot (`firstName`, `mobilePhoneNumber.callingCode`, ...).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::identity::{CitizenId, MobilePhoneNumber, PassportNumber, RecordId, Salary};
use crate::locale::{CallingCode, Gender, Nationality, Title};
use crate::temporal::format_date;

// ─── Raw input ───────────────────────────────────────────────────────

/// Unvalidated form input. Every field is the text the user entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonInput {
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub nationality: String,
    pub citizen_id: CitizenId,
    pub gender: String,
    pub calling_code: String,
    pub phone_number: String,
    pub passport_number: String,
    pub salary: String,
}

impl Default for PersonInput {
    /// A blank form: title `Mr.`, calling code `+66`, everything else empty.
    fn default() -> Self {
        Self {
            title: Title::default().as_str().to_string(),
            first_name: String::new(),
            last_name: String::new(),
            birth_date: String::new(),
            nationality: String::new(),
            citizen_id: CitizenId::default(),
            gender: String::new(),
            calling_code: CallingCode::default().as_str().to_string(),
            phone_number: String::new(),
            passport_number: String::new(),
            salary: String::new(),
        }
    }
}

// ─── Validated draft ─────────────────────────────────────────────────

/// A validated person awaiting an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonDraft {
    pub title: Title,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub nationality: Option<Nationality>,
    pub citizen_id: CitizenId,
    pub gender: Gender,
    pub mobile_phone_number: MobilePhoneNumber,
    pub passport_number: Option<PassportNumber>,
    pub salary: Salary,
}

impl PersonDraft {
    /// Attach an identifier. New and edited records start unselected.
    pub fn into_record(self, id: RecordId) -> PersonRecord {
        PersonRecord {
            id,
            selected: false,
            title: self.title,
            first_name: self.first_name,
            last_name: self.last_name,
            birth_date: self.birth_date,
            nationality: self.nationality,
            citizen_id: self.citizen_id,
            gender: self.gender,
            mobile_phone_number: self.mobile_phone_number,
            passport_number: self.passport_number,
            salary: self.salary,
        }
    }
}

// ─── Stored record ───────────────────────────────────────────────────

/// One person's stored information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    pub id: RecordId,
    /// Row checkbox state. Not part of the person's data.
    pub selected: bool,
    pub title: Title,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub nationality: Option<Nationality>,
    pub citizen_id: CitizenId,
    pub gender: Gender,
    pub mobile_phone_number: MobilePhoneNumber,
    pub passport_number: Option<PassportNumber>,
    pub salary: Salary,
}

impl PersonRecord {
    /// `"{first} {last}"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The form input that reproduces this record.
    pub fn to_input(&self) -> PersonInput {
        PersonInput {
            title: self.title.as_str().to_string(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            birth_date: format_date(self.birth_date),
            nationality: self
                .nationality
                .map(|n| n.as_str().to_string())
                .unwrap_or_default(),
            citizen_id: self.citizen_id.clone(),
            gender: self.gender.as_str().to_string(),
            calling_code: self.mobile_phone_number.calling_code.as_str().to_string(),
            phone_number: self.mobile_phone_number.phone_number.clone(),
            passport_number: self
                .passport_number
                .as_ref()
                .map(|p| p.as_str().to_string())
                .unwrap_or_default(),
            salary: self.salary.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_draft() -> PersonDraft {
        PersonDraft {
            title: Title::Miss,
            first_name: "Somchai".to_string(),
            last_name: "Jaidee".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 1).unwrap(),
            nationality: Some(Nationality::Thai),
            citizen_id: CitizenId::from_parts(["1", "2345", "67890", "12", "3"]),
            gender: Gender::Female,
            mobile_phone_number: MobilePhoneNumber::new(CallingCode::Thailand, "0812345678")
                .unwrap(),
            passport_number: Some(PassportNumber::new("AA1234567").unwrap()),
            salary: Salary::new("30000").unwrap(),
        }
    }

    #[test]
    fn default_input_has_form_defaults() {
        let input = PersonInput::default();
        assert_eq!(input.title, "Mr.");
        assert_eq!(input.calling_code, "+66");
        assert!(input.first_name.is_empty());
        assert!(input.citizen_id.is_blank());
    }

    #[test]
    fn draft_into_record_is_unselected() {
        let record = sample_draft().into_record(RecordId::new(4));
        assert_eq!(record.id, RecordId::new(4));
        assert!(!record.selected);
        assert_eq!(record.full_name(), "Somchai Jaidee");
    }

    #[test]
    fn to_input_reproduces_fields() {
        let record = sample_draft().into_record(RecordId::FIRST);
        let input = record.to_input();
        assert_eq!(input.title, "Miss");
        assert_eq!(input.birth_date, "1990-05-01");
        assert_eq!(input.nationality, "Thai");
        assert_eq!(input.gender, "Female");
        assert_eq!(input.calling_code, "+66");
        assert_eq!(input.phone_number, "0812345678");
        assert_eq!(input.passport_number, "AA1234567");
        assert_eq!(input.salary, "30000");
        assert_eq!(input.citizen_id, record.citizen_id);
    }

    #[test]
    fn record_uses_snapshot_key_names() {
        let record = sample_draft().into_record(RecordId::FIRST);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["firstName"], "Somchai");
        assert_eq!(json["birthDate"], "1990-05-01");
        assert_eq!(json["mobilePhoneNumber"]["callingCode"], "+66");
        assert_eq!(json["citizenId"]["part3"], "67890");
        assert_eq!(json["passportNumber"], "AA1234567");
        assert_eq!(json["salary"], "30000");
    }

    #[test]
    fn optional_fields_serialize_as_null() {
        let mut draft = sample_draft();
        draft.nationality = None;
        draft.passport_number = None;
        let json = serde_json::to_value(draft.into_record(RecordId::FIRST)).unwrap();
        assert!(json["nationality"].is_null());
        assert!(json["passportNumber"].is_null());
    }
}
