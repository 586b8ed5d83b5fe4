//! # Field Newtypes
//!
//! Newtype wrappers for the constrained fields of a person record.
//!
//! ## Validation
//!
//! [`PassportNumber`] and [`Salary`] validate format at construction time and
//! cannot hold a malformed value. [`CitizenId`] is a bag of five raw
//! strings: the parts exist before they are validated, and the all-empty ID
//! is a valid value. [`RecordId`] is assigned by the store.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::locale::CallingCode;

// ---------------------------------------------------------------------------
// Record identifier
// ---------------------------------------------------------------------------

/// Store-assigned identifier of a person record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// The identifier given to the first record of an empty store.
    pub const FIRST: RecordId = RecordId(1);

    /// Wrap a raw identifier.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw identifier.
    pub fn get(&self) -> u64 {
        self.0
    }

    /// The identifier that follows this one, or `None` past `u64::MAX`.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Citizen ID
// ---------------------------------------------------------------------------

/// Five-part citizen identification number (digit counts 1-4-5-2-1).
///
/// Parts are stored as entered. All five parts empty means "not provided".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CitizenId {
    pub part1: String,
    pub part2: String,
    pub part3: String,
    pub part4: String,
    pub part5: String,
}

impl CitizenId {
    /// Required digit count of each part, in order.
    pub const PART_DIGITS: [usize; 5] = [1, 4, 5, 2, 1];

    /// Build from five parts.
    pub fn from_parts(parts: [&str; 5]) -> Self {
        let [p1, p2, p3, p4, p5] = parts;
        Self {
            part1: p1.to_string(),
            part2: p2.to_string(),
            part3: p3.to_string(),
            part4: p4.to_string(),
            part5: p5.to_string(),
        }
    }

    /// The five parts in order.
    pub fn parts(&self) -> [&str; 5] {
        [
            &self.part1,
            &self.part2,
            &self.part3,
            &self.part4,
            &self.part5,
        ]
    }

    /// Mutable access to a part by 1-based index.
    pub fn part_mut(&mut self, index: u8) -> Option<&mut String> {
        match index {
            1 => Some(&mut self.part1),
            2 => Some(&mut self.part2),
            3 => Some(&mut self.part3),
            4 => Some(&mut self.part4),
            5 => Some(&mut self.part5),
            _ => None,
        }
    }

    /// Whether every part is empty (the ID was not provided).
    pub fn is_blank(&self) -> bool {
        self.parts().iter().all(|p| p.is_empty())
    }

    /// Dash-joined form, e.g. `1-2345-67890-12-3`. Empty when blank.
    pub fn formatted(&self) -> String {
        if self.is_blank() {
            return String::new();
        }
        self.parts().join("-")
    }
}

impl std::fmt::Display for CitizenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.formatted())
    }
}

// ---------------------------------------------------------------------------
// Mobile phone number
// ---------------------------------------------------------------------------

/// Calling code plus a ten-digit subscriber number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobilePhoneNumber {
    pub calling_code: CallingCode,
    pub phone_number: String,
}

impl MobilePhoneNumber {
    /// Required length of the subscriber number.
    pub const DIGITS: usize = 10;

    /// Build a phone number, validating the ten-digit subscriber part.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::PhoneNumber`] unless `phone_number` is
    /// exactly ten ASCII digits.
    pub fn new(
        calling_code: CallingCode,
        phone_number: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let phone_number = phone_number.into();
        if !is_digits(&phone_number, Self::DIGITS) {
            return Err(ValidationError::PhoneNumber);
        }
        Ok(Self {
            calling_code,
            phone_number,
        })
    }
}

impl std::fmt::Display for MobilePhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.calling_code, self.phone_number)
    }
}

// ---------------------------------------------------------------------------
// Passport number
// ---------------------------------------------------------------------------

/// Passport number: exactly nine uppercase ASCII letters or digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PassportNumber(String);

impl PassportNumber {
    /// Required length.
    pub const LEN: usize = 9;

    /// Create a passport number, validating format.
    ///
    /// No case folding: lowercase input is rejected, not uppercased.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::PassportNumber`] if the value is not
    /// exactly nine characters from `[A-Z0-9]`.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.len() != Self::LEN
            || !s
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        {
            return Err(ValidationError::PassportNumber);
        }
        Ok(Self(s))
    }

    /// Access the passport number.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PassportNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Salary
// ---------------------------------------------------------------------------

/// Expected salary: a non-negative decimal number.
///
/// Stored as the trimmed decimal text that was entered; the persisted value
/// matches the input exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Salary(String);

impl Salary {
    /// Create a salary from its decimal text.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Salary`] if the text is empty, not a
    /// finite number, or negative.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let trimmed = raw.trim();
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() && n >= 0.0 => Ok(Self(trimmed.to_string())),
            _ => Err(ValidationError::Salary),
        }
    }

    /// The decimal text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Salary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether `s` is exactly `n` ASCII digits.
pub(crate) fn is_digits(s: &str, n: usize) -> bool {
    s.len() == n && s.bytes().all(|b| b.is_ascii_digit())
}
