//! # Error Types — Field Validation Failures
//!
//! Every rule in [`crate::validation`] fails with a [`ValidationError`].
//! The `Display` text of each variant is the feedback message shown next to
//! the offending form field, so the wording is user-facing.

use thiserror::Error;

/// A form field, used to route feedback to the right input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Salutation.
    Title,
    /// Given name.
    FirstName,
    /// Family name.
    LastName,
    /// Date of birth.
    BirthDate,
    /// Optional nationality.
    Nationality,
    /// One of the five citizen ID parts (1-based).
    CitizenIdPart(u8),
    /// Gender radio group.
    Gender,
    /// Phone calling code selector.
    CallingCode,
    /// Ten-digit mobile number.
    PhoneNumber,
    /// Optional passport number.
    PassportNumber,
    /// Expected salary.
    Salary,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Title => f.write_str("title"),
            Self::FirstName => f.write_str("firstName"),
            Self::LastName => f.write_str("lastName"),
            Self::BirthDate => f.write_str("birthDate"),
            Self::Nationality => f.write_str("nationality"),
            Self::CitizenIdPart(n) => write!(f, "citizenId.part{n}"),
            Self::Gender => f.write_str("gender"),
            Self::CallingCode => f.write_str("mobilePhoneNumber.callingCode"),
            Self::PhoneNumber => f.write_str("mobilePhoneNumber.phoneNumber"),
            Self::PassportNumber => f.write_str("passportNumber"),
            Self::Salary => f.write_str("salary"),
        }
    }
}

/// A single field that failed its validation rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title missing or not one of the known salutations.
    #[error("Title is required.")]
    Title,

    /// First name empty or not purely alphabetic.
    #[error("First name is required with only letters.")]
    FirstName,

    /// Last name empty or not purely alphabetic.
    #[error("Last name is required with only letters.")]
    LastName,

    /// Birth date missing, unparseable, or outside the last 100 years.
    #[error("Birthday must be within the last 100 years and not after today.")]
    BirthDate,

    /// Nationality is set to something outside the country table.
    #[error("Nationality {0:?} is not one of the supported countries.")]
    Nationality(String),

    /// A citizen ID part does not have its fixed digit count.
    #[error("Citizen ID part {part} must be exactly {digits} digit(s).")]
    CitizenIdPart {
        /// 1-based part index.
        part: u8,
        /// Required digit count for this part.
        digits: usize,
    },

    /// Gender is set to something other than the three options.
    #[error("Gender {0:?} is not a recognised option.")]
    Gender(String),

    /// Calling code missing or unknown.
    #[error("Phone calling code is required.")]
    CallingCode,

    /// Mobile number is not exactly ten digits.
    #[error("Mobile phone number is required with 10 digits.")]
    PhoneNumber,

    /// Passport number present but not nine uppercase letters or digits.
    #[error("Passport number must be 9 characters (uppercase letters or digits).")]
    PassportNumber,

    /// Salary missing, not a number, or negative.
    #[error("Expected salary is required with a zero or positive number.")]
    Salary,
}

impl ValidationError {
    /// The form field this error belongs to.
    pub fn field(&self) -> Field {
        match self {
            Self::Title => Field::Title,
            Self::FirstName => Field::FirstName,
            Self::LastName => Field::LastName,
            Self::BirthDate => Field::BirthDate,
            Self::Nationality(_) => Field::Nationality,
            Self::CitizenIdPart { part, .. } => Field::CitizenIdPart(*part),
            Self::Gender(_) => Field::Gender,
            Self::CallingCode => Field::CallingCode,
            Self::PhoneNumber => Field::PhoneNumber,
            Self::PassportNumber => Field::PassportNumber,
            Self::Salary => Field::Salary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_form_feedback() {
        assert_eq!(
            ValidationError::FirstName.to_string(),
            "First name is required with only letters."
        );
        assert_eq!(
            ValidationError::PhoneNumber.to_string(),
            "Mobile phone number is required with 10 digits."
        );
        assert_eq!(
            ValidationError::CitizenIdPart { part: 3, digits: 5 }.to_string(),
            "Citizen ID part 3 must be exactly 5 digit(s)."
        );
    }

    #[test]
    fn error_routes_to_field() {
        assert_eq!(ValidationError::Salary.field(), Field::Salary);
        assert_eq!(
            ValidationError::CitizenIdPart { part: 2, digits: 4 }.field(),
            Field::CitizenIdPart(2)
        );
        assert_eq!(Field::CitizenIdPart(2).to_string(), "citizenId.part2");
    }
}
