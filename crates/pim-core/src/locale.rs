//! # Locale Tables
//!
//! The fixed enumerations a person record draws from: salutations, the
//! three supported countries (nationality, flag, calling code), and gender.
//!
//! The wire names (`"Mr."`, `"+66"`, `"Thai"`, `""` for unset gender) are
//! the strings stored in the persisted snapshot and collected by the form.

use serde::{Deserialize, Serialize};

// ─── Title ───────────────────────────────────────────────────────────

/// Salutation shown before a person's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Title {
    #[default]
    #[serde(rename = "Mr.")]
    Mr,
    #[serde(rename = "Miss")]
    Miss,
    #[serde(rename = "Mrs.")]
    Mrs,
}

impl Title {
    /// All titles in selector order.
    pub const ALL: [Title; 3] = [Title::Mr, Title::Miss, Title::Mrs];

    /// The wire and display form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mr => "Mr.",
            Self::Miss => "Miss",
            Self::Mrs => "Mrs.",
        }
    }

    /// Look up a title by its wire form.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl std::fmt::Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Nationality / Calling code ──────────────────────────────────────

/// Nationality of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nationality {
    Thai,
    American,
    British,
}

impl Nationality {
    /// The wire and display form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thai => "Thai",
            Self::American => "American",
            Self::British => "British",
        }
    }

    /// Look up a nationality by name.
    pub fn parse(s: &str) -> Option<Self> {
        COUNTRIES
            .iter()
            .map(|c| c.nationality)
            .find(|n| n.as_str() == s)
    }
}

impl std::fmt::Display for Nationality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// International dialling prefix for a mobile number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CallingCode {
    #[default]
    #[serde(rename = "+66")]
    Thailand,
    #[serde(rename = "+1")]
    UnitedStates,
    #[serde(rename = "+44")]
    UnitedKingdom,
}

impl CallingCode {
    /// The wire and display form, including the leading `+`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thailand => "+66",
            Self::UnitedStates => "+1",
            Self::UnitedKingdom => "+44",
        }
    }

    /// Look up a calling code by its `+NN` form.
    pub fn parse(s: &str) -> Option<Self> {
        COUNTRIES
            .iter()
            .map(|c| c.calling_code)
            .find(|code| code.as_str() == s)
    }
}

impl std::fmt::Display for CallingCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the supported-country table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    /// Demonym used as the nationality value.
    pub nationality: Nationality,
    /// Flag emoji shown beside the calling code.
    pub flag: &'static str,
    /// Dialling prefix.
    pub calling_code: CallingCode,
}

impl Country {
    /// Selector label for the calling code, e.g. `🇹🇭+66`.
    pub fn calling_code_label(&self) -> String {
        format!("{}{}", self.flag, self.calling_code)
    }
}

/// The supported countries, in selector order.
pub const COUNTRIES: [Country; 3] = [
    Country {
        nationality: Nationality::Thai,
        flag: "\u{1F1F9}\u{1F1ED}",
        calling_code: CallingCode::Thailand,
    },
    Country {
        nationality: Nationality::American,
        flag: "\u{1F1FA}\u{1F1F8}",
        calling_code: CallingCode::UnitedStates,
    },
    Country {
        nationality: Nationality::British,
        flag: "\u{1F1EC}\u{1F1E7}",
        calling_code: CallingCode::UnitedKingdom,
    },
];

// ─── Gender ──────────────────────────────────────────────────────────

/// Gender selection. `Unset` is stored as the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Unisex,
    #[default]
    #[serde(rename = "")]
    Unset,
}

impl Gender {
    /// The wire form (`""` when unset).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Unisex => "Unisex",
            Self::Unset => "",
        }
    }

    /// Look up a gender by its wire form.
    pub fn parse(s: &str) -> Option<Self> {
        [Self::Male, Self::Female, Self::Unisex, Self::Unset]
            .into_iter()
            .find(|g| g.as_str() == s)
    }

    /// Whether a gender was chosen.
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
