//! Core record types for rollbook.
//!
//! This module defines the student record, its identifier, and the fixed
//! department enumeration, along with the JSON shape they persist as.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::validate;

/// A canonical student ID of the form `CU-NNNN-NNNN`.
///
/// Values can only be built through [`StudentId::parse`], so every instance
/// is already normalized (uppercase prefix, digit groups verbatim).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StudentId(String);

impl StudentId {
    /// Validate and normalize a raw ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] if `raw` is not `CU-NNNN-NNNN`
    /// (prefix case-insensitive).
    pub fn parse(raw: &str) -> Result<Self> {
        validate::normalize_id(raw)
            .map(Self)
            .ok_or_else(|| Error::invalid_format(Field::Id, raw))
    }

    /// The canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StudentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for StudentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for StudentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// The fixed, ordered set of departments a student can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Department {
    /// Computer Science.
    #[serde(rename = "Computer Science")]
    ComputerScience,
    /// Mathematics.
    Mathematics,
    /// Physics.
    Physics,
    /// Chemistry.
    Chemistry,
    /// Biology.
    Biology,
    /// Economics.
    Economics,
    /// History.
    History,
}

impl Department {
    /// All departments in menu order. Choice `n` maps to `ALL[n - 1]`.
    pub const ALL: [Department; 7] = [
        Self::ComputerScience,
        Self::Mathematics,
        Self::Physics,
        Self::Chemistry,
        Self::Biology,
        Self::Economics,
        Self::History,
    ];

    /// Human-readable name, identical to the persisted form.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ComputerScience => "Computer Science",
            Self::Mathematics => "Mathematics",
            Self::Physics => "Physics",
            Self::Chemistry => "Chemistry",
            Self::Biology => "Biology",
            Self::Economics => "Economics",
            Self::History => "History",
        }
    }

    /// Look up a department by its 1-based menu choice.
    #[must_use]
    pub fn from_choice(choice: usize) -> Option<Self> {
        choice
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index).copied())
    }

    /// Look up a department by name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|dept| dept.name().eq_ignore_ascii_case(name.trim()))
    }

    /// The 1-based menu choice for this department.
    #[must_use]
    pub fn choice(self) -> usize {
        Self::ALL
            .iter()
            .position(|dept| *dept == self)
            .map_or(0, |index| index + 1)
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One student's record. The ID is the roster key, not part of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Full name: letters and spaces.
    #[serde(rename = "Name")]
    pub name: String,

    /// Age in years. Operator input is held to 5..=100.
    #[serde(rename = "Age", deserialize_with = "deserialize_age")]
    pub age: u8,

    /// Department the student is enrolled in.
    #[serde(rename = "Department")]
    pub department: Department,
}

impl Student {
    /// Build a record from already-validated parts.
    #[must_use]
    pub fn new(name: impl Into<String>, age: u8, department: Department) -> Self {
        Self {
            name: name.into(),
            age,
            department,
        }
    }

    /// Build a record from raw operator input, validating every field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] for the first field that fails.
    pub fn from_input(name: &str, age: &str, department: &str) -> Result<Self> {
        Ok(Self {
            name: validate::parse_name(name)?,
            age: validate::parse_age(age)?,
            department: validate::parse_department(department)?,
        })
    }
}

/// Stores written by older front ends kept `Age` as an unchecked digit
/// string. Loading accepts any value that fits a `u8`; the 5..=100 range is
/// enforced only when an operator enters an age.
fn deserialize_age<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u8, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AgeRepr {
        Number(u64),
        Text(String),
    }

    match AgeRepr::deserialize(deserializer)? {
        AgeRepr::Number(n) => u8::try_from(n)
            .map_err(|_| serde::de::Error::custom(format!("age {n} out of range"))),
        AgeRepr::Text(s) => s
            .trim()
            .parse::<u8>()
            .map_err(|_| serde::de::Error::custom(format!("age {s:?} is not a number"))),
    }
}

/// A record field that can be targeted by an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The student ID (roster key).
    Id,
    /// The student's name.
    Name,
    /// The student's age.
    Age,
    /// The student's department.
    Department,
}

impl Field {
    /// Short operator-facing guidance on what the field accepts.
    #[must_use]
    pub fn format_hint(self) -> &'static str {
        match self {
            Self::Id => "Must be like CU-0001-2026 (CU or cu accepted)",
            Self::Name => "Only letters and spaces are allowed",
            Self::Age => "Enter digits only, between 5 and 100",
            Self::Department => "Enter a number from 1 to 7 or a department name",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id => write!(f, "student ID"),
            Self::Name => write!(f, "name"),
            Self::Age => write!(f, "age"),
            Self::Department => write!(f, "department"),
        }
    }
}
