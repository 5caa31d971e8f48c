//! Input validators.
//!
//! The `is_valid_*` predicates answer yes/no for raw operator input. The
//! `parse_*` functions apply the same rules and return the typed value, or
//! [`Error::InvalidFormat`] naming the field that failed.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::student::{Department, Field};

/// Youngest accepted age.
pub const MIN_AGE: u8 = 5;

/// Oldest accepted age.
pub const MAX_AGE: u8 = 100;

/// `CU-NNNN-NNNN`, prefix case-insensitive, ASCII digits only.
const STUDENT_ID_PATTERN: &str = r"^(?i:cu)-([0-9]{4})-([0-9]{4})$";

fn student_id_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(STUDENT_ID_PATTERN).expect("student ID pattern is valid"))
}

/// Check whether `s` is a well-formed student ID.
#[must_use]
pub fn is_valid_id(s: &str) -> bool {
    student_id_regex().is_match(s)
}

/// Canonical form of a student ID: uppercase `CU`, digit groups verbatim.
///
/// Returns `None` if `s` is not a well-formed ID. Normalizing an already
/// canonical ID returns it unchanged.
#[must_use]
pub fn normalize_id(s: &str) -> Option<String> {
    let caps = student_id_regex().captures(s)?;
    Some(format!("CU-{}-{}", &caps[1], &caps[2]))
}

/// Check whether `s` is a name: letters and spaces, at least one letter.
#[must_use]
pub fn is_valid_name(s: &str) -> bool {
    let mut letters = s.chars().filter(|c| *c != ' ').peekable();
    letters.peek().is_some() && letters.all(char::is_alphabetic)
}

/// Check whether `s` is an age: ASCII digits only, value in 5..=100.
#[must_use]
pub fn is_valid_age(s: &str) -> bool {
    age_value(s).is_some()
}

fn age_value(s: &str) -> Option<u8> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Over-long digit strings fail to parse and are rejected like any other.
    let value: u32 = s.parse().ok()?;
    u8::try_from(value)
        .ok()
        .filter(|age| (MIN_AGE..=MAX_AGE).contains(age))
}

/// Check whether `choice` is a 1-based index into [`Department::ALL`].
#[must_use]
pub fn is_valid_department(choice: usize) -> bool {
    (1..=Department::ALL.len()).contains(&choice)
}

/// Validate and normalize a student ID string.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] if the ID is malformed.
pub fn parse_id(s: &str) -> Result<String> {
    normalize_id(s).ok_or_else(|| Error::invalid_format(Field::Id, s))
}

/// Validate a name.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] if the name has non-letters or is blank.
pub fn parse_name(s: &str) -> Result<String> {
    if is_valid_name(s) {
        Ok(s.to_string())
    } else {
        Err(Error::invalid_format(Field::Name, s))
    }
}

/// Validate an age.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] if the age is not digits or out of range.
pub fn parse_age(s: &str) -> Result<u8> {
    age_value(s).ok_or_else(|| Error::invalid_format(Field::Age, s))
}

/// Resolve a department from a 1-based menu choice or its name.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] if neither form matches.
pub fn parse_department(s: &str) -> Result<Department> {
    let trimmed = s.trim();
    let by_choice = trimmed
        .parse::<usize>()
        .ok()
        .filter(|choice| is_valid_department(*choice))
        .and_then(Department::from_choice);

    by_choice
        .or_else(|| Department::from_name(trimmed))
        .ok_or_else(|| Error::invalid_format(Field::Department, s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ids() {
        assert!(is_valid_id("CU-0001-2026"));
        assert!(is_valid_id("cu-0001-2026"));
        assert!(is_valid_id("Cu-9999-0000"));
        assert!(is_valid_id("cU-1234-5678"));
    }

    #[test]
    fn test_invalid_ids() {
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("CU-001-2026"));
        assert!(!is_valid_id("CU-00001-2026"));
        assert!(!is_valid_id("CU-0001-202"));
        assert!(!is_valid_id("CU-0001-2026-1"));
        assert!(!is_valid_id("CU_0001_2026"));
        assert!(!is_valid_id("CX-0001-2026"));
        assert!(!is_valid_id("CU-00a1-2026"));
        assert!(!is_valid_id("CU-0001-2026\n"));
        // Non-ASCII digits are not accepted.
        assert!(!is_valid_id("CU-٠٠٠١-2026"));
    }

    #[test]
    fn test_normalize_id() {
        assert_eq!(normalize_id("cu-0001-2026").as_deref(), Some("CU-0001-2026"));
        assert_eq!(normalize_id("CU-0001-2026").as_deref(), Some("CU-0001-2026"));
        assert_eq!(normalize_id("bad"), None);
    }

    #[test]
    fn test_normalize_id_is_idempotent() {
        for raw in ["cu-0001-2026", "Cu-4321-1999", "cU-0000-0000", "CU-1111-2222"] {
            let once = normalize_id(raw).unwrap();
            let twice = normalize_id(&once).unwrap();
            assert_eq!(once, twice);
            assert!(once.starts_with("CU-"));
            assert_eq!(&once[3..], &raw[3..]);
        }
    }

    #[test]
    fn test_names() {
        assert!(is_valid_name("Ada Lovelace"));
        assert!(is_valid_name("Ada"));
        assert!(is_valid_name("José Núñez"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("   "));
        assert!(!is_valid_name("R2D2"));
        assert!(!is_valid_name("O'Brien"));
        assert!(!is_valid_name("Anne-Marie"));
        assert!(!is_valid_name("Tab\tName"));
    }

    #[test]
    fn test_age_boundaries() {
        assert!(is_valid_age("5"));
        assert!(is_valid_age("100"));
        assert!(is_valid_age("34"));
        assert!(is_valid_age("005"));
        assert!(!is_valid_age("4"));
        assert!(!is_valid_age("101"));
        assert!(!is_valid_age("150"));
    }

    #[test]
    fn test_age_rejects_non_digits() {
        assert!(!is_valid_age(""));
        assert!(!is_valid_age("-5"));
        assert!(!is_valid_age("+5"));
        assert!(!is_valid_age("3.5"));
        assert!(!is_valid_age(" 20"));
        assert!(!is_valid_age("twenty"));
        assert!(!is_valid_age("99999999999999999999999"));
    }

    #[test]
    fn test_department_bounds() {
        assert!(!is_valid_department(0));
        assert!(is_valid_department(1));
        assert!(is_valid_department(7));
        assert!(!is_valid_department(8));
    }

    #[test]
    fn test_parse_department() {
        assert_eq!(parse_department("1").unwrap(), Department::ComputerScience);
        assert_eq!(parse_department(" 7 ").unwrap(), Department::History);
        assert_eq!(parse_department("physics").unwrap(), Department::Physics);
        assert!(parse_department("0").unwrap_err().is_invalid_format());
        assert!(parse_department("8").unwrap_err().is_invalid_format());
        assert!(parse_department("").unwrap_err().is_invalid_format());
    }

    #[test]
    fn test_parse_age_value() {
        assert_eq!(parse_age("34").unwrap(), 34);
        let err = parse_age("150").unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { field: Field::Age, .. }));
    }

    #[test]
    fn test_parse_name_keeps_input() {
        assert_eq!(parse_name("Ada Lovelace").unwrap(), "Ada Lovelace");
        assert!(parse_name("Ada1").is_err());
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("cu-0001-2026").unwrap(), "CU-0001-2026");
        assert!(parse_id("nope").unwrap_err().is_invalid_format());
    }
}
