//! JSON document format for the persisted roster.
//!
//! The document is a single JSON object mapping student IDs to
//! `{"Name", "Age", "Department"}` objects, pretty-printed with four-space
//! indentation.

use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{Error, Result};
use crate::roster::Roster;
use crate::student::{Student, StudentId};

const INDENT: &[u8] = b"    ";

/// Decode a document into a roster.
///
/// Keys in non-canonical case are normalized. Entries that cannot be read as
/// records (malformed key or body, or a key that collides with another after
/// normalization) are kept verbatim in the roster with a warning, so saving
/// never drops them.
///
/// # Errors
///
/// Returns [`Error::CorruptStore`] if the text is not a JSON object.
pub fn decode(text: &str, path: &Path) -> Result<Roster> {
    let entries: Map<String, Value> =
        serde_json::from_str(text).map_err(|source| Error::CorruptStore {
            path: path.to_path_buf(),
            source,
        })?;

    let mut roster = Roster::new();
    for (key, value) in entries {
        let Ok(id) = StudentId::parse(&key) else {
            warn!(key = %key, path = %path.display(), "Keeping entry with malformed student ID as is");
            roster.keep_unreadable(key, value);
            continue;
        };
        let student: Student = match serde_json::from_value(value.clone()) {
            Ok(student) => student,
            Err(err) => {
                warn!(id = %id, error = %err, "Keeping unreadable student record as is");
                roster.keep_unreadable(id.as_str(), value);
                continue;
            }
        };
        if roster.contains(&id) {
            warn!(key = %key, "Keeping record that collides after normalization as is");
            roster.keep_unreadable(key, value);
            continue;
        }
        roster.add(id, student)?;
    }
    Ok(roster)
}

/// Encode a roster as a pretty-printed document.
///
/// # Errors
///
/// Returns [`Error::Json`] if serialization fails.
pub fn encode(roster: &Roster) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    roster.serialize(&mut serializer)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::student::Department;

    fn path() -> &'static Path {
        Path::new("students.json")
    }

    #[test]
    fn test_decode_empty_object() {
        let roster = decode("{}", path()).unwrap();
        assert!(roster.is_empty());
    }

    #[test]
    fn test_decode_rejects_invalid_json() {
        let err = decode("{ not json", path()).unwrap_err();
        assert!(matches!(err, Error::CorruptStore { .. }));
    }

    #[test]
    fn test_decode_rejects_non_object() {
        let err = decode("[1, 2, 3]", path()).unwrap_err();
        assert!(matches!(err, Error::CorruptStore { .. }));
    }

    #[test]
    fn test_decode_rejects_empty_file() {
        assert!(decode("", path()).is_err());
    }

    #[test]
    fn test_decode_normalizes_keys() {
        let text = r#"{"cu-0001-2026": {"Name": "Ada", "Age": 34, "Department": "Physics"}}"#;
        let roster = decode(text, path()).unwrap();
        let id = StudentId::parse("CU-0001-2026").unwrap();
        assert_eq!(roster.get(&id).unwrap().department, Department::Physics);
    }

    #[test]
    fn test_decode_keeps_bad_entries_verbatim() {
        let text = r#"{
            "CU-0001-2026": {"Name": "Ada", "Age": 34, "Department": "Physics"},
            "BAD-KEY": {"Name": "Nobody", "Age": 20, "Department": "History"},
            "CU-0002-2026": {"Name": "Bob", "Age": "old", "Department": "History"},
            "CU-0003-2026": {"Name": "Cy"}
        }"#;
        let roster = decode(text, path()).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.unreadable_len(), 3);

        let written: Value = serde_json::from_slice(&encode(&roster).unwrap()).unwrap();
        assert_eq!(written["BAD-KEY"]["Name"], "Nobody");
        assert_eq!(written["CU-0002-2026"]["Age"], "old");
        assert_eq!(written["CU-0003-2026"], serde_json::json!({"Name": "Cy"}));
    }

    #[test]
    fn test_decode_keeps_colliding_key() {
        let text = r#"{
            "CU-0001-2026": {"Name": "Ada", "Age": 34, "Department": "Physics"},
            "cu-0001-2026": {"Name": "Ada Again", "Age": 35, "Department": "History"}
        }"#;
        let roster = decode(text, path()).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.unreadable_len(), 1);
    }

    #[test]
    fn test_encode_shape_and_indent() {
        let mut roster = Roster::new();
        roster
            .add(
                StudentId::parse("CU-0001-2026").unwrap(),
                Student::new("Ada Lovelace", 34, Department::ComputerScience),
            )
            .unwrap();

        let text = String::from_utf8(encode(&roster).unwrap()).unwrap();
        let expected = r#"{
    "CU-0001-2026": {
        "Name": "Ada Lovelace",
        "Age": 34,
        "Department": "Computer Science"
    }
}"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn test_encode_empty() {
        let text = String::from_utf8(encode(&Roster::new()).unwrap()).unwrap();
        assert_eq!(text, "{}");
    }
}
