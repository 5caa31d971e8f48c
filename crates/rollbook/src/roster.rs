//! In-memory record store.
//!
//! A [`Roster`] maps canonical student IDs to records. It owns the CRUD
//! rules (duplicate detection, rename, per-field validation) but knows
//! nothing about persistence; see [`crate::registrar`] for the load/save
//! boundary.

use std::collections::btree_map::{self, BTreeMap};

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::student::{Department, Field, Student, StudentId};
use crate::validate;

/// The full set of student records, keyed by canonical ID.
///
/// Iteration is in ascending ID order. Entries from the persisted document
/// that could not be read as records are held verbatim and written back on
/// save; their IDs stay taken but they are not listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    records: BTreeMap<StudentId, Student>,
    unreadable: BTreeMap<String, Value>,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True if `id` is taken, by a record or by an unreadable entry.
    #[must_use]
    pub fn contains(&self, id: &StudentId) -> bool {
        self.records.contains_key(id) || self.unreadable.contains_key(id.as_str())
    }

    /// Keep a persisted entry that could not be read as a record.
    ///
    /// `key` is written back exactly as given.
    pub fn keep_unreadable(&mut self, key: impl Into<String>, value: Value) {
        self.unreadable.insert(key.into(), value);
    }

    /// Number of entries held verbatim because they could not be read.
    #[must_use]
    pub fn unreadable_len(&self) -> usize {
        self.unreadable.len()
    }

    /// Insert a new record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateId`] if `id` is already present; the existing
    /// record is left untouched.
    pub fn add(&mut self, id: StudentId, student: Student) -> Result<()> {
        if self.unreadable.contains_key(id.as_str()) {
            return Err(Error::DuplicateId(id));
        }
        match self.records.entry(id) {
            btree_map::Entry::Occupied(entry) => Err(Error::DuplicateId(entry.key().clone())),
            btree_map::Entry::Vacant(entry) => {
                entry.insert(student);
                Ok(())
            }
        }
    }

    /// Look up a record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `id` is absent.
    pub fn get(&self, id: &StudentId) -> Result<&Student> {
        self.records
            .get(id)
            .ok_or_else(|| Error::NotFound(id.clone()))
    }

    /// Change one field of an existing record.
    ///
    /// `value` is raw operator input and is validated for `field` before
    /// anything is touched. Updating [`Field::Id`] moves the record to the
    /// new key; the old key no longer resolves afterwards.
    ///
    /// Returns the record's ID after the update (the new ID on rename).
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if `id` is absent.
    /// - [`Error::InvalidFormat`] if `value` fails the field's validator.
    /// - [`Error::DuplicateId`] if renaming onto an existing ID.
    ///
    /// On error the roster is unchanged.
    pub fn update(&mut self, id: &StudentId, field: Field, value: &str) -> Result<StudentId> {
        if !self.records.contains_key(id) {
            return Err(Error::NotFound(id.clone()));
        }

        match field {
            Field::Id => {
                let new_id = StudentId::parse(value)?;
                if new_id == *id {
                    return Ok(new_id);
                }
                if self.contains(&new_id) {
                    return Err(Error::DuplicateId(new_id));
                }
                let record = self.remove(id)?;
                self.records.insert(new_id.clone(), record);
                Ok(new_id)
            }
            Field::Name => {
                let name = validate::parse_name(value)?;
                self.record_mut(id)?.name = name;
                Ok(id.clone())
            }
            Field::Age => {
                let age = validate::parse_age(value)?;
                self.record_mut(id)?.age = age;
                Ok(id.clone())
            }
            Field::Department => {
                let department = validate::parse_department(value)?;
                self.record_mut(id)?.department = department;
                Ok(id.clone())
            }
        }
    }

    /// Remove a record, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `id` is absent.
    pub fn remove(&mut self, id: &StudentId) -> Result<Student> {
        self.records
            .remove(id)
            .ok_or_else(|| Error::NotFound(id.clone()))
    }

    /// Iterate over all records in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (&StudentId, &Student)> {
        self.records.iter()
    }

    /// Number of students in each department, in menu order.
    #[must_use]
    pub fn department_counts(&self) -> Vec<(Department, usize)> {
        Department::ALL
            .iter()
            .map(|dept| {
                let count = self
                    .records
                    .values()
                    .filter(|student| student.department == *dept)
                    .count();
                (*dept, count)
            })
            .collect()
    }

    fn record_mut(&mut self, id: &StudentId) -> Result<&mut Student> {
        self.records
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(id.clone()))
    }
}

impl FromIterator<(StudentId, Student)> for Roster {
    fn from_iter<I: IntoIterator<Item = (StudentId, Student)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
            unreadable: BTreeMap::new(),
        }
    }
}

/// Readable records and verbatim entries, interleaved in key order.
impl Serialize for Roster {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(serde::Serialize)]
        #[serde(untagged)]
        enum Entry<'a> {
            Record(&'a Student),
            Verbatim(&'a Value),
        }

        let mut entries: BTreeMap<&str, Entry<'_>> = self
            .unreadable
            .iter()
            .map(|(key, value)| (key.as_str(), Entry::Verbatim(value)))
            .collect();
        entries.extend(
            self.records
                .iter()
                .map(|(id, student)| (id.as_str(), Entry::Record(student))),
        );

        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, entry) in &entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

impl IntoIterator for Roster {
    type Item = (StudentId, Student);
    type IntoIter = btree_map::IntoIter<StudentId, Student>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> StudentId {
        StudentId::parse(raw).unwrap()
    }

    fn ada() -> Student {
        Student::new("Ada Lovelace", 34, Department::ComputerScience)
    }

    fn roster_with_ada() -> Roster {
        let mut roster = Roster::new();
        roster.add(id("CU-0001-2026"), ada()).unwrap();
        roster
    }

    #[test]
    fn test_add_then_get() {
        let roster = roster_with_ada();
        assert_eq!(roster.get(&id("cu-0001-2026")).unwrap(), &ada());
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_add_duplicate_keeps_original() {
        let mut roster = roster_with_ada();
        let other = Student::new("Someone Else", 20, Department::History);

        let err = roster.add(id("cu-0001-2026"), other).unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(roster.get(&id("CU-0001-2026")).unwrap(), &ada());
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_get_missing() {
        let roster = Roster::new();
        assert!(roster.get(&id("CU-0001-2026")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_remove_then_get() {
        let mut roster = roster_with_ada();
        let removed = roster.remove(&id("CU-0001-2026")).unwrap();
        assert_eq!(removed, ada());
        assert!(roster.get(&id("CU-0001-2026")).unwrap_err().is_not_found());
        assert!(roster.is_empty());
    }

    #[test]
    fn test_remove_missing() {
        let mut roster = Roster::new();
        assert!(roster.remove(&id("CU-0001-2026")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_name_age_department() {
        let mut roster = roster_with_ada();
        let key = id("CU-0001-2026");

        roster.update(&key, Field::Name, "Augusta Ada King").unwrap();
        roster.update(&key, Field::Age, "36").unwrap();
        roster.update(&key, Field::Department, "2").unwrap();

        let record = roster.get(&key).unwrap();
        assert_eq!(record.name, "Augusta Ada King");
        assert_eq!(record.age, 36);
        assert_eq!(record.department, Department::Mathematics);
    }

    #[test]
    fn test_update_invalid_value_is_rejected_without_change() {
        let mut roster = roster_with_ada();
        let key = id("CU-0001-2026");
        let before = roster.clone();

        assert!(roster.update(&key, Field::Name, "Ada 2").unwrap_err().is_invalid_format());
        assert!(roster.update(&key, Field::Age, "150").unwrap_err().is_invalid_format());
        assert!(roster.update(&key, Field::Department, "9").unwrap_err().is_invalid_format());
        assert!(roster.update(&key, Field::Id, "CU-1-2").unwrap_err().is_invalid_format());
        assert_eq!(roster, before);
    }

    #[test]
    fn test_update_missing_record() {
        let mut roster = Roster::new();
        let err = roster
            .update(&id("CU-0001-2026"), Field::Name, "Ada")
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_rename_moves_record() {
        let mut roster = roster_with_ada();
        let old = id("CU-0001-2026");

        let new = roster.update(&old, Field::Id, "cu-0042-2026").unwrap();
        assert_eq!(new.as_str(), "CU-0042-2026");
        assert!(roster.get(&old).unwrap_err().is_not_found());
        assert_eq!(roster.get(&new).unwrap(), &ada());
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_rename_onto_existing_is_duplicate() {
        let mut roster = roster_with_ada();
        let bob = Student::new("Bob", 19, Department::Physics);
        roster.add(id("CU-0002-2026"), bob).unwrap();
        let before = roster.clone();

        let err = roster
            .update(&id("CU-0001-2026"), Field::Id, "CU-0002-2026")
            .unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(roster, before);
    }

    #[test]
    fn test_rename_to_same_id_is_noop() {
        let mut roster = roster_with_ada();
        let key = id("CU-0001-2026");
        let result = roster.update(&key, Field::Id, "cu-0001-2026").unwrap();
        assert_eq!(result, key);
        assert_eq!(roster, roster_with_ada());
    }

    #[test]
    fn test_iteration_is_id_ordered() {
        let roster: Roster = [
            (id("CU-0003-2026"), ada()),
            (id("CU-0001-2026"), ada()),
            (id("CU-0002-2025"), ada()),
        ]
        .into_iter()
        .collect();

        let keys: Vec<&str> = roster.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, ["CU-0001-2026", "CU-0002-2025", "CU-0003-2026"]);
    }

    #[test]
    fn test_department_counts() {
        let mut roster = roster_with_ada();
        roster
            .add(id("CU-0002-2026"), Student::new("Bob", 19, Department::Physics))
            .unwrap();
        roster
            .add(id("CU-0003-2026"), Student::new("Cy", 22, Department::Physics))
            .unwrap();

        let counts = roster.department_counts();
        assert_eq!(counts.len(), 7);
        assert_eq!(counts[0], (Department::ComputerScience, 1));
        assert_eq!(counts[2], (Department::Physics, 2));
        assert_eq!(counts[6], (Department::History, 0));
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let json = serde_json::to_value(roster_with_ada()).unwrap();
        assert_eq!(json["CU-0001-2026"]["Name"], "Ada Lovelace");
        assert_eq!(json["CU-0001-2026"]["Age"], 34);
    }

    #[test]
    fn test_unreadable_entry_keeps_its_id_taken() {
        let mut roster = roster_with_ada();
        roster.keep_unreadable("CU-0002-2026", serde_json::json!({"Name": "Bob"}));

        let err = roster.add(id("cu-0002-2026"), ada()).unwrap_err();
        assert!(err.is_duplicate());

        let err = roster
            .update(&id("CU-0001-2026"), Field::Id, "CU-0002-2026")
            .unwrap_err();
        assert!(err.is_duplicate());
        assert!(roster.contains(&id("CU-0002-2026")));
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.unreadable_len(), 1);
    }

    #[test]
    fn test_serialize_interleaves_unreadable_entries() {
        let mut roster = roster_with_ada();
        roster.add(id("CU-0003-2026"), ada()).unwrap();
        roster.keep_unreadable("CU-0002-2026", serde_json::json!({"Age": "old"}));

        let json = serde_json::to_string(&roster).unwrap();
        let first = json.find("CU-0001-2026").unwrap();
        let second = json.find("CU-0002-2026").unwrap();
        let third = json.find("CU-0003-2026").unwrap();
        assert!(first < second && second < third);
        assert!(json.contains(r#""CU-0002-2026":{"Age":"old"}"#));
    }
}
