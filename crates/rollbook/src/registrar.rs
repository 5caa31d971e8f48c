//! Record operations over persistent storage.
//!
//! Every call loads the roster fresh, applies one change, and writes the
//! whole roster back. Nothing is cached between calls. A failed operation
//! never saves.

use tracing::debug;

use crate::error::Result;
use crate::roster::Roster;
use crate::storage::RosterStore;
use crate::student::{Field, Student, StudentId};

/// CRUD service shared by every front end.
#[derive(Debug)]
pub struct Registrar<S> {
    store: S,
}

impl<S: RosterStore> Registrar<S> {
    /// Create a registrar over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Add a new student.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DuplicateId`] if the ID is taken, or a storage
    /// error if the roster cannot be saved.
    pub fn add(&self, id: StudentId, student: Student) -> Result<()> {
        let mut roster = self.store.load();
        debug!(id = %id, "Adding student");
        roster.add(id, student)?;
        self.store.save(&roster)
    }

    /// Fetch one student.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if the ID is absent.
    pub fn get(&self, id: &StudentId) -> Result<Student> {
        self.store.load().get(id).cloned()
    }

    /// Fetch one student by raw, unvalidated ID input.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidFormat`] for a malformed ID, otherwise
    /// as [`Registrar::get`].
    pub fn search(&self, raw_id: &str) -> Result<(StudentId, Student)> {
        let id = StudentId::parse(raw_id)?;
        let student = self.get(&id)?;
        Ok((id, student))
    }

    /// Change one field of a student, renaming it if `field` is [`Field::Id`].
    ///
    /// Returns the student's ID after the update.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`], [`crate::Error::InvalidFormat`], or
    /// [`crate::Error::DuplicateId`] without saving anything.
    pub fn update(&self, id: &StudentId, field: Field, value: &str) -> Result<StudentId> {
        let mut roster = self.store.load();
        let updated = roster.update(id, field, value)?;
        debug!(id = %id, field = %field, now = %updated, "Updated student");
        self.store.save(&roster)?;
        Ok(updated)
    }

    /// Delete a student, returning the removed record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if the ID is absent.
    pub fn delete(&self, id: &StudentId) -> Result<Student> {
        let mut roster = self.store.load();
        let removed = roster.remove(id)?;
        debug!(id = %id, "Deleted student");
        self.store.save(&roster)?;
        Ok(removed)
    }

    /// All students, in ID order.
    pub fn list(&self) -> Vec<(StudentId, Student)> {
        self.store.load().into_iter().collect()
    }

    /// A snapshot of the whole roster.
    pub fn roster(&self) -> Roster {
        self.store.load()
    }
}
