//! Storage layer for rollbook.
//!
//! The roster is persisted as one JSON document that is read in full and
//! rewritten in full. There is no locking and no atomic replace: a second
//! process writing the same file wins at whole-document granularity.

pub mod document;

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::roster::Roster;
use crate::student::Department;

/// Something that can load and persist the whole roster.
///
/// Loading never fails: a missing or unreadable store reads as empty.
pub trait RosterStore {
    /// Read the full roster.
    fn load(&self) -> Roster;

    /// Overwrite the persisted roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster cannot be written.
    fn save(&self, roster: &Roster) -> Result<()>;
}

/// File-backed roster storage.
#[derive(Debug, Clone)]
pub struct Storage {
    /// Path to the JSON document.
    path: PathBuf,
}

impl Storage {
    /// Create a storage handle for the document at `path`.
    ///
    /// Nothing is read or created until the first load or save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the document, reporting why it could not be used.
    ///
    /// A missing document is an empty roster, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file exists but cannot be read, or
    /// [`Error::CorruptStore`] if it is not a valid document.
    pub fn try_load(&self) -> Result<Roster> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No student store at {}, starting empty", self.path.display());
                return Ok(Roster::new());
            }
            Err(err) => return Err(err.into()),
        };
        document::decode(&text, &self.path)
    }

    /// Get statistics about the stored roster.
    #[must_use]
    pub fn stats(&self) -> StorageStats {
        let roster = self.load();
        let file_size_bytes = std::fs::metadata(&self.path).map_or(0, |m| m.len());
        StorageStats {
            path: self.path.clone(),
            exists: self.path.exists(),
            total_records: roster.len(),
            unreadable_records: roster.unreadable_len(),
            file_size_bytes,
            by_department: roster.department_counts(),
        }
    }
}

impl RosterStore for Storage {
    fn load(&self) -> Roster {
        match self.try_load() {
            Ok(roster) => {
                debug!(
                    "Loaded {} records from {}",
                    roster.len(),
                    self.path.display()
                );
                roster
            }
            Err(err) => {
                warn!("Treating student store as empty: {err}");
                Roster::new()
            }
        }
    }

    fn save(&self, roster: &Roster) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let bytes = document::encode(roster)?;
        std::fs::write(&self.path, bytes)?;
        debug!("Saved {} records to {}", roster.len(), self.path.display());
        Ok(())
    }
}

/// Roster storage held in memory, for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    roster: RefCell<Roster>,
    saves: RefCell<usize>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an in-memory store seeded with `roster`.
    #[must_use]
    pub fn with_roster(roster: Roster) -> Self {
        Self {
            roster: RefCell::new(roster),
            saves: RefCell::new(0),
        }
    }

    /// Number of times the roster has been saved.
    #[must_use]
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl RosterStore for MemoryStore {
    fn load(&self) -> Roster {
        self.roster.borrow().clone()
    }

    fn save(&self, roster: &Roster) -> Result<()> {
        *self.roster.borrow_mut() = roster.clone();
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}

/// Statistics about the stored roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    /// Path to the document.
    pub path: PathBuf,
    /// Whether the document exists on disk.
    pub exists: bool,
    /// Number of records that loaded successfully.
    pub total_records: usize,
    /// Entries kept verbatim because they could not be read as records.
    pub unreadable_records: usize,
    /// Size of the document in bytes.
    pub file_size_bytes: u64,
    /// Record count per department, in menu order.
    pub by_department: Vec<(Department, usize)>,
}
