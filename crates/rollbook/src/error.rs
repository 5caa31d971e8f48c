//! Error types for rollbook.
//!
//! This module defines all error types used throughout the rollbook crate,
//! providing detailed context for debugging and operator-facing messages.

use std::path::PathBuf;
use thiserror::Error;

use crate::student::{Field, StudentId};

/// The main error type for rollbook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Record Errors ===
    /// An input value failed its validator.
    #[error("invalid {field}: {value:?}. {hint}", hint = .field.format_hint())]
    InvalidFormat {
        /// The field whose value was rejected.
        field: Field,
        /// The rejected input, as entered.
        value: String,
    },

    /// The student ID is already present in the roster.
    #[error("student ID {0} already exists")]
    DuplicateId(StudentId),

    /// No record exists for the student ID.
    #[error("student {0} not found")]
    NotFound(StudentId),

    // === Storage Errors ===
    /// The persisted document could not be parsed.
    ///
    /// Only raised internally; loading recovers by treating the roster as empty.
    #[error("corrupt student store at {path}: {source}")]
    CorruptStore {
        /// Path to the document.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system or terminal operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for rollbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid format error for a field.
    #[must_use]
    pub fn invalid_format(field: Field, value: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field,
            value: value.into(),
        }
    }

    /// Check if this error is a validation failure.
    #[must_use]
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, Self::InvalidFormat { .. })
    }

    /// Check if this error reports a duplicate student ID.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateId(_))
    }

    /// Check if this error reports a missing record.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
