//! `rollbook` - A single-user student record keeper
//!
//! This library provides the record model, validation, JSON flat-file storage
//! and the two interactive front ends (a numbered text menu and a form view
//! with a live table) used by the `rollbook` binary.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod frontend;
pub mod logging;
pub mod registrar;
pub mod roster;
pub mod storage;
pub mod student;
pub mod validate;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use registrar::Registrar;
pub use roster::Roster;
pub use storage::{MemoryStore, RosterStore, Storage, StorageStats};
pub use student::{Department, Field, Student, StudentId};
