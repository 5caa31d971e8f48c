//! Command-line interface for rollbook.
//!
//! This module provides the CLI structure for the `rollbook` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, DeleteCommand, FieldArg, ListCommand, OutputFormat, ShowCommand,
    StatusCommand, UpdateCommand,
};

use crate::logging::Verbosity;

/// rollbook - Keep student records in a single JSON file
///
/// Run without a command to open the interactive front end (the text menu
/// unless configured otherwise).
#[derive(Debug, Parser)]
#[command(name = "rollbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the student records file (overrides configuration)
    #[arg(short = 'D', long, global = true, value_name = "FILE")]
    pub data_file: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the numbered text menu
    Menu,

    /// Open the form-and-table view
    Form,

    /// Add a student
    Add(AddCommand),

    /// List all students
    List(ListCommand),

    /// Show one student
    Show(ShowCommand),

    /// Change one field of a student
    Update(UpdateCommand),

    /// Delete a student
    Delete(DeleteCommand),

    /// Show record file status
    Status(StatusCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }
}
