//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::student::Field;

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Student ID (CU-0000-YYYY, cu accepted)
    pub id: String,

    /// Full name (letters and spaces)
    #[arg(short, long)]
    pub name: String,

    /// Age, 5 to 100
    #[arg(short, long)]
    pub age: String,

    /// Department number (1-7) or name
    #[arg(short, long)]
    pub department: String,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::default())]
    pub format: OutputFormat,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Student ID to look up
    pub id: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Update command arguments.
#[derive(Debug, Args)]
pub struct UpdateCommand {
    /// Student ID to update
    pub id: String,

    /// Field to change
    #[arg(value_enum)]
    pub field: FieldArg,

    /// New value for the field
    pub value: String,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Student ID to delete
    pub id: String,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Record field argument for updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FieldArg {
    /// The student ID (renames the record)
    Id,
    /// The student's name
    Name,
    /// The student's age
    Age,
    /// The student's department
    #[value(alias = "dept")]
    Department,
}

impl From<FieldArg> for Field {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::Id => Self::Id,
            FieldArg::Name => Self::Name,
            FieldArg::Age => Self::Age,
            FieldArg::Department => Self::Department,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated lines
    Plain,
    /// Formatted table
    #[default]
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_arg_conversion() {
        assert_eq!(Field::from(FieldArg::Id), Field::Id);
        assert_eq!(Field::from(FieldArg::Name), Field::Name);
        assert_eq!(Field::from(FieldArg::Age), Field::Age);
        assert_eq!(Field::from(FieldArg::Department), Field::Department);
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_field_arg_accepts_alias() {
        assert_eq!(
            FieldArg::from_str("dept", true).unwrap(),
            FieldArg::Department
        );
    }

    #[test]
    fn test_add_command_debug() {
        let cmd = AddCommand {
            id: "CU-0001-2026".to_string(),
            name: "Ada".to_string(),
            age: "34".to_string(),
            department: "1".to_string(),
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("CU-0001-2026"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
