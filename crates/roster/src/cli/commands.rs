//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::student::{Grade, Student, StudentUpdate};

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Student ID (must be unique)
    #[arg(long)]
    pub id: i64,

    /// Full name
    #[arg(long)]
    pub name: String,

    /// Age in years
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=120))]
    pub age: u32,

    /// Letter grade
    #[arg(long, value_enum, ignore_case = true)]
    pub grade: GradeArg,

    /// Marks out of 100
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub marks: u32,
}

impl AddCommand {
    /// Build the record to insert.
    #[must_use]
    pub fn to_student(&self) -> Student {
        Student::new(
            self.id,
            &self.name,
            self.age,
            self.grade.into(),
            self.marks,
        )
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Student ID
    pub id: i64,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Update command arguments.
#[derive(Debug, Args)]
#[command(group(
    clap::ArgGroup::new("fields")
        .required(true)
        .multiple(true)
        .args(["name", "age", "grade", "marks"]),
))]
pub struct UpdateCommand {
    /// Student ID
    pub id: i64,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New age
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=120))]
    pub age: Option<u32>,

    /// New grade
    #[arg(long, value_enum, ignore_case = true)]
    pub grade: Option<GradeArg>,

    /// New marks
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub marks: Option<u32>,
}

impl UpdateCommand {
    /// Collect the fields that were given on the command line.
    #[must_use]
    pub fn to_update(&self) -> StudentUpdate {
        StudentUpdate {
            name: self.name.clone(),
            age: self.age,
            grade: self.grade.map(Grade::from),
            marks: self.marks,
        }
    }
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Student ID
    pub id: i64,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Search command arguments.
#[derive(Debug, Args)]
pub struct SearchCommand {
    /// Student ID, or part of a name (case-insensitive)
    pub query: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Import command arguments.
#[derive(Debug, Args)]
pub struct ImportCommand {
    /// CSV file with rows of id,name,age,grade,marks
    pub file: PathBuf,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
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

/// Grade argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GradeArg {
    /// Grade A
    A,
    /// Grade B
    B,
    /// Grade C
    C,
    /// Grade D
    D,
    /// Grade F
    F,
}

impl From<GradeArg> for Grade {
    fn from(arg: GradeArg) -> Self {
        match arg {
            GradeArg::A => Self::A,
            GradeArg::B => Self::B,
            GradeArg::C => Self::C,
            GradeArg::D => Self::D,
            GradeArg::F => Self::F,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One record per line
    Plain,
    /// Aligned columns
    #[default]
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_arg_conversion() {
        assert_eq!(Grade::from(GradeArg::A), Grade::A);
        assert_eq!(Grade::from(GradeArg::B), Grade::B);
        assert_eq!(Grade::from(GradeArg::C), Grade::C);
        assert_eq!(Grade::from(GradeArg::D), Grade::D);
        assert_eq!(Grade::from(GradeArg::F), Grade::F);
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_add_command_to_student() {
        let cmd = AddCommand {
            id: 12,
            name: "kim lee".to_string(),
            age: 19,
            grade: GradeArg::B,
            marks: 77,
        };
        assert_eq!(cmd.to_student(), Student::new(12, "Kim Lee", 19, Grade::B, 77));
    }

    #[test]
    fn test_update_command_to_update() {
        let cmd = UpdateCommand {
            id: 3,
            name: None,
            age: None,
            grade: Some(GradeArg::F),
            marks: Some(12),
        };
        let update = cmd.to_update();
        assert_eq!(update.grade, Some(Grade::F));
        assert_eq!(update.marks, Some(12));
        assert!(update.name.is_none());
        assert!(update.age.is_none());
    }

    #[test]
    fn test_delete_command_debug() {
        let cmd = DeleteCommand { id: 4, yes: true };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("yes"));
    }
}
