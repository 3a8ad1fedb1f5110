//! Command-line interface for roster.
//!
//! This module provides the CLI structure and output rendering for the
//! `roster` binary.

mod commands;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, DeleteCommand, ExportCommand, GradeArg, ImportCommand,
    ListCommand, OutputFormat, SearchCommand, ShowCommand, StatsCommand, UpdateCommand,
};

/// roster - Keep a student roster in a plain CSV file
///
/// Add, edit, search and analyze student records stored one per line as
/// id,name,age,grade,marks.
#[derive(Debug, Parser)]
#[command(name = "roster")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the roster file (overrides configuration)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a new student
    Add(AddCommand),

    /// List all students
    List(ListCommand),

    /// Show one student
    Show(ShowCommand),

    /// Change fields of an existing student
    Update(UpdateCommand),

    /// Delete a student
    Delete(DeleteCommand),

    /// Search by ID or name
    Search(SearchCommand),

    /// Show summary statistics
    Stats(StatsCommand),

    /// Show statistics with top and bottom performers
    Dashboard,

    /// Merge students from a CSV file
    Import(ImportCommand),

    /// Write all students as CSV with a header
    Export(ExportCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
