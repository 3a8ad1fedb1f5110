//! `roster` - A flat-file student roster
//!
//! This library keeps student records in a single headerless CSV file and
//! provides add/update/delete/search on top of it, summary statistics, and
//! bulk CSV import/export.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod analytics;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod storage;
pub mod student;

pub use analytics::{analyze, Stats};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use storage::{ImportSummary, LoadStatus, Loaded, Store};
pub use student::{Grade, Student, StudentUpdate};
