//! Error types for roster.
//!
//! Found/not-found and duplicate-id outcomes are not errors: the store reports
//! them as `Ok(false)`. This type covers the failures that a caller cannot
//! recover from by checking a flag, such as an unwritable backing file or a
//! rejected import.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for roster operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to write the backing file.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        /// Path to the backing file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
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

    /// CSV encoding or decoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // === Import Errors ===
    /// An imported row had too few columns.
    #[error("line {line} has {columns} column(s); file must have 5 columns: id,name,age,grade,marks")]
    ImportShape {
        /// 1-based line number of the offending row.
        line: u64,
        /// Number of columns found.
        columns: usize,
    },

    /// An imported row could not be converted into a student record.
    #[error("line {line}: {message}")]
    ImportRow {
        /// 1-based line number of the offending row.
        line: u64,
        /// Description of what went wrong.
        message: String,
    },

    /// The import input held no data rows.
    #[error("file contains no rows")]
    ImportEmpty,

    // === Record Errors ===
    /// A grade outside A, B, C, D, F.
    #[error("invalid grade '{value}': expected one of A, B, C, D, F")]
    InvalidGrade {
        /// The rejected input.
        value: String,
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
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for roster operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an import row error.
    #[must_use]
    pub fn import_row(line: u64, message: impl Into<String>) -> Self {
        Self::ImportRow {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid grade error.
    #[must_use]
    pub fn invalid_grade(value: impl Into<String>) -> Self {
        Self::InvalidGrade {
            value: value.into(),
        }
    }

    /// Check if this error rejected an import before anything was merged.
    #[must_use]
    pub fn is_import_error(&self) -> bool {
        matches!(
            self,
            Self::ImportShape { .. } | Self::ImportRow { .. } | Self::ImportEmpty
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_shape_display() {
        let err = Error::ImportShape {
            line: 3,
            columns: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("line 3"));
        assert!(msg.contains("4 column(s)"));
        assert!(msg.contains("id,name,age,grade,marks"));
    }

    #[test]
    fn test_import_row_display() {
        let err = Error::import_row(2, "invalid marks 'abc'");
        assert_eq!(err.to_string(), "line 2: invalid marks 'abc'");
    }

    #[test]
    fn test_is_import_error() {
        assert!(Error::import_row(1, "bad").is_import_error());
        assert!(Error::ImportShape {
            line: 1,
            columns: 2
        }
        .is_import_error());
        assert!(Error::ImportEmpty.is_import_error());
        assert!(!Error::invalid_grade("E").is_import_error());
    }

    #[test]
    fn test_invalid_grade_display() {
        let err = Error::invalid_grade("E");
        assert_eq!(
            err.to_string(),
            "invalid grade 'E': expected one of A, B, C, D, F"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_file_write_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::FileWrite {
            path: PathBuf::from("/root/students.txt"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("/root/students.txt"));
        assert!(msg.contains("access denied"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "failing_threshold too high".to_string(),
        };
        assert!(err.to_string().contains("failing_threshold"));
    }
}
