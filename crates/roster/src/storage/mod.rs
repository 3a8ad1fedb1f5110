//! Storage layer for roster.
//!
//! The roster lives in a single headerless CSV file. [`Store`] holds only the
//! path: every operation re-reads the whole file, mutates the collection in
//! memory and writes it back. Nothing is cached between calls.

pub mod codec;
mod query;
mod transfer;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::analytics::{self, Stats};
use crate::error::{Error, Result};
use crate::student::Student;

pub use transfer::ImportSummary;

/// How the last load went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// The backing file does not exist yet.
    Missing,
    /// The backing file was read and every row parsed.
    Parsed,
    /// The backing file exists but could not be read or parsed. The
    /// collection was replaced by an empty one.
    Unparseable {
        /// Why the file was rejected.
        reason: String,
    },
}

/// A loaded collection together with its [`LoadStatus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    /// The records, in file order.
    pub students: Vec<Student>,
    /// How they were obtained.
    pub status: LoadStatus,
}

/// Handle on a roster backing file.
///
/// Cheap to construct; no file is touched until an operation runs.
#[derive(Debug, Clone)]
pub struct Store {
    /// Path to the backing file.
    path: PathBuf,
}

impl Store {
    /// Create a store over the given backing file.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the path to the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the collection.
    ///
    /// A missing file yields an empty collection. So does a malformed one:
    /// the failure is logged, not returned. Use [`Store::load_with_status`]
    /// to tell the two apart.
    #[must_use]
    pub fn load(&self) -> Vec<Student> {
        self.load_with_status().students
    }

    /// Load the collection and report whether the file was missing, parsed,
    /// or rejected.
    #[must_use]
    pub fn load_with_status(&self) -> Loaded {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No backing file at {}", self.path.display());
                return Loaded {
                    students: Vec::new(),
                    status: LoadStatus::Missing,
                };
            }
            Err(err) => return self.unparseable(&Error::Io(err)),
        };

        match codec::read_students(BufReader::new(file)) {
            Ok(students) => {
                debug!(
                    "Loaded {} students from {}",
                    students.len(),
                    self.path.display()
                );
                Loaded {
                    students,
                    status: LoadStatus::Parsed,
                }
            }
            Err(err) => self.unparseable(&err),
        }
    }

    fn unparseable(&self, err: &Error) -> Loaded {
        warn!("Treating {} as empty: {}", self.path.display(), err);
        Loaded {
            students: Vec::new(),
            status: LoadStatus::Unparseable {
                reason: err.to_string(),
            },
        }
    }

    /// Overwrite the backing file with `students`, in order, without a header.
    ///
    /// Creates parent directories if needed. The write is not atomic.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, students: &[Student]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let file = File::create(&self.path).map_err(|source| Error::FileWrite {
            path: self.path.clone(),
            source,
        })?;
        let mut out = BufWriter::new(file);
        codec::write_students(&mut out, students, false)?;
        out.flush().map_err(|source| Error::FileWrite {
            path: self.path.clone(),
            source,
        })?;

        debug!(
            "Saved {} students to {}",
            students.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Compute statistics over the stored collection.
    ///
    /// Returns `None` when there are no records.
    #[must_use]
    pub fn analyze(&self) -> Option<Stats> {
        analytics::analyze(&self.load())
    }

    /// Like [`Store::analyze`], with a custom pass mark.
    #[must_use]
    pub fn analyze_with_threshold(&self, failing_threshold: u32) -> Option<Stats> {
        analytics::analyze_with_threshold(&self.load(), failing_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::student::Grade;

    fn create_test_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = Store::new(dir.path().join("students.txt"));
        (dir, store)
    }

    #[test]
    fn test_load_missing_file() {
        let (_dir, store) = create_test_store();
        let loaded = store.load_with_status();
        assert!(loaded.students.is_empty());
        assert_eq!(loaded.status, LoadStatus::Missing);
    }

    #[test]
    fn test_load_malformed_file_is_empty() {
        let (_dir, store) = create_test_store();
        std::fs::write(store.path(), "1,alice,20,A,55\n2,bob,old,B,60\n").unwrap();

        assert!(store.load().is_empty());
        assert!(matches!(
            store.load_with_status().status,
            LoadStatus::Unparseable { .. }
        ));
    }

    #[test]
    fn test_load_short_row_is_empty() {
        let (_dir, store) = create_test_store();
        std::fs::write(store.path(), "1,alice,20\n").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_normalizes_name_and_grade() {
        let (_dir, store) = create_test_store();
        std::fs::write(store.path(), "1,ALICE smith,20,b,55\n").unwrap();

        let loaded = store.load_with_status();
        assert_eq!(loaded.status, LoadStatus::Parsed);
        assert_eq!(
            loaded.students,
            vec![Student::new(1, "Alice Smith", 20, Grade::B, 55)]
        );
    }

    #[test]
    fn test_save_writes_fixed_column_order() {
        let (_dir, store) = create_test_store();
        store
            .save(&[
                Student::new(2, "Bob", 21, Grade::C, 40),
                Student::new(1, "Alice", 20, Grade::A, 90),
            ])
            .unwrap();

        let text = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(text, "2,Bob,21,C,40\n1,Alice,20,A,90\n");
    }

    #[test]
    fn test_save_overwrites() {
        let (_dir, store) = create_test_store();
        store
            .save(&[Student::new(1, "Alice", 20, Grade::A, 90)])
            .unwrap();
        store.save(&[]).unwrap();

        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "");
        assert_eq!(store.load_with_status().status, LoadStatus::Parsed);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("nested/deeper/students.txt"));
        store
            .save(&[Student::new(1, "Alice", 20, Grade::A, 90)])
            .unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_save_load_round_trip_is_stable() {
        let (_dir, store) = create_test_store();
        std::fs::write(store.path(), "3,zoe QUINN,19,d,33\n1,al,22,a,97\n").unwrap();

        store.save(&store.load()).unwrap();
        let first = std::fs::read_to_string(store.path()).unwrap();
        store.save(&store.load()).unwrap();
        let second = std::fs::read_to_string(store.path()).unwrap();

        assert_eq!(first, "3,Zoe Quinn,19,D,33\n1,Al,22,A,97\n");
        assert_eq!(first, second);
    }

    #[test]
    fn test_analyze_empty_store() {
        let (_dir, store) = create_test_store();
        assert!(store.analyze().is_none());
    }

    #[test]
    fn test_path() {
        let store = Store::new("/tmp/roster/students.txt");
        assert_eq!(store.path(), Path::new("/tmp/roster/students.txt"));
    }
}
