//! Record-level operations on a [`Store`].
//!
//! Each mutating call is a full load, change, save cycle. Not-found and
//! duplicate ids are reported as `Ok(false)` and leave the file untouched.

use tracing::{debug, info};

use super::Store;
use crate::error::Result;
use crate::student::{Student, StudentUpdate};

impl Store {
    /// Get a single record by id.
    #[must_use]
    pub fn get(&self, id: i64) -> Option<Student> {
        self.load().into_iter().find(|s| s.id == id)
    }

    /// Append a new record.
    ///
    /// Returns `false` without writing anything if the id is already taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be written.
    pub fn add(&self, student: Student) -> Result<bool> {
        let mut students = self.load();
        if students.iter().any(|s| s.id == student.id) {
            debug!("Rejecting duplicate id {}", student.id);
            return Ok(false);
        }

        let student = student.normalized();
        info!("Adding student {} ({})", student.id, student.name);
        students.push(student);
        self.save(&students)?;
        Ok(true)
    }

    /// Merge the fields present in `update` into the record with `id`.
    ///
    /// Returns `false` if no record has that id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be written.
    pub fn update(&self, id: i64, update: &StudentUpdate) -> Result<bool> {
        let mut students = self.load();
        let Some(student) = students.iter_mut().find(|s| s.id == id) else {
            debug!("Update skipped, no student with id {}", id);
            return Ok(false);
        };

        student.apply(update);
        info!("Updated student {}", id);
        self.save(&students)?;
        Ok(true)
    }

    /// Remove the record with `id`.
    ///
    /// Returns `false` if no record has that id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be written.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let mut students = self.load();
        let before = students.len();
        students.retain(|s| s.id != id);
        if students.len() == before {
            debug!("Delete skipped, no student with id {}", id);
            return Ok(false);
        }

        info!("Deleted student {}", id);
        self.save(&students)?;
        Ok(true)
    }

    /// Search by id or by name.
    ///
    /// A query that parses as an integer matches that id exactly. Anything
    /// else is a case-insensitive substring match on the name. A blank query
    /// matches nothing.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<Student> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let students = self.load();
        if let Ok(id) = query.parse::<i64>() {
            return students.into_iter().filter(|s| s.id == id).collect();
        }

        let needle = query.to_lowercase();
        students
            .into_iter()
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .collect()
    }
}
