//! Bulk CSV import and export.

use std::collections::{HashMap, HashSet};
use std::io::{Read, Write};

use serde::Serialize;
use tracing::{info, warn};

use super::{codec, Store};
use crate::error::{Error, Result};
use crate::student::Student;

/// Outcome of a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Rows read from the input.
    pub imported: usize,
    /// Stored records that were overwritten by an imported row.
    pub replaced: usize,
    /// Records in the store after the merge.
    pub total: usize,
}

impl Store {
    /// Import CSV rows and merge them into the stored collection.
    ///
    /// Rows are appended after the current records and the result is
    /// deduplicated by id, keeping the last occurrence. An imported row
    /// therefore overwrites a stored record with the same id. A leading
    /// `id,name,age,grade,marks` header row is skipped. Extra columns are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Fails without touching the store if the input has no data rows, if
    /// any row has fewer than five columns or a field cannot be converted, or
    /// if the file cannot be written.
    pub fn import<R: Read>(&self, input: R) -> Result<ImportSummary> {
        let incoming = read_import(input).map_err(|err| {
            warn!("Import rejected: {}", err);
            err
        })?;

        let incoming_ids: HashSet<i64> = incoming.iter().map(|s| s.id).collect();
        let imported = incoming.len();

        let mut merged = self.load();
        let replaced = merged
            .iter()
            .filter(|s| incoming_ids.contains(&s.id))
            .count();
        merged.extend(incoming);
        let merged = dedup_keep_last(merged);

        self.save(&merged)?;
        info!(
            "Imported {} rows ({} replaced), {} students stored",
            imported,
            replaced,
            merged.len()
        );
        Ok(ImportSummary {
            imported,
            replaced,
            total: merged.len(),
        })
    }

    /// Write every stored record as CSV with a header row.
    ///
    /// Returns the number of records written.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `output` fails.
    pub fn export<W: Write>(&self, output: W) -> Result<usize> {
        let students = self.load();
        codec::write_students(output, &students, true)?;
        info!("Exported {} students", students.len());
        Ok(students.len())
    }
}

/// Parse every import row up front so a bad row rejects the whole file.
fn read_import<R: Read>(input: R) -> Result<Vec<Student>> {
    let mut rdr = codec::reader(input);
    let mut students = Vec::new();
    for (index, record) in rdr.records().enumerate() {
        let record = record?;
        if index == 0 && codec::is_header(&record) {
            continue;
        }
        students.push(codec::parse_row(&record)?);
    }
    if students.is_empty() {
        return Err(Error::ImportEmpty);
    }
    Ok(students)
}

/// Drop earlier records whose id appears again later.
///
/// Survivors keep the position of their last occurrence.
fn dedup_keep_last(students: Vec<Student>) -> Vec<Student> {
    let last: HashMap<i64, usize> = students
        .iter()
        .enumerate()
        .map(|(index, s)| (s.id, index))
        .collect();

    students
        .into_iter()
        .enumerate()
        .filter(|(index, s)| last.get(&s.id) == Some(index))
        .map(|(_, s)| s)
        .collect()
}
