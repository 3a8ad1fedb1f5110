//! CSV row format shared by the backing file, import and export.
//!
//! Every row is `id,name,age,grade,marks`. Readers accept extra trailing
//! columns and ignore them; writers always emit exactly five.

use std::io::{Read, Write};

use csv::{ReaderBuilder, StringRecord, Terminator, Trim, WriterBuilder};
use tracing::trace;

use crate::error::{Error, Result};
use crate::student::{Grade, Student};

/// Column names in file order.
pub const COLUMNS: [&str; 5] = ["id", "name", "age", "grade", "marks"];

/// Build a reader over headerless, possibly ragged CSV.
pub(crate) fn reader<R: Read>(input: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input)
}

/// Build a writer that emits `\n`-terminated rows without a header.
pub(crate) fn writer<W: Write>(output: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(output)
}

/// 1-based line number of a record, for error messages.
pub(crate) fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, csv::Position::line)
}

/// True if the row is the export header (case-insensitive).
pub(crate) fn is_header(record: &StringRecord) -> bool {
    record.len() >= COLUMNS.len()
        && record
            .iter()
            .zip(COLUMNS)
            .all(|(cell, name)| cell.eq_ignore_ascii_case(name))
}

/// Convert one CSV row into a normalized [`Student`].
///
/// # Errors
///
/// Returns [`Error::ImportShape`] for rows with fewer than five columns and
/// [`Error::ImportRow`] when a field cannot be converted.
pub fn parse_row(record: &StringRecord) -> Result<Student> {
    let line = line_of(record);
    if record.len() < COLUMNS.len() {
        return Err(Error::ImportShape {
            line,
            columns: record.len(),
        });
    }

    let id = parse_field::<i64>(&record[0], "id", line)?;
    let age = parse_field::<u32>(&record[2], "age", line)?;
    let grade = record[3]
        .parse::<Grade>()
        .map_err(|err: Error| Error::import_row(line, err.to_string()))?;
    let marks = parse_field::<u32>(&record[4], "marks", line)?;

    trace!(line, id, "parsed row");
    Ok(Student::new(id, &record[1], age, grade, marks))
}

fn parse_field<T: std::str::FromStr>(raw: &str, column: &str, line: u64) -> Result<T> {
    raw.parse()
        .map_err(|_| Error::import_row(line, format!("invalid {column} '{raw}'")))
}

/// Read every row of headerless CSV, failing on the first bad row.
///
/// # Errors
///
/// Returns an error if the input is not valid CSV or any row fails
/// [`parse_row`].
pub fn read_students<R: Read>(input: R) -> Result<Vec<Student>> {
    let mut rdr = reader(input);
    let mut students = Vec::new();
    for record in rdr.records() {
        students.push(parse_row(&record?)?);
    }
    Ok(students)
}

/// Write the students as CSV rows, optionally preceded by a header row.
///
/// # Errors
///
/// Returns an error if writing to `output` fails.
pub fn write_students<W: Write>(output: W, students: &[Student], header: bool) -> Result<()> {
    let mut wtr = writer(output);
    if header {
        wtr.write_record(COLUMNS)?;
    }
    for s in students {
        wtr.write_record([
            s.id.to_string(),
            s.name.clone(),
            s.age.to_string(),
            s.grade.to_string(),
            s.marks.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
