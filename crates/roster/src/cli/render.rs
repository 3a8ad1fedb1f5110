//! Text rendering of records and statistics for the terminal.

use std::fmt::Write as _;

use crate::analytics::Stats;
use crate::error::Result;
use crate::student::Student;

use super::OutputFormat;

/// Render a list of students in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn students(students: &[Student], format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(students)?,
        OutputFormat::Table => table(students),
        OutputFormat::Plain => students.iter().map(|s| plain(s) + "\n").collect(),
    })
}

/// One record on one line.
#[must_use]
pub fn plain(s: &Student) -> String {
    format!(
        "#{} {} (age {}) grade {} marks {}",
        s.id, s.name, s.age, s.grade, s.marks
    )
}

/// Aligned columns with a header row.
#[must_use]
pub fn table(students: &[Student]) -> String {
    let id_width = students
        .iter()
        .map(|s| s.id.to_string().len())
        .max()
        .unwrap_or(0)
        .max("ID".len());
    let name_width = students
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Name".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>id_width$}  {:<name_width$}  {:>3}  {:<5}  {:>5}",
        "ID", "Name", "Age", "Grade", "Marks"
    );
    for s in students {
        let _ = writeln!(
            out,
            "{:>id_width$}  {:<name_width$}  {:>3}  {:<5}  {:>5}",
            s.id, s.name, s.age, s.grade.as_str(), s.marks
        );
    }
    out
}

/// Human-readable statistics block.
#[must_use]
pub fn stats(stats: &Stats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total students:        {}", stats.total);
    let _ = writeln!(out, "Average marks:         {:.2}", stats.average);
    let _ = writeln!(out, "Highest:               {}", plain(&stats.highest));
    let _ = writeln!(out, "Lowest:                {}", plain(&stats.lowest));
    let _ = writeln!(out, "Failing:               {}", stats.failing);
    let _ = writeln!(out, "Below average:         {}", stats.below_average);
    let _ = writeln!(out);
    let _ = writeln!(out, "Grade counts");
    for (grade, count) in &stats.grade_counts {
        let _ = writeln!(out, "  {grade}: {count}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::analyze;
    use crate::student::Grade;

    fn sample() -> Vec<Student> {
        vec![
            Student::new(1, "Al", 20, Grade::A, 91),
            Student::new(12, "Beatrice Long", 21, Grade::F, 8),
        ]
    }

    #[test]
    fn test_plain() {
        assert_eq!(plain(&sample()[0]), "#1 Al (age 20) grade A marks 91");
    }

    #[test]
    fn test_table_aligns_columns() {
        let text = table(&sample());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "ID  Name           Age  Grade  Marks");
        assert_eq!(lines[1], " 1  Al              20  A         91");
        assert_eq!(lines[2], "12  Beatrice Long   21  F          8");
    }

    #[test]
    fn test_table_empty_has_header_only() {
        assert_eq!(table(&[]).lines().count(), 1);
    }

    #[test]
    fn test_students_json() {
        let json = students(&sample(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[1]["name"], "Beatrice Long");
        assert_eq!(value[1]["grade"], "F");
    }

    #[test]
    fn test_students_plain() {
        let text = students(&sample(), OutputFormat::Plain).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_stats_block() {
        let text = stats(&analyze(&sample()).unwrap());
        assert!(text.contains("Total students:        2"));
        assert!(text.contains("Average marks:         49.50"));
        assert!(text.contains("Failing:               1"));
        assert!(text.contains("  A: 1"));
        assert!(text.contains("  F: 1"));
    }
}
