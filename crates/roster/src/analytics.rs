//! Summary statistics over a roster.
//!
//! Everything here is a pure function of a slice of records, so it can be
//! tested without touching the file system. [`crate::Store::analyze`] is the
//! stored-collection entry point.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::student::{Grade, Student};

/// Marks strictly below this count as failing unless configured otherwise.
pub const DEFAULT_FAILING_THRESHOLD: u32 = 40;

/// Aggregate statistics for a non-empty collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    /// Number of records.
    pub total: usize,
    /// Mean of the marks.
    pub average: f64,
    /// Record with the highest marks. Ties go to the earliest record.
    pub highest: Student,
    /// Record with the lowest marks. Ties go to the earliest record.
    pub lowest: Student,
    /// Records with marks below the failing threshold.
    pub failing: usize,
    /// Records with marks strictly below `average`.
    pub below_average: usize,
    /// Count per grade, for grades that occur at least once.
    pub grade_counts: BTreeMap<Grade, usize>,
}

/// Compute [`Stats`] with the default failing threshold.
///
/// Returns `None` for an empty collection.
#[must_use]
pub fn analyze(students: &[Student]) -> Option<Stats> {
    analyze_with_threshold(students, DEFAULT_FAILING_THRESHOLD)
}

/// Compute [`Stats`], counting marks below `failing_threshold` as failing.
///
/// Returns `None` for an empty collection.
#[must_use]
pub fn analyze_with_threshold(students: &[Student], failing_threshold: u32) -> Option<Stats> {
    let first = students.first()?;

    let mut highest = first;
    let mut lowest = first;
    let mut sum: u64 = 0;
    let mut failing = 0;
    let mut grade_counts = BTreeMap::new();

    for s in students {
        // Strict comparisons keep the earliest record on ties
        if s.marks > highest.marks {
            highest = s;
        }
        if s.marks < lowest.marks {
            lowest = s;
        }
        if s.marks < failing_threshold {
            failing += 1;
        }
        sum += u64::from(s.marks);
        *grade_counts.entry(s.grade).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    let average = sum as f64 / students.len() as f64;
    let below_average = students
        .iter()
        .filter(|s| f64::from(s.marks) < average)
        .count();

    Some(Stats {
        total: students.len(),
        average,
        highest: highest.clone(),
        lowest: lowest.clone(),
        failing,
        below_average,
        grade_counts,
    })
}

/// Up to `n` records with the highest marks, best first.
///
/// Equal marks keep their collection order.
#[must_use]
pub fn top_performers(students: &[Student], n: usize) -> Vec<Student> {
    let mut ranked = students.to_vec();
    ranked.sort_by(|a, b| b.marks.cmp(&a.marks));
    ranked.truncate(n);
    ranked
}

/// Up to `n` records with the lowest marks, worst first.
///
/// Equal marks keep their collection order.
#[must_use]
pub fn bottom_performers(students: &[Student], n: usize) -> Vec<Student> {
    let mut ranked = students.to_vec();
    ranked.sort_by_key(|s| s.marks);
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: i64, grade: Grade, marks: u32) -> Student {
        Student::new(id, format!("student {id}"), 20, grade, marks)
    }

    #[test]
    fn test_analyze_empty() {
        assert!(analyze(&[]).is_none());
    }

    #[test]
    fn test_analyze_two_records() {
        let stats = analyze(&[student(1, Grade::F, 30), student(2, Grade::A, 90)]).unwrap();

        assert_eq!(stats.total, 2);
        assert!((stats.average - 60.0).abs() < f64::EPSILON);
        assert_eq!(stats.failing, 1);
        assert_eq!(stats.below_average, 1);
        assert_eq!(stats.highest.id, 2);
        assert_eq!(stats.lowest.id, 1);
    }

    #[test]
    fn test_analyze_single_record() {
        let stats = analyze(&[student(1, Grade::C, 40)]).unwrap();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.failing, 0);
        assert_eq!(stats.below_average, 0);
        assert_eq!(stats.highest, stats.lowest);
    }

    #[test]
    fn test_ties_go_to_first_record() {
        let students = [
            student(5, Grade::B, 70),
            student(2, Grade::B, 70),
            student(9, Grade::D, 10),
            student(1, Grade::D, 10),
        ];
        let stats = analyze(&students).unwrap();
        assert_eq!(stats.highest.id, 5);
        assert_eq!(stats.lowest.id, 9);
    }

    #[test]
    fn test_grade_counts_only_present() {
        let stats = analyze(&[
            student(1, Grade::B, 60),
            student(2, Grade::B, 65),
            student(3, Grade::F, 20),
        ])
        .unwrap();

        let expected: BTreeMap<Grade, usize> = [(Grade::B, 2), (Grade::F, 1)].into_iter().collect();
        assert_eq!(stats.grade_counts, expected);
    }

    #[test]
    fn test_below_average_is_strict() {
        let stats = analyze(&[
            student(1, Grade::C, 50),
            student(2, Grade::C, 50),
            student(3, Grade::C, 50),
        ])
        .unwrap();
        assert_eq!(stats.below_average, 0);
    }

    #[test]
    fn test_custom_threshold() {
        let students = [student(1, Grade::C, 45), student(2, Grade::A, 90)];
        assert_eq!(analyze(&students).unwrap().failing, 0);
        assert_eq!(analyze_with_threshold(&students, 50).unwrap().failing, 1);
    }

    #[test]
    fn test_top_and_bottom_performers() {
        let students = [
            student(1, Grade::C, 50),
            student(2, Grade::A, 95),
            student(3, Grade::F, 12),
            student(4, Grade::A, 95),
        ];

        let top: Vec<i64> = top_performers(&students, 3).iter().map(|s| s.id).collect();
        assert_eq!(top, vec![2, 4, 1]);

        let bottom: Vec<i64> = bottom_performers(&students, 2)
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(bottom, vec![3, 1]);
    }

    #[test]
    fn test_performers_larger_than_collection() {
        let students = [student(1, Grade::C, 50)];
        assert_eq!(top_performers(&students, 5).len(), 1);
        assert!(bottom_performers(&[], 5).is_empty());
    }

    #[test]
    fn test_stats_serialize() {
        let stats = analyze(&[student(1, Grade::A, 80)]).unwrap();
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total"], 1);
        assert_eq!(json["grade_counts"]["A"], 1);
        assert_eq!(json["highest"]["name"], "Student 1");
    }
}
