//! Core record types for roster.
//!
//! A [`Student`] is one row of the roster. Names and grades are normalized
//! every time a record enters the store (load, add, update, import): names
//! are trimmed and title-cased, and grades are parsed case-insensitively into
//! [`Grade`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Letter grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    /// Grade A.
    A,
    /// Grade B.
    B,
    /// Grade C.
    C,
    /// Grade D.
    D,
    /// Grade F.
    F,
}

impl Grade {
    /// All grades in display order.
    pub const ALL: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    /// The upper-case letter for this grade.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            "F" => Ok(Self::F),
            _ => Err(Error::invalid_grade(s)),
        }
    }
}

/// One student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Unique key.
    pub id: i64,
    /// Display name, title-cased.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Letter grade.
    pub grade: Grade,
    /// Marks, 0 to 100.
    pub marks: u32,
}

impl Student {
    /// Create a record, normalizing the name.
    #[must_use]
    pub fn new(id: i64, name: impl AsRef<str>, age: u32, grade: Grade, marks: u32) -> Self {
        Self {
            id,
            name: normalize_name(name.as_ref()),
            age,
            grade,
            marks,
        }
    }

    /// Return this record with its name re-normalized.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.name = normalize_name(&self.name);
        self
    }

    /// Merge the fields present in `update` into this record.
    pub fn apply(&mut self, update: &StudentUpdate) {
        if let Some(name) = &update.name {
            self.name = normalize_name(name);
        }
        if let Some(age) = update.age {
            self.age = age;
        }
        if let Some(grade) = update.grade {
            self.grade = grade;
        }
        if let Some(marks) = update.marks {
            self.marks = marks;
        }
    }
}

/// A partial update. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentUpdate {
    /// New name.
    pub name: Option<String>,
    /// New age.
    pub age: Option<u32>,
    /// New grade.
    pub grade: Option<Grade>,
    /// New marks.
    pub marks: Option<u32>,
}

impl StudentUpdate {
    /// Update only the marks.
    #[must_use]
    pub fn marks(marks: u32) -> Self {
        Self {
            marks: Some(marks),
            ..Self::default()
        }
    }

    /// True when no field would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.grade.is_none() && self.marks.is_none()
    }
}

/// Normalize a name for storage: surrounding whitespace is dropped and the
/// rest is title-cased.
#[must_use]
pub fn normalize_name(input: &str) -> String {
    title_case(input.trim())
}

/// Title-case a name.
///
/// A cased letter that follows another cased letter is lower-cased; any other
/// cased letter is upper-cased. Uncased characters (digits, punctuation, CJK)
/// pass through and start a new word, so `"mary-ann o'neil"` becomes
/// `"Mary-Ann O'Neil"` and `"中a"` becomes `"中A"`. A letter whose case mapping
/// expands to several characters (`ß` upper-cases to `SS`) is kept as is.
/// Applying it twice gives the same result as applying it once.
#[must_use]
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_cased = false;
    for c in input.chars() {
        if is_cased(c) {
            let mapped = if prev_cased {
                single(c.to_lowercase())
            } else {
                single(c.to_uppercase())
            };
            out.push(mapped.unwrap_or(c));
            prev_cased = true;
        } else {
            out.push(c);
            prev_cased = false;
        }
    }
    out
}

fn is_cased(c: char) -> bool {
    c.is_lowercase() || c.is_uppercase() || single(c.to_lowercase()).is_some_and(|l| l != c)
}

/// The mapped character, if the mapping is exactly one character long.
fn single(mut mapping: impl Iterator<Item = char>) -> Option<char> {
    let first = mapping.next()?;
    mapping.next().is_none().then_some(first)
}
