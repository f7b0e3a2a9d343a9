use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum combined mark (coursework + exam) a student can reach.
pub const TOTAL_AVAILABLE_MARKS: u32 = 160;
/// No single mark may exceed the combined total.
pub const MAX_MARK: u32 = TOTAL_AVAILABLE_MARKS;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StudentError {
    #[error("Student not found.")]
    NotFound { query: String },

    #[error("Invalid marks.")]
    InvalidMarks { raw: String },

    #[error("{field} cannot be empty")]
    MissingField { field: &'static str },

    #[error("{field} cannot contain commas or line breaks")]
    InvalidCharacter { field: &'static str },

    #[error("a student with code {code} already exists")]
    DuplicateCode { code: String },
}

//
// ─── GRADE ────────────────────────────────────────────────────────────────────
//

/// Letter grade from a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StudentGrade {
    A,
    B,
    C,
    D,
    F,
}

impl StudentGrade {
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 70.0 {
            Self::A
        } else if percentage >= 60.0 {
            Self::B
        } else if percentage >= 50.0 {
            Self::C
        } else if percentage >= 40.0 {
            Self::D
        } else {
            Self::F
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StudentGrade::A => "A",
            StudentGrade::B => "B",
            StudentGrade::C => "C",
            StudentGrade::D => "D",
            StudentGrade::F => "F",
        }
    }
}

impl fmt::Display for StudentGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── RECORD ───────────────────────────────────────────────────────────────────
//

/// Derived figures for one student.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentStats {
    pub coursework: u64,
    pub exam: u32,
    pub percentage: f64,
    pub grade: StudentGrade,
}

/// One student: code, name and marks. The last mark is the exam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    code: String,
    name: String,
    marks: Vec<u32>,
}

impl StudentRecord {
    /// # Errors
    ///
    /// Returns `StudentError::MissingField` for a blank code or name,
    /// `StudentError::InvalidCharacter` if either would break the line format,
    /// and `StudentError::InvalidMarks` when no marks are given or one exceeds
    /// `MAX_MARK`.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        marks: Vec<u32>,
    ) -> Result<Self, StudentError> {
        let code = checked_field(&code.into(), "code")?;
        let name = checked_field(&name.into(), "name")?;
        check_marks(&marks)?;
        Ok(Self { code, name, marks })
    }

    /// Parses a comma-separated list of marks, e.g. `"18, 17,19,88"`.
    ///
    /// # Errors
    ///
    /// Returns `StudentError::InvalidMarks` if any entry is not an integer in
    /// `0..=MAX_MARK` or the list is empty.
    pub fn parse_marks(raw: &str) -> Result<Vec<u32>, StudentError> {
        let invalid = || StudentError::InvalidMarks {
            raw: raw.to_string(),
        };
        if raw.trim().is_empty() {
            return Err(invalid());
        }
        raw.split(',')
            .map(|part| {
                part.trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|mark| *mark <= MAX_MARK)
                    .ok_or_else(invalid)
            })
            .collect()
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn marks(&self) -> &[u32] {
        &self.marks
    }

    /// True if `query` equals this student's name or code.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        self.name == query || self.code == query
    }

    /// # Errors
    ///
    /// Returns `StudentError::MissingField` if the name is blank, or
    /// `StudentError::InvalidCharacter` if it contains a comma or line break.
    pub fn rename(&mut self, name: &str) -> Result<(), StudentError> {
        self.name = checked_field(name, "name")?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StudentError::InvalidMarks` if `marks` is empty or a mark
    /// exceeds `MAX_MARK`.
    pub fn set_marks(&mut self, marks: Vec<u32>) -> Result<(), StudentError> {
        check_marks(&marks)?;
        self.marks = marks;
        Ok(())
    }

    #[must_use]
    pub fn stats(&self) -> StudentStats {
        let (exam, coursework) = match self.marks.split_last() {
            Some((exam, coursework)) => (*exam, coursework.iter().copied().map(u64::from).sum()),
            None => (0, 0),
        };
        #[allow(clippy::cast_precision_loss)]
        let total = (coursework + u64::from(exam)) as f64;
        let percentage = round2(total * 100.0 / f64::from(TOTAL_AVAILABLE_MARKS));
        StudentStats {
            coursework,
            exam,
            percentage,
            grade: StudentGrade::from_percentage(percentage),
        }
    }

    #[must_use]
    pub fn percentage(&self) -> f64 {
        self.stats().percentage
    }
}

fn checked_field(raw: &str, field: &'static str) -> Result<String, StudentError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(StudentError::MissingField { field });
    }
    if value.contains([',', '\n', '\r']) {
        return Err(StudentError::InvalidCharacter { field });
    }
    Ok(value.to_string())
}

fn check_marks(marks: &[u32]) -> Result<(), StudentError> {
    if marks.is_empty() || marks.iter().any(|mark| *mark > MAX_MARK) {
        let raw = marks.iter().map(u32::to_string).collect::<Vec<_>>().join(",");
        return Err(StudentError::InvalidMarks { raw });
    }
    Ok(())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

//
// ─── ROSTER ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Ordered list of students with the lookups the manager needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    students: Vec<StudentRecord>,
}

impl Roster {
    #[must_use]
    pub fn new(students: Vec<StudentRecord>) -> Self {
        Self { students }
    }

    #[must_use]
    pub fn students(&self) -> &[StudentRecord] {
        &self.students
    }

    #[must_use]
    pub fn into_students(self) -> Vec<StudentRecord> {
        self.students
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    #[must_use]
    pub fn find(&self, query: &str) -> Option<&StudentRecord> {
        self.students.iter().find(|s| s.matches(query))
    }

    /// Mean percentage rounded to two places; `0.0` for an empty roster.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_percentage(&self) -> f64 {
        if self.students.is_empty() {
            return 0.0;
        }
        let total: f64 = self.students.iter().map(StudentRecord::percentage).sum();
        round2(total / self.students.len() as f64)
    }

    /// First student with the highest percentage.
    #[must_use]
    pub fn highest(&self) -> Option<&StudentRecord> {
        self.students.iter().reduce(|best, s| {
            if s.percentage() > best.percentage() { s } else { best }
        })
    }

    /// First student with the lowest percentage.
    #[must_use]
    pub fn lowest(&self) -> Option<&StudentRecord> {
        self.students.iter().reduce(|worst, s| {
            if s.percentage() < worst.percentage() { s } else { worst }
        })
    }

    /// Stable sort by percentage.
    pub fn sort(&mut self, order: SortOrder) {
        self.students.sort_by(|a, b| {
            let ord = a
                .percentage()
                .partial_cmp(&b.percentage())
                .unwrap_or(Ordering::Equal);
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });
    }

    /// # Errors
    ///
    /// Returns `StudentError::DuplicateCode` if the code is already taken.
    pub fn add(&mut self, record: StudentRecord) -> Result<(), StudentError> {
        if self.students.iter().any(|s| s.code == record.code) {
            return Err(StudentError::DuplicateCode { code: record.code });
        }
        self.students.push(record);
        Ok(())
    }

    /// Removes the first student matching `query` by name or code.
    ///
    /// # Errors
    ///
    /// Returns `StudentError::NotFound` if nobody matches.
    pub fn remove(&mut self, query: &str) -> Result<StudentRecord, StudentError> {
        let index = self
            .students
            .iter()
            .position(|s| s.matches(query))
            .ok_or_else(|| StudentError::NotFound {
                query: query.to_string(),
            })?;
        Ok(self.students.remove(index))
    }

    /// Mutable access to the first student matching `query`.
    ///
    /// # Errors
    ///
    /// Returns `StudentError::NotFound` if nobody matches.
    pub fn find_mut(&mut self, query: &str) -> Result<&mut StudentRecord, StudentError> {
        self.students
            .iter_mut()
            .find(|s| s.matches(query))
            .ok_or_else(|| StudentError::NotFound {
                query: query.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str, name: &str, marks: &[u32]) -> StudentRecord {
        StudentRecord::new(code, name, marks.to_vec()).unwrap()
    }

    #[test]
    fn stats_split_coursework_and_exam() {
        let s = record("1345", "John Curry", &[8, 15, 7, 45]);
        let stats = s.stats();
        assert_eq!(stats.coursework, 30);
        assert_eq!(stats.exam, 45);
        assert_eq!(stats.percentage, 46.88);
        assert_eq!(stats.grade, StudentGrade::D);
    }

    #[test]
    fn marks_above_the_cap_are_rejected() {
        assert!(matches!(
            StudentRecord::parse_marks("4000000000,4000000000"),
            Err(StudentError::InvalidMarks { .. })
        ));
        assert!(StudentRecord::parse_marks("160,0").is_ok());
        assert!(StudentRecord::parse_marks("161").is_err());
        assert!(matches!(
            StudentRecord::new("1", "Big", vec![u32::MAX, u32::MAX]),
            Err(StudentError::InvalidMarks { .. })
        ));
        let mut student = record("1", "Ann", &[10]);
        assert!(student.set_marks(vec![500]).is_err());
        assert_eq!(student.marks(), &[10]);
    }

    #[test]
    fn many_maximum_marks_do_not_overflow() {
        let stats = record("1", "Max", &[MAX_MARK; 64]).stats();
        assert_eq!(stats.coursework, u64::from(MAX_MARK) * 63);
        assert_eq!(stats.percentage, 6400.0);
        assert_eq!(stats.grade, StudentGrade::A);
    }

    #[test]
    fn grade_thresholds() {
        assert_eq!(StudentGrade::from_percentage(70.0), StudentGrade::A);
        assert_eq!(StudentGrade::from_percentage(69.99), StudentGrade::B);
        assert_eq!(StudentGrade::from_percentage(60.0), StudentGrade::B);
        assert_eq!(StudentGrade::from_percentage(50.0), StudentGrade::C);
        assert_eq!(StudentGrade::from_percentage(40.0), StudentGrade::D);
        assert_eq!(StudentGrade::from_percentage(39.99), StudentGrade::F);
    }

    #[test]
    fn single_mark_is_exam_only() {
        let stats = record("1", "Solo", &[80]).stats();
        assert_eq!(stats.coursework, 0);
        assert_eq!(stats.exam, 80);
        assert_eq!(stats.percentage, 50.0);
    }

    #[test]
    fn parse_marks_accepts_spaces_and_rejects_garbage() {
        assert_eq!(
            StudentRecord::parse_marks("18, 17,19 ,88").unwrap(),
            vec![18, 17, 19, 88]
        );
        assert!(matches!(
            StudentRecord::parse_marks("18,x"),
            Err(StudentError::InvalidMarks { .. })
        ));
        assert!(StudentRecord::parse_marks("").is_err());
        assert!(StudentRecord::parse_marks("-4").is_err());
    }

    #[test]
    fn new_rejects_blank_fields() {
        assert_eq!(
            StudentRecord::new(" ", "Ann", vec![1]).unwrap_err(),
            StudentError::MissingField { field: "code" }
        );
        assert_eq!(
            StudentRecord::new("1", "", vec![1]).unwrap_err(),
            StudentError::MissingField { field: "name" }
        );
    }

    #[test]
    fn fields_that_would_split_a_line_are_rejected() {
        assert_eq!(
            StudentRecord::new("1", "Smith, John", vec![10, 20]).unwrap_err(),
            StudentError::InvalidCharacter { field: "name" }
        );
        assert_eq!(
            StudentRecord::new("1\n2", "Ann", vec![10]).unwrap_err(),
            StudentError::InvalidCharacter { field: "code" }
        );
        let mut student = record("1", "Ann", &[10]);
        assert_eq!(
            student.rename("Ann\rLee").unwrap_err(),
            StudentError::InvalidCharacter { field: "name" }
        );
        assert_eq!(student.name(), "Ann");
    }

    #[test]
    fn roster_lookup_extremes_and_average() {
        let roster = Roster::new(vec![
            record("1", "Low", &[1, 1, 1, 10]),
            record("2", "High", &[20, 20, 20, 100]),
            record("3", "Mid", &[10, 10, 10, 50]),
        ]);
        assert_eq!(roster.find("High").unwrap().code(), "2");
        assert_eq!(roster.find("3").unwrap().name(), "Mid");
        assert!(roster.find("nobody").is_none());
        assert_eq!(roster.highest().unwrap().name(), "High");
        assert_eq!(roster.lowest().unwrap().name(), "Low");
        // 8.13 + 100.0 + 50.0
        assert_eq!(roster.average_percentage(), 52.71);
    }

    #[test]
    fn empty_roster_has_no_extremes() {
        let roster = Roster::default();
        assert!(roster.highest().is_none());
        assert!(roster.lowest().is_none());
        assert_eq!(roster.average_percentage(), 0.0);
    }

    #[test]
    fn sort_orders_by_percentage() {
        let mut roster = Roster::new(vec![
            record("1", "B", &[50]),
            record("2", "A", &[100]),
            record("3", "C", &[10]),
        ]);
        roster.sort(SortOrder::Ascending);
        let names: Vec<_> = roster.students().iter().map(StudentRecord::name).collect();
        assert_eq!(names, ["C", "B", "A"]);
        roster.sort(SortOrder::Descending);
        let names: Vec<_> = roster.students().iter().map(StudentRecord::name).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn add_remove_and_update() {
        let mut roster = Roster::default();
        roster.add(record("1", "Ann", &[10, 20])).unwrap();
        let err = roster.add(record("1", "Other", &[1])).unwrap_err();
        assert!(matches!(err, StudentError::DuplicateCode { .. }));

        let student = roster.find_mut("Ann").unwrap();
        student.rename("Anne").unwrap();
        student.set_marks(vec![5, 5]).unwrap();
        assert_eq!(roster.find("1").unwrap().name(), "Anne");

        let removed = roster.remove("Anne").unwrap();
        assert_eq!(removed.code(), "1");
        assert!(roster.is_empty());
        assert!(matches!(
            roster.remove("Anne"),
            Err(StudentError::NotFound { .. })
        ));
    }
}
