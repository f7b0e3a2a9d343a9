//! Line format for the student records file: `code,name,mark1,...,markN`.

use toybox_core::model::StudentRecord;

/// Why a line was not turned into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineIssue {
    /// Fewer than three comma-separated fields.
    TooFewFields,
    /// A mark is not a non-negative integer, or code/name is blank.
    Invalid(String),
}

/// Parses one line. Blank lines and short lines yield `Err(TooFewFields)`.
///
/// # Errors
///
/// Returns a `LineIssue` describing why the line was rejected.
pub fn parse_line(line: &str) -> Result<StudentRecord, LineIssue> {
    let parts: Vec<&str> = line.trim().split(',').collect();
    if parts.len() < 3 {
        return Err(LineIssue::TooFewFields);
    }

    let marks = StudentRecord::parse_marks(&parts[2..].join(","))
        .map_err(|e| LineIssue::Invalid(e.to_string()))?;
    StudentRecord::new(parts[0], parts[1], marks).map_err(|e| LineIssue::Invalid(e.to_string()))
}

#[must_use]
pub fn format_line(record: &StudentRecord) -> String {
    let marks = record
        .marks()
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("{},{},{marks}", record.code(), record.name())
}

/// Parsed file contents plus the 1-based line numbers that were skipped as invalid.
#[derive(Debug, Default)]
pub struct ParsedFile {
    pub records: Vec<StudentRecord>,
    pub invalid_lines: Vec<(usize, String)>,
}

/// Parses the whole file. Short lines are dropped silently; lines with
/// unreadable marks are reported in `invalid_lines`.
#[must_use]
pub fn parse_file(text: &str) -> ParsedFile {
    let mut parsed = ParsedFile::default();
    for (idx, line) in text.lines().enumerate() {
        match parse_line(line) {
            Ok(record) => parsed.records.push(record),
            Err(LineIssue::TooFewFields) => {}
            Err(LineIssue::Invalid(reason)) => parsed.invalid_lines.push((idx + 1, reason)),
        }
    }
    parsed
}

#[must_use]
pub fn format_file(records: &[StudentRecord]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&format_line(record));
        out.push('\n');
    }
    out
}
