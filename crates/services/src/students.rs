use std::sync::Arc;

use storage::repository::StudentRepository;
use tokio::sync::Mutex;
use toybox_core::model::{Roster, SortOrder, StudentError, StudentGrade, StudentRecord};
use tracing::{debug, info};

use crate::error::StudentServiceError;

/// Presentation-ready figures for one student.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRow {
    pub name: String,
    pub code: String,
    pub coursework: u64,
    pub exam: u32,
    pub percentage: f64,
    pub grade: StudentGrade,
}

impl StudentRow {
    #[must_use]
    pub fn from_record(record: &StudentRecord) -> Self {
        let stats = record.stats();
        Self {
            name: record.name().to_string(),
            code: record.code().to_string(),
            coursework: stats.coursework,
            exam: stats.exam,
            percentage: stats.percentage,
            grade: stats.grade,
        }
    }

    /// Percentage as displayed, e.g. `46.88` or `50.0`.
    #[must_use]
    pub fn percentage_text(&self) -> String {
        format_percentage(self.percentage)
    }

    /// Multi-line summary used by the view, highest and lowest dialogs.
    #[must_use]
    pub fn detail_text(&self) -> String {
        format!(
            "Name: {}\nCode: {}\nCoursework: {}\nExam: {}\n%: {}\nGrade: {}",
            self.name,
            self.code,
            self.coursework,
            self.exam,
            self.percentage_text(),
            self.grade
        )
    }
}

/// Rows plus the status line, in current display order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StudentTable {
    pub rows: Vec<StudentRow>,
    pub status: String,
}

fn format_percentage(value: f64) -> String {
    // Debug keeps the trailing `.0` on whole numbers.
    format!("{value:?}")
}

fn status_line(roster: &Roster) -> String {
    let average = if roster.is_empty() {
        "0".to_string()
    } else {
        format_percentage(roster.average_percentage())
    };
    format!("Students: {} | Avg %: {average}", roster.len())
}

/// Student manager: an in-memory roster that writes through on every change.
///
/// Sorting only reorders the in-memory list; add, delete and update save the
/// whole file. A failed save leaves the roster unchanged.
pub struct StudentService {
    repo: Arc<dyn StudentRepository>,
    roster: Mutex<Roster>,
}

impl StudentService {
    /// Loads the roster from `repo`.
    ///
    /// # Errors
    ///
    /// Returns `StudentServiceError::Storage` if the records cannot be read.
    pub async fn load(repo: Arc<dyn StudentRepository>) -> Result<Self, StudentServiceError> {
        let students = repo.load_students().await?;
        info!(count = students.len(), "student roster loaded");
        Ok(Self {
            repo,
            roster: Mutex::new(Roster::new(students)),
        })
    }

    pub async fn table(&self) -> StudentTable {
        let roster = self.roster.lock().await;
        StudentTable {
            rows: roster.students().iter().map(StudentRow::from_record).collect(),
            status: status_line(&roster),
        }
    }

    /// # Errors
    ///
    /// Returns `StudentError::NotFound` if no name or code matches.
    pub async fn find(&self, query: &str) -> Result<StudentRow, StudentServiceError> {
        let roster = self.roster.lock().await;
        roster
            .find(query)
            .map(StudentRow::from_record)
            .ok_or_else(|| not_found(query))
    }

    pub async fn highest(&self) -> Option<StudentRow> {
        self.roster.lock().await.highest().map(StudentRow::from_record)
    }

    pub async fn lowest(&self) -> Option<StudentRow> {
        self.roster.lock().await.lowest().map(StudentRow::from_record)
    }

    pub async fn sort(&self, order: SortOrder) {
        self.roster.lock().await.sort(order);
        debug!(?order, "students sorted");
    }

    /// Adds a student from raw form input; `marks` is comma-separated.
    ///
    /// # Errors
    ///
    /// Returns `StudentError::InvalidMarks`, `MissingField`, `InvalidCharacter` or `DuplicateCode`
    /// for bad input, or `StudentServiceError::Storage` if saving fails.
    pub async fn add(
        &self,
        code: &str,
        name: &str,
        marks: &str,
    ) -> Result<StudentRow, StudentServiceError> {
        let record = StudentRecord::new(code, name, StudentRecord::parse_marks(marks)?)?;
        let row = StudentRow::from_record(&record);

        let mut roster = self.roster.lock().await;
        let mut next = roster.clone();
        next.add(record)?;
        self.commit(&mut roster, next).await?;
        info!(code = %row.code, "student added");
        Ok(row)
    }

    /// Deletes the first student whose name or code matches.
    ///
    /// # Errors
    ///
    /// Returns `StudentError::NotFound` or a storage error.
    pub async fn delete(&self, query: &str) -> Result<StudentRow, StudentServiceError> {
        let mut roster = self.roster.lock().await;
        let mut next = roster.clone();
        let removed = next.remove(query)?;
        self.commit(&mut roster, next).await?;
        info!(code = removed.code(), "student deleted");
        Ok(StudentRow::from_record(&removed))
    }

    /// Updates name and/or marks; blank inputs keep the current value.
    ///
    /// Both inputs are validated before anything changes.
    ///
    /// # Errors
    ///
    /// Returns `StudentError::NotFound`, `StudentError::InvalidMarks` or a storage error.
    pub async fn update(
        &self,
        query: &str,
        new_name: &str,
        new_marks: &str,
    ) -> Result<StudentRow, StudentServiceError> {
        let marks = if new_marks.trim().is_empty() {
            None
        } else {
            Some(StudentRecord::parse_marks(new_marks)?)
        };

        let mut roster = self.roster.lock().await;
        let mut next = roster.clone();
        let record = next.find_mut(query)?;
        if !new_name.trim().is_empty() {
            record.rename(new_name)?;
        }
        if let Some(marks) = marks {
            record.set_marks(marks)?;
        }
        let row = StudentRow::from_record(record);

        self.commit(&mut roster, next).await?;
        info!(code = %row.code, "student updated");
        Ok(row)
    }

    async fn commit(&self, roster: &mut Roster, next: Roster) -> Result<(), StudentServiceError> {
        self.repo.save_students(next.students()).await?;
        *roster = next;
        Ok(())
    }
}

fn not_found(query: &str) -> StudentServiceError {
    StudentError::NotFound {
        query: query.to_string(),
    }
    .into()
}
