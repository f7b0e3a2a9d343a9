use services::{StudentRow, StudentTable};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentRowVm {
    pub name: String,
    pub code: String,
    pub coursework: u64,
    pub exam: u32,
    pub percentage: String,
    pub grade: String,
    /// `"even"` or `"odd"`, for striped rows.
    pub stripe: &'static str,
}

impl StudentRowVm {
    fn from_row(index: usize, row: &StudentRow) -> Self {
        Self {
            name: row.name.clone(),
            code: row.code.clone(),
            coursework: row.coursework,
            exam: row.exam,
            percentage: row.percentage_text(),
            grade: row.grade.to_string(),
            stripe: if index % 2 == 0 { "even" } else { "odd" },
        }
    }
}

#[must_use]
pub fn map_student_rows(table: &StudentTable) -> Vec<StudentRowVm> {
    table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| StudentRowVm::from_row(i, row))
        .collect()
}

/// Which input dialog is open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudentDialog {
    Find,
    Sort,
    Add,
    Delete,
    Update,
}

impl StudentDialog {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            StudentDialog::Find => "Select Student",
            StudentDialog::Sort => "Sort",
            StudentDialog::Add => "Add",
            StudentDialog::Delete => "Delete",
            StudentDialog::Update => "Update",
        }
    }

    #[must_use]
    pub fn asks_for_query(self) -> bool {
        matches!(
            self,
            StudentDialog::Find | StudentDialog::Delete | StudentDialog::Update
        )
    }
}

/// Raw text typed into the open dialog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StudentFormInput {
    pub query: String,
    pub code: String,
    pub name: String,
    pub marks: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use toybox_core::model::StudentGrade;

    fn row(name: &str, percentage: f64) -> StudentRow {
        StudentRow {
            name: name.into(),
            code: "1".into(),
            coursework: 30,
            exam: 45,
            percentage,
            grade: StudentGrade::from_percentage(percentage),
        }
    }

    #[test]
    fn rows_are_striped_and_formatted() {
        let table = StudentTable {
            rows: vec![row("Ann", 46.88), row("Ben", 50.0)],
            status: String::new(),
        };
        let rows = map_student_rows(&table);
        assert_eq!(rows[0].stripe, "even");
        assert_eq!(rows[1].stripe, "odd");
        assert_eq!(rows[0].percentage, "46.88");
        assert_eq!(rows[1].percentage, "50.0");
        assert_eq!(rows[0].grade, "D");
    }
}
