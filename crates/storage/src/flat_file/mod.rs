use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use toybox_core::model::{Joke, StudentRecord};
use tracing::{debug, info, warn};

use crate::repository::{JokeRepository, StorageError, StudentRepository};

pub mod codec;

/// Student records kept in a comma-separated text file, one record per line.
///
/// A missing file reads as an empty list; saving rewrites the whole file.
#[derive(Debug, Clone)]
pub struct FlatFileStudentRepository {
    path: PathBuf,
}

impl FlatFileStudentRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StudentRepository for FlatFileStudentRepository {
    async fn load_students(&self) -> Result<Vec<StudentRecord>, StorageError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "student file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        let parsed = codec::parse_file(&text);
        for (line, reason) in &parsed.invalid_lines {
            warn!(path = %self.path.display(), line, %reason, "skipping student line");
        }
        info!(
            path = %self.path.display(),
            count = parsed.records.len(),
            "loaded students"
        );
        Ok(parsed.records)
    }

    async fn save_students(&self, students: &[StudentRecord]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, codec::format_file(students)).await?;
        info!(path = %self.path.display(), count = students.len(), "saved students");
        Ok(())
    }
}

/// Jokes read from a UTF-8 text file, one per line; blank lines are skipped.
#[derive(Debug, Clone)]
pub struct FlatFileJokeRepository {
    path: PathBuf,
}

impl FlatFileJokeRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl JokeRepository for FlatFileJokeRepository {
    async fn load_jokes(&self) -> Result<Vec<Joke>, StorageError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => StorageError::NotFound(self.path.display().to_string()),
                ErrorKind::InvalidData => StorageError::Serialization(err.to_string()),
                _ => err.into(),
            })?;
        let jokes: Vec<Joke> = text.lines().filter_map(Joke::parse).collect();
        info!(path = %self.path.display(), count = jokes.len(), "loaded jokes");
        Ok(jokes)
    }
}
