use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use toybox_core::model::{Joke, StudentRecord};

use crate::flat_file::{FlatFileJokeRepository, FlatFileStudentRepository};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

/// Repository contract for the student records file.
///
/// The whole list is read and written at once; there is no partial update.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Load every stored student, in file order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    async fn load_students(&self) -> Result<Vec<StudentRecord>, StorageError>;

    /// Replace the stored list with `students`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be written.
    async fn save_students(&self, students: &[StudentRecord]) -> Result<(), StorageError>;
}

/// Source of joke lines, read once at startup.
#[async_trait]
pub trait JokeRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the source does not exist, or other storage errors.
    async fn load_jokes(&self) -> Result<Vec<Joke>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    students: Arc<Mutex<Vec<StudentRecord>>>,
    jokes: Arc<Mutex<Vec<Joke>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_students(students: Vec<StudentRecord>) -> Self {
        Self {
            students: Arc::new(Mutex::new(students)),
            jokes: Arc::default(),
        }
    }

    #[must_use]
    pub fn with_jokes(jokes: Vec<Joke>) -> Self {
        Self {
            students: Arc::default(),
            jokes: Arc::new(Mutex::new(jokes)),
        }
    }
}

#[async_trait]
impl StudentRepository for InMemoryRepository {
    async fn load_students(&self) -> Result<Vec<StudentRecord>, StorageError> {
        let guard = self
            .students
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_students(&self, students: &[StudentRecord]) -> Result<(), StorageError> {
        let mut guard = self
            .students
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        *guard = students.to_vec();
        Ok(())
    }
}

#[async_trait]
impl JokeRepository for InMemoryRepository {
    async fn load_jokes(&self) -> Result<Vec<Joke>, StorageError> {
        let guard = self
            .jokes
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(guard.clone())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub students: Arc<dyn StudentRepository>,
    pub jokes: Arc<dyn JokeRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let students: Arc<dyn StudentRepository> = Arc::new(repo.clone());
        let jokes: Arc<dyn JokeRepository> = Arc::new(repo);
        Self { students, jokes }
    }

    /// Storage backed by plain text files.
    #[must_use]
    pub fn flat_file(students_path: impl Into<PathBuf>, jokes_path: impl Into<PathBuf>) -> Self {
        Self {
            students: Arc::new(FlatFileStudentRepository::new(students_path)),
            jokes: Arc::new(FlatFileJokeRepository::new(jokes_path)),
        }
    }
}
