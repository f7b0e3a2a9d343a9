//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use toybox_core::model::{JokeError, StudentError};

/// Errors emitted by `MealDbClient`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RecipeError {
    #[error("Please enter something to search!")]
    EmptyQuery,
    #[error("recipe request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("unexpected recipe response: {0}")]
    Decode(String),
    #[error("invalid recipe service url: {0}")]
    InvalidBaseUrl(String),
}

impl From<serde_json::Error> for RecipeError {
    fn from(err: serde_json::Error) -> Self {
        RecipeError::Decode(err.to_string())
    }
}

/// Errors emitted by `StudentService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudentServiceError {
    #[error(transparent)]
    Student(#[from] StudentError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `JokeService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JokeServiceError {
    #[error(transparent)]
    Joke(#[from] JokeError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
