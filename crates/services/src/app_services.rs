use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use storage::repository::{Storage, StudentRepository};
use toybox_core::model::JokeBook;

use crate::error::{JokeServiceError, RecipeError, StudentServiceError};
use crate::jokes::JokeService;
use crate::quiz::{DEFAULT_FEEDBACK_DELAY, QuizController};
use crate::recipes::{MealDbClient, MealDbConfig};
use crate::students::StudentService;

/// Where each app keeps its data and how the network client behaves.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub feedback_delay: Duration,
    pub jokes_file: PathBuf,
    pub students_file: PathBuf,
    pub mealdb: MealDbConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feedback_delay: DEFAULT_FEEDBACK_DELAY,
            jokes_file: PathBuf::from("randomJokes.txt"),
            students_file: PathBuf::from("studentMarks.txt"),
            mealdb: MealDbConfig::default(),
        }
    }
}

/// Builds the app-facing services from storage and config.
///
/// Each desktop app asks only for the service it uses, so a missing jokes
/// file does not stop the quiz from starting.
#[derive(Clone)]
pub struct AppServices {
    config: AppConfig,
    storage: Storage,
}

impl AppServices {
    /// Services backed by flat files at the configured paths.
    #[must_use]
    pub fn from_config(config: AppConfig) -> Self {
        let storage = Storage::flat_file(&config.students_file, &config.jokes_file);
        Self { config, storage }
    }

    /// Services over caller-provided storage, for tests.
    #[must_use]
    pub fn with_storage(config: AppConfig, storage: Storage) -> Self {
        Self { config, storage }
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The records store the student manager reads and writes.
    #[must_use]
    pub fn student_repository(&self) -> Arc<dyn StudentRepository> {
        Arc::clone(&self.storage.students)
    }

    #[must_use]
    pub fn quiz(&self) -> QuizController {
        QuizController::new(self.config.feedback_delay)
    }

    #[must_use]
    pub fn joke_service(&self) -> JokeService {
        JokeService::new(Arc::clone(&self.storage.jokes))
    }

    /// # Errors
    ///
    /// Returns `JokeServiceError` if the jokes cannot be read or there are none.
    pub async fn joke_book(&self) -> Result<JokeBook, JokeServiceError> {
        self.joke_service().load_book().await
    }

    /// # Errors
    ///
    /// Returns `StudentServiceError::Storage` if the records cannot be read.
    pub async fn students(&self) -> Result<Arc<StudentService>, StudentServiceError> {
        let service = StudentService::load(Arc::clone(&self.storage.students)).await?;
        Ok(Arc::new(service))
    }

    /// # Errors
    ///
    /// Returns `RecipeError` if the configured base URL is invalid.
    pub fn recipes(&self) -> Result<Arc<MealDbClient>, RecipeError> {
        Ok(Arc::new(MealDbClient::new(&self.config.mealdb)?))
    }
}
