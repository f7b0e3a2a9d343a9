use std::sync::Arc;
use std::time::Duration;

use services::{JokeService, MealDbClient, QuizController, RecipeError, StudentService};
use storage::repository::StudentRepository;
use tracing::warn;

use crate::views::ViewError;

pub trait UiApp: Send + Sync {
    fn feedback_delay(&self) -> Duration;
    fn joke_service(&self) -> JokeService;
    fn student_repository(&self) -> Arc<dyn StudentRepository>;
    fn recipe_client(&self) -> Result<Arc<MealDbClient>, RecipeError>;
}

#[derive(Clone)]
pub struct AppContext {
    feedback_delay: Duration,
    jokes: JokeService,
    students: Arc<dyn StudentRepository>,
    recipes: Result<Arc<MealDbClient>, ViewError>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let recipes = app.recipe_client().map_err(|err| {
            warn!(error = %err, "recipe client unavailable");
            ViewError::from(&err)
        });

        Self {
            feedback_delay: app.feedback_delay(),
            jokes: app.joke_service(),
            students: app.student_repository(),
            recipes,
        }
    }

    #[must_use]
    pub fn feedback_delay(&self) -> Duration {
        self.feedback_delay
    }

    /// A fresh controller on the difficulty menu.
    #[must_use]
    pub fn quiz_controller(&self) -> QuizController {
        QuizController::new(self.feedback_delay)
    }

    #[must_use]
    pub fn joke_service(&self) -> JokeService {
        self.jokes.clone()
    }

    /// # Errors
    ///
    /// Returns `ViewError::Storage` if the records file cannot be read.
    pub async fn load_students(&self) -> Result<Arc<StudentService>, ViewError> {
        let service = StudentService::load(Arc::clone(&self.students))
            .await
            .map_err(|err| {
                warn!(error = %err, "failed to load students");
                ViewError::from(&err)
            })?;
        Ok(Arc::new(service))
    }

    /// # Errors
    ///
    /// Returns the error recorded when the client could not be built.
    pub fn recipe_client(&self) -> Result<Arc<MealDbClient>, ViewError> {
        self.recipes.clone()
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
