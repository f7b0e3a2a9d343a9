pub mod app;
pub mod context;
pub mod vm;
pub mod views;

pub use app::{JokesApp, QuizApp, RecipesApp, StudentsApp};
pub use context::{AppContext, UiApp, build_app_context};
