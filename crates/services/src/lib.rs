#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod jokes;
pub mod quiz;
pub mod recipes;
pub mod students;

pub use app_services::{AppConfig, AppServices};
pub use error::{JokeServiceError, RecipeError, StudentServiceError};
pub use jokes::{JokeService, JokeTeller, TellerState};
pub use quiz::{
    AdvanceDelay, AdvanceResult, AdvanceTicket, AdvanceTimer, QuizController, QuizScreen,
    SubmitReport,
};
pub use recipes::{MealDbClient, MealDbConfig};
pub use students::{StudentRow, StudentService, StudentTable};
