use thiserror::Error;

use crate::model::quiz::QuizError;
use crate::model::{JokeError, MealError, StudentError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Joke(#[from] JokeError),
    #[error(transparent)]
    Student(#[from] StudentError),
    #[error(transparent)]
    Meal(#[from] MealError),
}
