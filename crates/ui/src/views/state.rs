use dioxus::prelude::*;
use services::{JokeServiceError, RecipeError, StudentServiceError};
use toybox_core::model::JokeError;

/// User-facing failure, already reduced to something a dialog can show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    NoJokes,
    Storage,
    Network,
    /// A validation message from the domain, shown as-is.
    Input(String),
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            ViewError::Unknown => "Something went wrong. Please try again.",
            ViewError::NoJokes => "No jokes found. Add some to the jokes file and restart.",
            ViewError::Storage => "Could not read or write the data file.",
            ViewError::Network => "Could not reach the recipe service.",
            ViewError::Input(message) => message,
        }
    }
}

impl From<&StudentServiceError> for ViewError {
    fn from(err: &StudentServiceError) -> Self {
        match err {
            StudentServiceError::Student(inner) => ViewError::Input(inner.to_string()),
            StudentServiceError::Storage(_) => ViewError::Storage,
            _ => ViewError::Unknown,
        }
    }
}

impl From<&JokeServiceError> for ViewError {
    fn from(err: &JokeServiceError) -> Self {
        match err {
            JokeServiceError::Joke(JokeError::Empty) => ViewError::NoJokes,
            JokeServiceError::Storage(_) => ViewError::Storage,
            _ => ViewError::Unknown,
        }
    }
}

impl From<&RecipeError> for ViewError {
    fn from(err: &RecipeError) -> Self {
        match err {
            RecipeError::EmptyQuery => ViewError::Input(err.to_string()),
            RecipeError::Http(_) | RecipeError::HttpStatus(_) | RecipeError::Decode(_) => {
                ViewError::Network
            }
            _ => ViewError::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::StorageError;
    use toybox_core::model::StudentError;

    #[test]
    fn student_errors_keep_their_message() {
        let err = StudentServiceError::Student(StudentError::NotFound {
            query: "x".into(),
        });
        assert_eq!(ViewError::from(&err).message(), "Student not found.");

        let err = StudentServiceError::Storage(StorageError::Io("denied".into()));
        assert_eq!(ViewError::from(&err), ViewError::Storage);
    }

    #[test]
    fn empty_joke_book_maps_to_notice() {
        let err = JokeServiceError::Joke(JokeError::Empty);
        assert_eq!(ViewError::from(&err), ViewError::NoJokes);
    }

    #[test]
    fn empty_recipe_query_is_input_error() {
        assert_eq!(
            ViewError::from(&RecipeError::EmptyQuery).message(),
            "Please enter something to search!"
        );
    }
}
