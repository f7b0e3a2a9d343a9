mod jokes;
mod quiz;
mod recipes;
mod state;
mod students;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use jokes::JokesView;
pub use quiz::QuizView;
pub use recipes::RecipesView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use students::StudentsView;
