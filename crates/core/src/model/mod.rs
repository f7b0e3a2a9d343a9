mod joke;
mod meal;
pub mod quiz;
mod student;

pub use joke::{Joke, JokeBook, JokeError};
pub use meal::{
    Area, Category, Ingredient, IngredientName, Meal, MealError, MealId, SearchKind,
    SearchQuery,
};
pub use quiz::{
    AdvanceOutcome, Difficulty, Operator, Problem, ProblemOutcome, QuizError, QuizPhase,
    QuizSession, Rank, SubmitOutcome,
};
pub use student::{
    Roster, SortOrder, StudentError, StudentGrade, StudentRecord, StudentStats,
    MAX_MARK, TOTAL_AVAILABLE_MARKS,
};
