mod joke_vm;
mod notice;
mod quiz_vm;
mod recipe_vm;
mod student_vm;

pub use joke_vm::JokeVm;
pub use notice::Notice;
pub use quiz_vm::{DifficultyOptionVm, MessageTone, PlayingVm, QuizVm, ResultsVm, map_quiz};
pub use recipe_vm::{
    BrowseKind, BrowseVm, RecipeDetailVm, RecipeStatus, map_recipe_results,
};
pub use student_vm::{StudentDialog, StudentFormInput, StudentRowVm, map_student_rows};
