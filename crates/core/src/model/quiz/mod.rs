//! Arithmetic quiz engine: problem generation, the two-attempt scoring rule
//! and the final letter rank.

mod grade;
mod problem;
mod session;

pub use grade::Rank;
pub use problem::{Difficulty, Operator, Problem};
pub use session::{
    AdvanceOutcome, FIRST_TRY_POINTS, PROBLEMS_PER_SESSION, ProblemOutcome, QuizError, QuizPhase,
    QuizSession, SECOND_TRY_POINTS, SubmitOutcome,
};

/// Letter rank for a total score. Shorthand for [`Rank::from_score`].
#[must_use]
pub fn grade(score: u32) -> Rank {
    Rank::from_score(score)
}
