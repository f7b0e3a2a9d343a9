use std::num::IntErrorKind;

use rand::Rng;
use thiserror::Error;

use super::{Difficulty, Problem, Rank};

/// Number of problems in every quiz session.
pub const PROBLEMS_PER_SESSION: usize = 10;
/// Points for a correct answer on the first attempt.
pub const FIRST_TRY_POINTS: u32 = 10;
/// Points for a correct answer on the second attempt.
pub const SECOND_TRY_POINTS: u32 = 5;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    /// The answer is not an integer. Recoverable: the player re-enters it.
    #[error("Invalid input")]
    InvalidInput { raw: String },

    #[error("the current problem is not accepting answers")]
    NotAcceptingInput,

    #[error("the current problem has not been resolved")]
    NotResolved,

    #[error("a session needs exactly {expected} problems, got {got}")]
    WrongProblemCount { expected: usize, got: usize },

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
}

//
// ─── OUTCOMES ─────────────────────────────────────────────────────────────────
//

/// How a single problem ended up.
///
/// `Missed` (answered wrong twice) and `Pending` (never reached) both score
/// zero but stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProblemOutcome {
    #[default]
    Pending,
    FirstTry,
    SecondTry,
    Missed,
}

impl ProblemOutcome {
    #[must_use]
    pub fn points(self) -> u32 {
        match self {
            ProblemOutcome::FirstTry => FIRST_TRY_POINTS,
            ProblemOutcome::SecondTry => SECOND_TRY_POINTS,
            ProblemOutcome::Pending | ProblemOutcome::Missed => 0,
        }
    }

    #[must_use]
    pub fn is_resolved(self) -> bool {
        !matches!(self, ProblemOutcome::Pending)
    }
}

/// Result of submitting an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing changed.
    Ignored,
    /// Correct answer; the problem is resolved.
    Correct { points: u32 },
    /// Wrong first attempt; one retry left.
    Retry,
    /// Wrong second attempt; the problem is resolved with no points.
    Missed { expected: i64 },
}

impl SubmitOutcome {
    /// True when the current problem is now resolved and the session should advance.
    #[must_use]
    pub fn resolves(self) -> bool {
        matches!(self, SubmitOutcome::Correct { .. } | SubmitOutcome::Missed { .. })
    }

    /// Feedback line for the player.
    #[must_use]
    pub fn message(self) -> Option<String> {
        match self {
            SubmitOutcome::Ignored => None,
            SubmitOutcome::Correct { points } => Some(format!("✓ Correct! +{points} points")),
            SubmitOutcome::Retry => Some("✗ Incorrect, Try again!".to_string()),
            SubmitOutcome::Missed { expected } => Some(format!("✗ Wrong! Answer: {expected}")),
        }
    }
}

/// Result of moving past a resolved problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Next { index: usize },
    Finished { score: u32, rank: Rank },
}

/// Where the player is within the current problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    AwaitingFirstAttempt,
    AwaitingSecondAttempt,
    /// Problem resolved; feedback is on screen until `advance`.
    ShowingFeedback,
    Finished,
}

//
// ─── SESSION ──────────────────────────────────────────────────────────────────
//

/// One run of ten problems, from the first question to the results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    difficulty: Difficulty,
    problems: Vec<Problem>,
    outcomes: Vec<ProblemOutcome>,
    current: usize,
    attempts: u8,
    score: u32,
    phase: QuizPhase,
}

impl QuizSession {
    /// Generates a fresh batch of problems for the given tier.
    pub fn start<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Self {
        let problems = (0..PROBLEMS_PER_SESSION)
            .map(|_| Problem::random(difficulty, rng))
            .collect();
        Self::with_problems(difficulty, problems)
    }

    /// Builds a session from explicit problems.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::WrongProblemCount` unless exactly ten problems are given.
    pub fn from_problems(
        difficulty: Difficulty,
        problems: Vec<Problem>,
    ) -> Result<Self, QuizError> {
        if problems.len() != PROBLEMS_PER_SESSION {
            return Err(QuizError::WrongProblemCount {
                expected: PROBLEMS_PER_SESSION,
                got: problems.len(),
            });
        }
        Ok(Self::with_problems(difficulty, problems))
    }

    fn with_problems(difficulty: Difficulty, problems: Vec<Problem>) -> Self {
        Self {
            difficulty,
            outcomes: vec![ProblemOutcome::Pending; problems.len()],
            problems,
            current: 0,
            attempts: 0,
            score: 0,
            phase: QuizPhase::AwaitingFirstAttempt,
        }
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    #[must_use]
    pub fn outcomes(&self) -> &[ProblemOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_problem(&self) -> &Problem {
        &self.problems[self.current]
    }

    #[must_use]
    pub fn attempts(&self) -> u8 {
        self.attempts
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == QuizPhase::Finished
    }

    /// Whether an answer can be submitted right now.
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        matches!(
            self.phase,
            QuizPhase::AwaitingFirstAttempt | QuizPhase::AwaitingSecondAttempt
        )
    }

    #[must_use]
    pub fn rank(&self) -> Rank {
        Rank::from_score(self.score)
    }

    /// e.g. `"Question 3/10"`.
    #[must_use]
    pub fn progress_label(&self) -> String {
        format!("Question {}/{}", self.current + 1, self.problems.len())
    }

    /// Fraction of the session reached, counting the current problem.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_fraction(&self) -> f64 {
        (self.current + 1) as f64 / self.problems.len() as f64
    }

    /// Applies the two-attempt rule to an answer for the current problem.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidInput` if the answer is not an integer; the
    /// attempt is not counted.
    /// Returns `QuizError::NotAcceptingInput` if the problem is already resolved
    /// or the session has finished.
    pub fn submit(&mut self, raw: &str) -> Result<SubmitOutcome, QuizError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(SubmitOutcome::Ignored);
        }
        if !self.accepts_input() {
            return Err(QuizError::NotAcceptingInput);
        }

        let expected = self.current_problem().expected();
        // An integer too large for i64 is still an integer, just a wrong one.
        let correct = match trimmed.parse::<i64>() {
            Ok(answer) => answer == expected,
            Err(err) if matches!(err.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                false
            }
            Err(_) => {
                return Err(QuizError::InvalidInput {
                    raw: raw.to_string(),
                });
            }
        };
        let first_attempt = self.attempts == 0;

        let outcome = match (correct, first_attempt) {
            (true, true) => self.resolve(ProblemOutcome::FirstTry),
            (true, false) => self.resolve(ProblemOutcome::SecondTry),
            (false, true) => {
                self.attempts = 1;
                self.phase = QuizPhase::AwaitingSecondAttempt;
                SubmitOutcome::Retry
            }
            (false, false) => {
                self.resolve(ProblemOutcome::Missed);
                SubmitOutcome::Missed { expected }
            }
        };

        Ok(outcome)
    }

    fn resolve(&mut self, outcome: ProblemOutcome) -> SubmitOutcome {
        let points = outcome.points();
        self.outcomes[self.current] = outcome;
        self.score += points;
        self.phase = QuizPhase::ShowingFeedback;
        SubmitOutcome::Correct { points }
    }

    /// Moves to the next problem, or finishes after the last one.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotResolved` if the current problem is still open
    /// or the session has already finished.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, QuizError> {
        if self.phase != QuizPhase::ShowingFeedback {
            return Err(QuizError::NotResolved);
        }

        self.attempts = 0;
        if self.current + 1 < self.problems.len() {
            self.current += 1;
            self.phase = QuizPhase::AwaitingFirstAttempt;
            Ok(AdvanceOutcome::Next {
                index: self.current,
            })
        } else {
            self.phase = QuizPhase::Finished;
            Ok(AdvanceOutcome::Finished {
                score: self.score,
                rank: self.rank(),
            })
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
