use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use toybox_core::model::quiz::{
    AdvanceOutcome, Difficulty, Problem, QuizError, QuizSession, SubmitOutcome,
};
use tracing::debug;

use super::timer::{AdvanceDelay, AdvanceTicket, AdvanceTimer};

/// Which screen of the quiz is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuizScreen {
    #[default]
    Menu,
    Playing,
    Results,
}

/// What happened on submit, plus the delayed advance to await when the problem resolved.
#[derive(Debug)]
pub struct SubmitReport {
    pub outcome: SubmitOutcome,
    pub advance: Option<AdvanceDelay>,
}

/// Result of an `advance_with` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceResult {
    Advanced(AdvanceOutcome),
    /// The ticket belongs to a session or problem that is no longer live.
    Stale,
}

/// Owns the quiz from menu to results, including the feedback timer.
///
/// Every `start` and `play_again` bumps a generation counter and cancels the
/// pending advance, so a delay scheduled for an old session can never move
/// the new one forward.
#[derive(Debug)]
pub struct QuizController {
    screen: QuizScreen,
    session: Option<QuizSession>,
    generation: u64,
    message: Option<String>,
    timer: AdvanceTimer,
    rng: StdRng,
}

impl QuizController {
    #[must_use]
    pub fn new(feedback_delay: Duration) -> Self {
        Self::with_rng(feedback_delay, StdRng::from_os_rng())
    }

    /// Deterministic problem generation for tests and demos.
    #[must_use]
    pub fn with_seed(feedback_delay: Duration, seed: u64) -> Self {
        Self::with_rng(feedback_delay, StdRng::seed_from_u64(seed))
    }

    fn with_rng(feedback_delay: Duration, rng: StdRng) -> Self {
        Self {
            screen: QuizScreen::Menu,
            session: None,
            generation: 0,
            message: None,
            timer: AdvanceTimer::new(feedback_delay),
            rng,
        }
    }

    #[must_use]
    pub fn screen(&self) -> QuizScreen {
        self.screen
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    /// Feedback line for the current problem, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn feedback_delay(&self) -> Duration {
        self.timer.delay()
    }

    #[must_use]
    pub fn advance_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// Starts a fresh session with random problems for `difficulty`.
    pub fn start(&mut self, difficulty: Difficulty) {
        let session = QuizSession::start(difficulty, &mut self.rng);
        self.begin(session);
    }

    /// Starts a session from explicit problems.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::WrongProblemCount` unless exactly ten problems are given.
    pub fn start_with_problems(
        &mut self,
        difficulty: Difficulty,
        problems: Vec<Problem>,
    ) -> Result<(), QuizError> {
        let session = QuizSession::from_problems(difficulty, problems)?;
        self.begin(session);
        Ok(())
    }

    fn begin(&mut self, session: QuizSession) {
        self.timer.cancel();
        self.generation += 1;
        debug!(
            generation = self.generation,
            difficulty = %session.difficulty(),
            "quiz started"
        );
        self.session = Some(session);
        self.message = None;
        self.screen = QuizScreen::Playing;
    }

    /// Submits an answer for the current problem.
    ///
    /// When the answer resolves the problem, the report carries an
    /// `AdvanceDelay`; await it and pass the ticket to `advance_with`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidInput` for non-integer answers (the message
    /// is set to "Invalid input"), or `QuizError::NotAcceptingInput` when no
    /// problem is open.
    pub fn submit(&mut self, raw: &str) -> Result<SubmitReport, QuizError> {
        let session = self.session.as_mut().ok_or(QuizError::NotAcceptingInput)?;
        if self.screen != QuizScreen::Playing {
            return Err(QuizError::NotAcceptingInput);
        }

        let outcome = match session.submit(raw) {
            Ok(outcome) => outcome,
            Err(err @ QuizError::InvalidInput { .. }) => {
                self.message = Some(err.to_string());
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        if let Some(message) = outcome.message() {
            self.message = Some(message);
        }

        let advance = if outcome.resolves() {
            let ticket = AdvanceTicket::new(self.generation, session.current_index());
            debug!(
                generation = ticket.generation(),
                index = ticket.index(),
                score = session.score(),
                "problem resolved, advance scheduled"
            );
            Some(self.timer.schedule(ticket))
        } else {
            None
        };

        Ok(SubmitReport { outcome, advance })
    }

    /// Moves past the problem named by `ticket`, if it is still the live one.
    pub fn advance_with(&mut self, ticket: AdvanceTicket) -> AdvanceResult {
        if ticket.generation() != self.generation || self.screen != QuizScreen::Playing {
            debug!(generation = ticket.generation(), "stale advance ignored");
            return AdvanceResult::Stale;
        }
        let Some(session) = self.session.as_mut() else {
            return AdvanceResult::Stale;
        };
        if session.current_index() != ticket.index() {
            return AdvanceResult::Stale;
        }

        match session.advance() {
            Ok(outcome) => {
                self.message = None;
                if let AdvanceOutcome::Finished { score, rank } = outcome {
                    debug!(score, %rank, "quiz finished");
                    self.screen = QuizScreen::Results;
                }
                AdvanceResult::Advanced(outcome)
            }
            Err(_) => AdvanceResult::Stale,
        }
    }

    /// Leaves the results screen for the difficulty menu.
    pub fn play_again(&mut self) {
        self.timer.cancel();
        self.generation += 1;
        self.session = None;
        self.message = None;
        self.screen = QuizScreen::Menu;
    }
}

impl Default for QuizController {
    fn default() -> Self {
        Self::new(super::DEFAULT_FEEDBACK_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toybox_core::model::quiz::{Operator, PROBLEMS_PER_SESSION, Rank};

    fn controller() -> QuizController {
        let mut controller = QuizController::with_seed(Duration::from_millis(1500), 7);
        controller
            .start_with_problems(
                Difficulty::Easy,
                vec![Problem::new(5, 3, Operator::Add); PROBLEMS_PER_SESSION],
            )
            .unwrap();
        controller
    }

    #[test]
    fn starts_on_the_menu() {
        let controller = QuizController::with_seed(Duration::from_millis(10), 1);
        assert_eq!(controller.screen(), QuizScreen::Menu);
        assert!(controller.session().is_none());
    }

    #[test]
    fn start_generates_ten_problems_in_range() {
        let mut controller = QuizController::with_seed(Duration::from_millis(10), 1);
        controller.start(Difficulty::Moderate);
        let session = controller.session().unwrap();
        assert_eq!(session.problems().len(), PROBLEMS_PER_SESSION);
        for problem in session.problems() {
            assert!(Difficulty::Moderate.operand_range().contains(&problem.first()));
            assert!(Difficulty::Moderate.operand_range().contains(&problem.second()));
        }
        assert_eq!(controller.screen(), QuizScreen::Playing);
    }

    #[test]
    fn invalid_input_sets_message_without_counting() {
        let mut controller = controller();
        let err = controller.submit("abc").unwrap_err();
        assert!(matches!(err, QuizError::InvalidInput { .. }));
        assert_eq!(controller.message(), Some("Invalid input"));
        assert_eq!(controller.session().unwrap().attempts(), 0);
    }

    #[test]
    fn retry_does_not_schedule_an_advance() {
        let mut controller = controller();
        let report = controller.submit("9").unwrap();
        assert_eq!(report.outcome, SubmitOutcome::Retry);
        assert!(report.advance.is_none());
        assert_eq!(controller.message(), Some("✗ Incorrect, Try again!"));
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut controller = controller();
        let report = controller.submit("   ").unwrap();
        assert_eq!(report.outcome, SubmitOutcome::Ignored);
        assert!(controller.message().is_none());
    }

    #[test]
    fn stale_ticket_after_restart_is_rejected() {
        let mut controller = controller();
        let ticket = controller.submit("8").unwrap().advance.unwrap().ticket();

        controller.start(Difficulty::Easy);
        assert_eq!(controller.advance_with(ticket), AdvanceResult::Stale);
        assert_eq!(controller.session().unwrap().current_index(), 0);
    }

    #[test]
    fn submit_while_showing_feedback_is_rejected() {
        let mut controller = controller();
        let _pending = controller.submit("8").unwrap();
        assert_eq!(
            controller.submit("8").unwrap_err(),
            QuizError::NotAcceptingInput
        );
    }

    #[tokio::test(start_paused = true)]
    async fn perfect_run_reaches_results() {
        let mut controller = controller();
        for _ in 0..PROBLEMS_PER_SESSION {
            let report = controller.submit("8").unwrap();
            assert_eq!(controller.message(), Some("✓ Correct! +10 points"));
            let ticket = report.advance.unwrap().wait().await.unwrap();
            assert!(matches!(
                controller.advance_with(ticket),
                AdvanceResult::Advanced(_)
            ));
        }

        assert_eq!(controller.screen(), QuizScreen::Results);
        let session = controller.session().unwrap();
        assert_eq!(session.score(), 100);
        assert_eq!(session.rank(), Rank::APlus);

        controller.play_again();
        assert_eq!(controller.screen(), QuizScreen::Menu);
    }

    #[tokio::test(start_paused = true)]
    async fn play_again_cancels_the_pending_advance() {
        let mut controller = controller();
        let delay = controller.submit("8").unwrap().advance.unwrap();
        controller.play_again();
        assert_eq!(delay.wait().await, None);
    }
}
