mod controller;
mod timer;

pub use controller::{AdvanceResult, QuizController, QuizScreen, SubmitReport};
pub use timer::{AdvanceDelay, AdvanceTicket, AdvanceTimer, DEFAULT_FEEDBACK_DELAY};
