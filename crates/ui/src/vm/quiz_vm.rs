use services::{QuizController, QuizScreen};
use toybox_core::model::quiz::{Difficulty, PROBLEMS_PER_SESSION, FIRST_TRY_POINTS};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DifficultyOptionVm {
    pub difficulty: Difficulty,
    /// e.g. `"1. Easy"`.
    pub label: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageTone {
    Success,
    Failure,
}

impl MessageTone {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            MessageTone::Success => "quiz-message quiz-message--success",
            MessageTone::Failure => "quiz-message quiz-message--failure",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlayingVm {
    pub progress_label: String,
    pub progress_percent: u32,
    pub problem_text: String,
    pub score_text: String,
    pub message: Option<(String, MessageTone)>,
    pub accepts_input: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub score_text: String,
    pub grade_text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum QuizVm {
    Menu(Vec<DifficultyOptionVm>),
    Playing(PlayingVm),
    Results(ResultsVm),
}

fn menu_options() -> Vec<DifficultyOptionVm> {
    Difficulty::ALL
        .into_iter()
        .enumerate()
        .map(|(i, difficulty)| DifficultyOptionVm {
            difficulty,
            label: format!("{}. {}", i + 1, difficulty.label()),
        })
        .collect()
}

fn tone_of(message: &str) -> MessageTone {
    if message.starts_with('✓') {
        MessageTone::Success
    } else {
        MessageTone::Failure
    }
}

#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn map_quiz(controller: &QuizController) -> QuizVm {
    let Some(session) = controller.session() else {
        return QuizVm::Menu(menu_options());
    };

    match controller.screen() {
        QuizScreen::Menu => QuizVm::Menu(menu_options()),
        QuizScreen::Playing => QuizVm::Playing(PlayingVm {
            progress_label: session.progress_label(),
            progress_percent: (session.progress_fraction() * 100.0).round() as u32,
            problem_text: session.current_problem().text(),
            score_text: format!("Score: {}", session.score()),
            message: controller
                .message()
                .map(|message| (message.to_string(), tone_of(message))),
            accepts_input: session.accepts_input(),
        }),
        QuizScreen::Results => QuizVm::Results(ResultsVm {
            score_text: format!(
                "{}/{}",
                session.score(),
                PROBLEMS_PER_SESSION as u32 * FIRST_TRY_POINTS
            ),
            grade_text: format!("Grade: {}", session.rank()),
        }),
    }
}
