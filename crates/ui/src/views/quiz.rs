use dioxus::prelude::*;
use services::{AdvanceResult, QuizController};
use toybox_core::model::quiz::{Difficulty, QuizError, SubmitOutcome};
use tracing::debug;

use crate::context::AppContext;
use crate::vm::{DifficultyOptionVm, PlayingVm, QuizVm, ResultsVm, map_quiz};

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let controller = use_signal(|| ctx.quiz_controller());
    let answer = use_signal(String::new);

    let vm = map_quiz(&controller.read());

    rsx! {
        div { class: "page quiz-page",
            match vm {
                QuizVm::Menu(options) => rsx! {
                    QuizMenu { options, controller, answer }
                },
                QuizVm::Playing(playing) => rsx! {
                    QuizPlaying { playing, controller, answer }
                },
                QuizVm::Results(results) => rsx! {
                    QuizResults { results, controller }
                },
            }
        }
    }
}

#[component]
fn QuizMenu(
    options: Vec<DifficultyOptionVm>,
    controller: Signal<QuizController>,
    answer: Signal<String>,
) -> Element {
    rsx! {
        header { class: "view-header",
            h1 { class: "view-title", "Math Quiz" }
            p { class: "view-subtitle", "Select a difficulty level" }
        }
        div { class: "quiz-menu",
            for option in options {
                DifficultyButton { option, controller, answer }
            }
        }
    }
}

#[component]
fn DifficultyButton(
    option: DifficultyOptionVm,
    controller: Signal<QuizController>,
    answer: Signal<String>,
) -> Element {
    let difficulty: Difficulty = option.difficulty;
    let mut controller = controller;
    let mut answer = answer;
    rsx! {
        button {
            class: "btn quiz-difficulty",
            r#type: "button",
            onclick: move |_| {
                answer.set(String::new());
                controller.write().start(difficulty);
            },
            "{option.label}"
        }
    }
}

#[component]
fn QuizPlaying(
    playing: PlayingVm,
    controller: Signal<QuizController>,
    answer: Signal<String>,
) -> Element {
    let mut answer = answer;
    let submit = use_callback(move |()| {
        let mut controller = controller;
        let raw = answer();
        let result = controller.write().submit(&raw);
        match result {
            Ok(report) => {
                if report.outcome != SubmitOutcome::Ignored {
                    answer.set(String::new());
                }
                if let Some(delay) = report.advance {
                    spawn(async move {
                        if let Some(ticket) = delay.wait().await {
                            let result = controller.write().advance_with(ticket);
                            if result == AdvanceResult::Stale {
                                debug!("advance skipped, session moved on");
                            }
                        }
                    });
                }
            }
            Err(QuizError::InvalidInput { .. }) => answer.set(String::new()),
            Err(err) => debug!(error = %err, "answer not accepted"),
        }
    });

    let can_submit = playing.accepts_input && !answer.read().trim().is_empty();

    rsx! {
        div { class: "quiz-progress",
            p { class: "quiz-progress-label", "{playing.progress_label}" }
            div { class: "quiz-progress-bar",
                div { class: "quiz-progress-fill", style: "width: {playing.progress_percent}%" }
            }
        }
        p { class: "quiz-problem", "{playing.problem_text}" }
        input {
            class: "quiz-answer",
            r#type: "text",
            value: "{answer}",
            disabled: !playing.accepts_input,
            autofocus: true,
            oninput: move |evt| answer.set(evt.value()),
            onkeydown: move |evt| {
                if evt.data.key() == Key::Enter {
                    evt.prevent_default();
                    submit.call(());
                }
            },
        }
        button {
            class: "btn btn-primary quiz-submit",
            r#type: "button",
            disabled: !can_submit,
            onclick: move |_| submit.call(()),
            "Submit"
        }
        if let Some((message, tone)) = playing.message {
            p { class: tone.class(), "{message}" }
        }
        p { class: "quiz-score", "{playing.score_text}" }
    }
}

#[component]
fn QuizResults(results: ResultsVm, controller: Signal<QuizController>) -> Element {
    let mut controller = controller;
    rsx! {
        div { class: "quiz-results",
            h1 { class: "view-title", "Quiz Complete!" }
            p { class: "quiz-final-score", "{results.score_text}" }
            p { class: "quiz-grade", "{results.grade_text}" }
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| controller.write().play_again(),
                "Play Again"
            }
        }
    }
}
