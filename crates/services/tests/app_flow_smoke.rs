use std::time::Duration;

use services::{AdvanceResult, AppConfig, AppServices, QuizScreen};
use storage::repository::{InMemoryRepository, Storage, StudentRepository};
use toybox_core::model::StudentRecord;
use toybox_core::model::quiz::{AdvanceOutcome, Difficulty, Operator, Problem, Rank};

fn services(repo: &InMemoryRepository) -> AppServices {
    let config = AppConfig {
        feedback_delay: Duration::from_millis(1500),
        ..AppConfig::default()
    };
    let storage = Storage {
        students: std::sync::Arc::new(repo.clone()),
        jokes: std::sync::Arc::new(repo.clone()),
    };
    AppServices::with_storage(config, storage)
}

#[tokio::test(start_paused = true)]
async fn quiz_loop_with_retries_scores_and_grades() {
    let repo = InMemoryRepository::new();
    let mut quiz = services(&repo).quiz();

    let problems = (1..=10)
        .map(|n| Problem::new(n, 2, Operator::Subtract))
        .collect();
    quiz.start_with_problems(Difficulty::Easy, problems).unwrap();

    let mut last = None;
    for n in 1..=10_i64 {
        // Half the problems need a second attempt.
        if n % 2 == 0 {
            let retry = quiz.submit("999").unwrap();
            assert!(retry.advance.is_none());
        }
        let report = quiz.submit(&(n - 2).to_string()).unwrap();
        let ticket = report.advance.expect("resolved").wait().await.expect("fired");
        last = Some(quiz.advance_with(ticket));
    }

    assert_eq!(
        last,
        Some(AdvanceResult::Advanced(AdvanceOutcome::Finished {
            score: 75,
            rank: Rank::CPlus,
        }))
    );
    assert_eq!(quiz.screen(), QuizScreen::Results);
}

#[tokio::test]
async fn student_changes_reach_storage() {
    let repo = InMemoryRepository::with_students(vec![
        StudentRecord::new("1345", "John Curry", vec![8, 15, 7, 45]).unwrap(),
    ]);
    let students = services(&repo).students().await.unwrap();

    students.add("2345", "Sam Sturtivant", "14,15,14,77").await.unwrap();
    students.delete("1345").await.unwrap();

    let saved = repo.load_students().await.unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].code(), "2345");
}

#[tokio::test]
async fn missing_jokes_surface_as_errors() {
    let repo = InMemoryRepository::new();
    assert!(services(&repo).joke_book().await.is_err());
}
