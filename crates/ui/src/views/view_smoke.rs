use toybox_core::model::Joke;

use super::test_harness::{ViewKind, sample_students, setup_view_harness};

async fn settle(harness: &mut super::test_harness::ViewHarness) -> String {
    harness.rebuild();
    for _ in 0..4 {
        harness.drive_async().await;
    }
    harness.render()
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_menu() {
    let mut harness = setup_view_harness(ViewKind::Quiz, Vec::new(), Vec::new());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Math Quiz"), "missing title in {html}");
    assert!(html.contains("1. Easy"), "missing easy in {html}");
    assert!(html.contains("3. Advanced"), "missing advanced in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn jokes_view_smoke_renders_idle_prompt() {
    let jokes = vec![Joke::parse("Why did the chicken cross the road?To get to the other side.").unwrap()];
    let mut harness = setup_view_harness(ViewKind::Jokes, Vec::new(), jokes);
    let html = settle(&mut harness).await;
    assert!(html.contains("Alexa Tell Me A Joke!"), "missing prompt in {html}");
    assert!(html.contains("Tell me a Joke"), "missing button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn jokes_view_smoke_renders_empty_error() {
    let mut harness = setup_view_harness(ViewKind::Jokes, Vec::new(), Vec::new());
    let html = settle(&mut harness).await;
    assert!(html.contains("No jokes found"), "missing error in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn students_view_smoke_renders_table_and_status() {
    let mut harness = setup_view_harness(ViewKind::Students, sample_students(), Vec::new());
    let html = settle(&mut harness).await;
    assert!(html.contains("John Curry"), "missing row in {html}");
    assert!(html.contains("46.88"), "missing percentage in {html}");
    assert!(html.contains("Students: 2 | Avg %: 68.13"), "missing status in {html}");
    assert!(html.contains("Update Student"), "missing actions in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn students_view_smoke_renders_empty_roster() {
    let mut harness = setup_view_harness(ViewKind::Students, Vec::new(), Vec::new());
    let html = settle(&mut harness).await;
    assert!(html.contains("Students: 0 | Avg %: 0"), "missing status in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn recipes_view_smoke_renders_idle_search() {
    let mut harness = setup_view_harness(ViewKind::Recipes, Vec::new(), Vec::new());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("DISH DISCOVERY"), "missing title in {html}");
    assert!(html.contains("Select a meal to view"), "missing placeholder in {html}");
    assert!(html.contains("Ready"), "missing status in {html}");
    assert!(html.contains("Ingredient"), "missing search kinds in {html}");
}
