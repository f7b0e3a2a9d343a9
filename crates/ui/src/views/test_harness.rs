use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::{JokeService, MealDbClient, MealDbConfig, RecipeError};
use storage::repository::{InMemoryRepository, JokeRepository, StudentRepository};
use toybox_core::model::{Joke, StudentRecord};

use crate::context::{UiApp, build_app_context};
use crate::views::{JokesView, QuizView, RecipesView, StudentsView};

#[derive(Clone)]
struct TestApp {
    students: Arc<dyn StudentRepository>,
    jokes: Arc<dyn JokeRepository>,
}

impl UiApp for TestApp {
    fn feedback_delay(&self) -> Duration {
        Duration::from_millis(10)
    }

    fn joke_service(&self) -> JokeService {
        JokeService::new(Arc::clone(&self.jokes))
    }

    fn student_repository(&self) -> Arc<dyn StudentRepository> {
        Arc::clone(&self.students)
    }

    fn recipe_client(&self) -> Result<Arc<MealDbClient>, RecipeError> {
        // Nothing listens here; views must not fetch until asked.
        let config = MealDbConfig::new("http://127.0.0.1:9/api/json/v1/1/", Duration::from_secs(1));
        MealDbClient::new(&config).map(Arc::new)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Quiz,
    Jokes,
    Students,
    Recipes,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    match props.view {
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::Jokes => rsx! { JokesView {} },
        ViewKind::Students => rsx! { StudentsView {} },
        ViewKind::Recipes => rsx! { RecipesView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn sample_students() -> Vec<StudentRecord> {
    vec![
        StudentRecord::new("1345", "John Curry", vec![8, 15, 7, 45]).expect("valid record"),
        StudentRecord::new("9876", "Lee Scott", vec![17, 11, 16, 99]).expect("valid record"),
    ]
}

pub fn setup_view_harness(view: ViewKind, students: Vec<StudentRecord>, jokes: Vec<Joke>) -> ViewHarness {
    let app = Arc::new(TestApp {
        students: Arc::new(InMemoryRepository::with_students(students)),
        jokes: Arc::new(InMemoryRepository::with_jokes(jokes)),
    });

    let dom = VirtualDom::new_with_props(ViewHarnessRoot, ViewHarnessProps { app, view });

    ViewHarness { dom }
}
