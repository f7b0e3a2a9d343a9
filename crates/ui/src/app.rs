use dioxus::prelude::*;

use crate::views::{JokesView, QuizView, RecipesView, StudentsView};

#[component]
fn Shell(title: &'static str, children: Element) -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "{title}" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                {children}
            }
        }
    }
}

#[component]
pub fn QuizApp() -> Element {
    rsx! {
        Shell { title: "Math Quiz", QuizView {} }
    }
}

#[component]
pub fn JokesApp() -> Element {
    rsx! {
        Shell { title: "Alexa Joke Teller", JokesView {} }
    }
}

#[component]
pub fn StudentsApp() -> Element {
    rsx! {
        Shell { title: "Student Manager", StudentsView {} }
    }
}

#[component]
pub fn RecipesApp() -> Element {
    rsx! {
        Shell { title: "The Meal Application", RecipesView {} }
    }
}
