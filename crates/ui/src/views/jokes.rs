use dioxus::prelude::*;
use services::JokeTeller;
use toybox_core::model::JokeBook;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::JokeVm;

#[component]
pub fn JokesView() -> Element {
    let ctx = use_context::<AppContext>();
    let jokes = ctx.joke_service();

    let resource = use_resource(move || {
        let jokes = jokes.clone();
        async move { jokes.load_book().await.map_err(|err| ViewError::from(&err)) }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page jokes-page",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(book) => rsx! {
                    JokeTellerPanel { book }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "notice notice--error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn JokeTellerPanel(book: JokeBook) -> Element {
    let mut teller = use_signal(move || JokeTeller::new(book));
    let vm = JokeVm::from(&*teller.read());
    let label_class = if vm.showing_punchline {
        "joke-label joke-label--punchline"
    } else {
        "joke-label"
    };

    rsx! {
        p { class: label_class, "{vm.label}" }
        div { class: "joke-actions",
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| {
                    teller.write().tell();
                },
                "Tell me a Joke"
            }
            button {
                class: "btn btn-accent",
                r#type: "button",
                disabled: !vm.can_reveal,
                onclick: move |_| {
                    teller.write().reveal();
                },
                "Show Punchline"
            }
            button {
                class: "btn btn-danger",
                r#type: "button",
                onclick: move |_| dioxus::desktop::window().close(),
                "Quit"
            }
        }
    }
}
