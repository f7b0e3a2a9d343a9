use std::sync::Arc;

use dioxus::prelude::*;
use services::{MealDbClient, RecipeError};
use toybox_core::model::{Meal, SearchKind, SearchQuery};
use tracing::warn;

use crate::context::AppContext;
use crate::vm::{BrowseKind, BrowseVm, Notice, RecipeDetailVm, RecipeStatus, map_recipe_results};

#[derive(Clone)]
struct ClientHandle(Arc<MealDbClient>);

impl PartialEq for ClientHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

fn failure(title: &str, context: &str, err: &RecipeError) -> Notice {
    Notice {
        title: title.to_string(),
        body: format!("{context}: {err}"),
        is_error: true,
    }
}

#[component]
pub fn RecipesView() -> Element {
    let ctx = use_context::<AppContext>();

    rsx! {
        div { class: "page recipes-page",
            header { class: "view-header recipes-header",
                h1 { class: "view-title", "DISH DISCOVERY" }
            }
            match ctx.recipe_client() {
                Ok(client) => rsx! {
                    RecipeBrowser { client: ClientHandle(client) }
                },
                Err(err) => rsx! {
                    p { class: "notice notice--error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn RecipeBrowser(client: ClientHandle) -> Element {
    let client = client.0;
    let mut kind = use_signal(SearchKind::default);
    let mut query = use_signal(String::new);
    let results = use_signal(Vec::<Meal>::new);
    let selected = use_signal(|| None::<usize>);
    let detail = use_signal(|| None::<RecipeDetailVm>);
    let status = use_signal(|| RecipeStatus::READY.to_string());
    let mut notice = use_signal(|| None::<Notice>);
    let mut browse = use_signal(|| None::<BrowseVm>);
    // Only the latest request may write results.
    let request_seq = use_signal(|| 0_u64);

    let run_search = {
        let client = Arc::clone(&client);
        use_callback(move |(search_kind, text): (SearchKind, String)| {
            let mut notice = notice;
            let search = match SearchQuery::new(search_kind, &text) {
                Ok(search) => search,
                Err(err) => {
                    notice.set(Some(Notice {
                        title: "Input Error".to_string(),
                        body: err.to_string(),
                        is_error: true,
                    }));
                    return;
                }
            };

            let mut status = status;
            let mut results = results;
            let mut selected = selected;
            let mut detail = detail;
            let mut request_seq = request_seq;
            let seq = {
                let mut current = request_seq.write();
                *current += 1;
                *current
            };
            status.set(RecipeStatus::SEARCHING.to_string());
            results.set(Vec::new());
            selected.set(None);
            detail.set(None);

            let client = Arc::clone(&client);
            spawn(async move {
                let outcome = client.search(&search).await;
                if *request_seq.peek() != seq {
                    return;
                }
                match outcome {
                    Ok(meals) => {
                        status.set(map_recipe_results(&meals));
                        if meals.is_empty() {
                            notice.set(Some(Notice::info(
                                "No Results",
                                "No meals found for your search",
                            )));
                        }
                        results.set(meals);
                    }
                    Err(err) => {
                        warn!(error = %err, "search failed");
                        status.set(RecipeStatus::ERROR.to_string());
                        notice.set(Some(failure("Error", "Failed to search", &err)));
                    }
                }
            });
        })
    };

    let random = {
        let client = Arc::clone(&client);
        use_callback(move |()| {
            let mut status = status;
            let mut results = results;
            let mut selected = selected;
            let mut detail = detail;
            let mut notice = notice;
            let mut request_seq = request_seq;
            let seq = {
                let mut current = request_seq.write();
                *current += 1;
                *current
            };
            status.set(RecipeStatus::RANDOM_LOADING.to_string());

            let client = Arc::clone(&client);
            spawn(async move {
                let outcome = client.random().await;
                if *request_seq.peek() != seq {
                    return;
                }
                match outcome {
                    Ok(Some(meal)) => {
                        detail.set(Some(RecipeDetailVm::from(&meal)));
                        results.set(vec![meal]);
                        selected.set(Some(0));
                        status.set(RecipeStatus::RANDOM_LOADED.to_string());
                    }
                    Ok(None) => status.set(RecipeStatus::NO_RESULTS.to_string()),
                    Err(err) => {
                        warn!(error = %err, "random meal failed");
                        status.set(RecipeStatus::ERROR.to_string());
                        notice.set(Some(failure("Error", "Failed to get random meal", &err)));
                    }
                }
            });
        })
    };

    let select = {
        let client = Arc::clone(&client);
        use_callback(move |index: usize| {
            let Some(meal) = results.read().get(index).cloned() else {
                return;
            };
            let mut selected = selected;
            let mut detail = detail;
            let mut results = results;
            selected.set(Some(index));
            detail.set(Some(RecipeDetailVm::from(&meal)));

            if meal.is_complete() {
                return;
            }
            let client = Arc::clone(&client);
            spawn(async move {
                let full = client.details(&meal).await;
                if selected() != Some(index) {
                    return;
                }
                detail.set(Some(RecipeDetailVm::from(&full)));
                if let Some(slot) = results.write().get_mut(index) {
                    *slot = full;
                }
            });
        })
    };

    let open_browse = {
        let client = Arc::clone(&client);
        use_callback(move |browse_kind: BrowseKind| {
            let client = Arc::clone(&client);
            let mut browse = browse;
            let mut notice = notice;
            spawn(async move {
                let items = match browse_kind {
                    BrowseKind::Categories => client
                        .categories()
                        .await
                        .map(|list| list.into_iter().map(|c| c.name).collect::<Vec<_>>()),
                    BrowseKind::Areas => client
                        .areas()
                        .await
                        .map(|list| list.into_iter().map(|a| a.name).collect()),
                    BrowseKind::Ingredients => client
                        .ingredients()
                        .await
                        .map(|list| list.into_iter().map(|i| i.name).collect()),
                };
                match items {
                    Ok(items) => browse.set(Some(BrowseVm {
                        kind: browse_kind,
                        items,
                    })),
                    Err(err) => {
                        warn!(error = %err, list = browse_kind.title(), "browse list failed");
                        let context =
                            format!("Failed to load {}", browse_kind.title().to_lowercase());
                        notice.set(Some(failure("Error", &context, &err)));
                    }
                }
            });
        })
    };

    let clear = use_callback(move |()| {
        let mut query = query;
        let mut results = results;
        let mut selected = selected;
        let mut detail = detail;
        let mut status = status;
        let mut request_seq = request_seq;
        *request_seq.write() += 1;
        query.set(String::new());
        results.set(Vec::new());
        selected.set(None);
        detail.set(None);
        status.set(RecipeStatus::CLEARED.to_string());
    });

    let names: Vec<String> = results.read().iter().map(|meal| meal.name.clone()).collect();
    let current_detail = detail();
    let current_kind = kind();

    rsx! {
        div { class: "recipe-search",
            div { class: "search-kinds",
                for option in SearchKind::ALL {
                    label { class: "search-kind",
                        input {
                            r#type: "radio",
                            name: "search-kind",
                            checked: current_kind == option,
                            onchange: move |_| kind.set(option),
                        }
                        "{option.label()}"
                    }
                }
            }
            div { class: "search-row",
                input {
                    class: "search-input",
                    r#type: "text",
                    value: "{query}",
                    autofocus: true,
                    oninput: move |evt| query.set(evt.value()),
                    onkeydown: move |evt| {
                        if evt.data.key() == Key::Enter {
                            run_search.call((kind(), query()));
                        }
                    },
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| run_search.call((kind(), query())),
                    "Search"
                }
                button {
                    class: "btn btn-accent",
                    r#type: "button",
                    onclick: move |_| random.call(()),
                    "Random"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| clear.call(()),
                    "Clear"
                }
            }
            div { class: "browse-row",
                for browse_kind in [BrowseKind::Categories, BrowseKind::Areas, BrowseKind::Ingredients] {
                    button {
                        class: "btn",
                        r#type: "button",
                        onclick: move |_| open_browse.call(browse_kind),
                        "{browse_kind.title()}"
                    }
                }
            }
        }

        div { class: "recipe-body",
            ul { class: "recipe-results",
                for (index, name) in names.into_iter().enumerate() {
                    li {
                        class: if selected() == Some(index) { "recipe-result recipe-result--selected" } else { "recipe-result" },
                        onclick: move |_| select.call(index),
                        "{name}"
                    }
                }
            }
            section { class: "recipe-detail",
                match current_detail {
                    Some(vm) => rsx! {
                        h2 { "{vm.title}" }
                        match vm.image_url {
                            Some(url) => rsx! {
                                img { class: "recipe-image", src: "{url}", alt: "{vm.title}" }
                            },
                            None => rsx! {
                                p { class: "recipe-image-missing", "Image not available" }
                            },
                        }
                        pre { class: "recipe-text", "{vm.text}" }
                    },
                    None => rsx! {
                        p { class: "recipe-placeholder", "Select a meal to view" }
                    },
                }
            }
        }

        p { class: "status-bar", "{status}" }

        if let Some(list) = browse() {
            div { class: "modal-backdrop",
                div { class: "modal browse-modal",
                    h3 { "{list.kind.title()}" }
                    p { "{list.kind.prompt()}" }
                    ul { class: "browse-list",
                        for item in list.items {
                            li {
                                class: "browse-item",
                                onclick: {
                                    let item = item.clone();
                                    let search_kind = list.kind.search_kind();
                                    move |_| {
                                        browse.set(None);
                                        kind.set(search_kind);
                                        query.set(item.clone());
                                        run_search.call((search_kind, item.clone()));
                                    }
                                },
                                "{item}"
                            }
                        }
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| browse.set(None),
                        "Cancel"
                    }
                }
            }
        }

        if let Some(current) = notice() {
            div { class: "modal-backdrop",
                div { class: if current.is_error { "modal modal--error" } else { "modal" },
                    h3 { "{current.title}" }
                    p { class: "modal-body", "{current.body}" }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| notice.set(None),
                        "OK"
                    }
                }
            }
        }
    }
}
