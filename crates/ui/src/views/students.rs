use std::sync::Arc;

use dioxus::prelude::*;
use services::{StudentService, StudentServiceError};
use toybox_core::model::{SortOrder, StudentError};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{Notice, StudentDialog, StudentFormInput, map_student_rows};

const COLUMNS: [&str; 6] = ["Name", "Code", "CW", "Exam", "%", "Grade"];

#[derive(Clone)]
struct StudentServiceHandle(Arc<StudentService>);

impl PartialEq for StudentServiceHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[component]
pub fn StudentsView() -> Element {
    let ctx = use_context::<AppContext>();

    let resource = use_resource(move || {
        let ctx = ctx.clone();
        async move { ctx.load_students().await.map(StudentServiceHandle) }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page students-page",
            header { class: "view-header",
                h1 { class: "view-title", "Student Manager" }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(service) => rsx! {
                    StudentManager { service }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "notice notice--error", "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
            }
        }
    }
}

fn error_title(err: &StudentServiceError) -> &'static str {
    match err {
        StudentServiceError::Student(StudentError::NotFound { .. }) => "Not Found",
        _ => "Error",
    }
}

#[component]
fn StudentManager(service: StudentServiceHandle) -> Element {
    let service = service.0;
    let mut dialog = use_signal(|| None::<StudentDialog>);
    let mut form = use_signal(StudentFormInput::default);
    let mut notice = use_signal(|| None::<Notice>);

    let table_service = Arc::clone(&service);
    let mut table = use_resource(move || {
        let service = Arc::clone(&table_service);
        async move { service.table().await }
    });

    let show_extreme = {
        let service = Arc::clone(&service);
        use_callback(move |highest: bool| {
            let service = Arc::clone(&service);
            let mut notice = notice;
            spawn(async move {
                let (title, row) = if highest {
                    ("Highest Scorer", service.highest().await)
                } else {
                    ("Lowest Scorer", service.lowest().await)
                };
                if let Some(row) = row {
                    notice.set(Some(Notice::info(title, row.detail_text())));
                }
            });
        })
    };

    let sort = {
        let service = Arc::clone(&service);
        use_callback(move |order: SortOrder| {
            let service = Arc::clone(&service);
            let mut dialog = dialog;
            let mut table = table;
            spawn(async move {
                service.sort(order).await;
                dialog.set(None);
                table.restart();
            });
        })
    };

    let submit_dialog = {
        let service = Arc::clone(&service);
        use_callback(move |()| {
            let Some(kind) = dialog() else {
                return;
            };
            let input = form();
            let service = Arc::clone(&service);
            let mut dialog = dialog;
            let mut notice = notice;
            let mut table = table;
            spawn(async move {
                let result = match kind {
                    StudentDialog::Find => service
                        .find(&input.query)
                        .await
                        .map(|row| Some(Notice::info("Student Record", row.detail_text()))),
                    StudentDialog::Add => service
                        .add(&input.code, &input.name, &input.marks)
                        .await
                        .map(|_| None),
                    StudentDialog::Delete => service.delete(&input.query).await.map(|_| None),
                    StudentDialog::Update => service
                        .update(&input.query, &input.name, &input.marks)
                        .await
                        .map(|_| None),
                    StudentDialog::Sort => Ok(None),
                };

                dialog.set(None);
                match result {
                    Ok(message) => {
                        notice.set(message);
                        table.restart();
                    }
                    Err(err) => {
                        notice.set(Some(Notice::error(error_title(&err), &ViewError::from(&err))));
                    }
                }
            });
        })
    };

    let mut open = move |kind: StudentDialog| {
        form.set(StudentFormInput::default());
        dialog.set(Some(kind));
    };

    let (rows, status) = match table.read().as_ref() {
        Some(table) => (map_student_rows(table), table.status.clone()),
        None => (Vec::new(), "Loading...".to_string()),
    };

    rsx! {
        table { class: "student-table",
            thead {
                tr {
                    for heading in COLUMNS {
                        th { "{heading}" }
                    }
                }
            }
            tbody {
                for row in rows {
                    tr { class: row.stripe,
                        td { "{row.name}" }
                        td { "{row.code}" }
                        td { "{row.coursework}" }
                        td { "{row.exam}" }
                        td { "{row.percentage}" }
                        td { "{row.grade}" }
                    }
                }
            }
        }

        div { class: "student-actions",
            button { class: "btn", r#type: "button", onclick: move |_| table.restart(), "View All" }
            button { class: "btn", r#type: "button", onclick: move |_| open(StudentDialog::Find), "View Individual" }
            button { class: "btn", r#type: "button", onclick: move |_| show_extreme.call(true), "Highest Scorer" }
            button { class: "btn", r#type: "button", onclick: move |_| show_extreme.call(false), "Lowest Scorer" }
            button { class: "btn", r#type: "button", onclick: move |_| open(StudentDialog::Sort), "Sort Records" }
            button { class: "btn", r#type: "button", onclick: move |_| open(StudentDialog::Add), "Add Student" }
            button { class: "btn", r#type: "button", onclick: move |_| open(StudentDialog::Delete), "Delete Student" }
            button { class: "btn", r#type: "button", onclick: move |_| open(StudentDialog::Update), "Update Student" }
        }

        p { class: "status-bar", "{status}" }

        if let Some(kind) = dialog() {
            div { class: "modal-backdrop",
                div { class: "modal",
                    h3 { "{kind.title()}" }
                    if kind == StudentDialog::Sort {
                        p { "asc or desc?" }
                        div { class: "modal-actions",
                            button {
                                class: "btn",
                                r#type: "button",
                                onclick: move |_| sort.call(SortOrder::Ascending),
                                "Ascending"
                            }
                            button {
                                class: "btn",
                                r#type: "button",
                                onclick: move |_| sort.call(SortOrder::Descending),
                                "Descending"
                            }
                        }
                    } else {
                        if kind.asks_for_query() {
                            label { class: "field",
                                span { "Enter name or code:" }
                                input {
                                    r#type: "text",
                                    value: "{form.read().query}",
                                    autofocus: true,
                                    oninput: move |evt| form.write().query = evt.value(),
                                }
                            }
                        }
                        if kind == StudentDialog::Add {
                            label { class: "field",
                                span { "Student code:" }
                                input {
                                    r#type: "text",
                                    value: "{form.read().code}",
                                    autofocus: true,
                                    oninput: move |evt| form.write().code = evt.value(),
                                }
                            }
                        }
                        if matches!(kind, StudentDialog::Add | StudentDialog::Update) {
                            label { class: "field",
                                span {
                                    if kind == StudentDialog::Add { "Student name:" } else { "New name (blank to skip):" }
                                }
                                input {
                                    r#type: "text",
                                    value: "{form.read().name}",
                                    oninput: move |evt| form.write().name = evt.value(),
                                }
                            }
                            label { class: "field",
                                span {
                                    if kind == StudentDialog::Add { "Marks (comma-separated):" } else { "New marks (blank to skip):" }
                                }
                                input {
                                    r#type: "text",
                                    value: "{form.read().marks}",
                                    oninput: move |evt| form.write().marks = evt.value(),
                                }
                            }
                        }
                        div { class: "modal-actions",
                            button {
                                class: "btn btn-primary",
                                r#type: "button",
                                onclick: move |_| submit_dialog.call(()),
                                "OK"
                            }
                        }
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| dialog.set(None),
                        "Cancel"
                    }
                }
            }
        }

        if let Some(current) = notice() {
            div { class: "modal-backdrop",
                div { class: if current.is_error { "modal modal--error" } else { "modal" },
                    h3 { "{current.title}" }
                    pre { class: "modal-body", "{current.body}" }
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
