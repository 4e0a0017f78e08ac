use dioxus::prelude::*;

use portal_core::model::Identity;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{StudentRowVm, map_student_row, map_teacher_stats};

/// How many roster entries the activity list shows.
const ACTIVITY_LIST_LIMIT: usize = 5;

#[component]
pub fn TeacherDashboardView(user: Identity) -> Element {
    let ctx = use_context::<AppContext>();
    let dashboard = ctx.teacher_dashboard();
    let user_id = user.id();

    let resource = use_resource(move || {
        let dashboard = dashboard.clone();
        async move { Ok::<_, ViewError>(dashboard.overview(user_id).await) }
    });
    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page dashboard-page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { class: "page-loading", "Loading dashboard..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
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
                ViewState::Ready(overview) => {
                    let stats = map_teacher_stats(&overview);
                    let rows: Vec<StudentRowVm> = overview
                        .students
                        .iter()
                        .take(ACTIVITY_LIST_LIMIT)
                        .map(map_student_row)
                        .collect();

                    rsx! {
                        header { class: "dashboard-header dashboard-header--split",
                            div {
                                h1 { "Welcome, {user.full_name()}!" }
                                p { class: "dashboard-subtitle",
                                    "Monitor student progress and manage lessons"
                                }
                            }
                            // Lesson authoring happens outside this portal for now.
                            button { class: "btn btn-primary", r#type: "button", "Create Lesson" }
                        }

                        div { class: "stat-grid stat-grid--four",
                            StatTile { label: "Total Students", value: stats.students_label.clone() }
                            StatTile { label: "Active Students", value: stats.active_label.clone() }
                            StatTile { label: "Lessons Created", value: stats.lessons_label.clone() }
                            StatTile { label: "Avg Performance", value: stats.average_label.clone() }
                        }

                        div { class: "teacher-columns",
                            section { class: "activity-panel",
                                h2 { "Recent Student Activity" }
                                if rows.is_empty() {
                                    p { class: "activity-empty", "No students registered yet." }
                                }
                                for row in rows {
                                    div { class: "activity-row",
                                        div {
                                            p { class: "activity-name", "{row.name}" }
                                            p { class: "activity-school", "{row.school}" }
                                        }
                                        span { class: "activity-pill", "Active" }
                                    }
                                }
                            }

                            section { class: "quick-actions",
                                h2 { "Quick Actions" }
                                button { class: "btn quick-action", r#type: "button", "Create New Lesson" }
                                button { class: "btn quick-action", r#type: "button", "View Assessments" }
                                button { class: "btn quick-action", r#type: "button", "View Analytics" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn StatTile(label: &'static str, value: String) -> Element {
    rsx! {
        div { class: "stat-tile",
            p { class: "stat-label", "{label}" }
            p { class: "stat-value", "{value}" }
        }
    }
}
