use dioxus::prelude::*;

use portal_core::model::{Identity, LessonId};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    CONTINUE_STRIP_LIMIT, LessonCardVm, map_lesson_card, map_student_stats,
};

#[component]
pub fn StudentDashboardView(user: Identity, on_lesson_select: EventHandler<LessonId>) -> Element {
    let ctx = use_context::<AppContext>();
    let dashboard = ctx.student_dashboard();
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
                    let stats = map_student_stats(&overview);
                    let continue_cards: Vec<LessonCardVm> = overview
                        .incomplete()
                        .take(CONTINUE_STRIP_LIMIT)
                        .map(map_lesson_card)
                        .collect();
                    let remaining = overview.incomplete().count();
                    let all_cards: Vec<LessonCardVm> =
                        overview.lessons.iter().map(map_lesson_card).collect();

                    rsx! {
                        header { class: "dashboard-header",
                            h1 { "Welcome back, {user.full_name()}!" }
                            p { class: "dashboard-subtitle", "Continue your learning journey" }
                        }

                        div { class: "stat-grid",
                            StatTile { label: "Lessons Completed", value: stats.completed_label.clone() }
                            StatTile { label: "Average Score", value: stats.average_label.clone() }
                            StatTile { label: "Learning Streak", value: stats.streak_label.clone() }
                        }

                        if !continue_cards.is_empty() {
                            section { class: "continue-section",
                                h2 { "Continue Your Learning ({remaining} lessons remaining)" }
                                div { class: "lesson-grid",
                                    for card in continue_cards {
                                        LessonCard {
                                            key: "{card.id}",
                                            card: card.clone(),
                                            on_select: move |()| on_lesson_select.call(card.id),
                                        }
                                    }
                                }
                            }
                        }

                        section { class: "all-lessons",
                            h2 { "All Lessons" }
                            div { class: "lesson-grid",
                                for card in all_cards {
                                    LessonCard {
                                        key: "{card.id}",
                                        card: card.clone(),
                                        on_select: move |()| on_lesson_select.call(card.id),
                                    }
                                }
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

#[component]
fn LessonCard(card: LessonCardVm, on_select: EventHandler<()>) -> Element {
    let bar_class = if card.completed {
        "progress-fill progress-fill--done"
    } else {
        "progress-fill"
    };

    rsx! {
        div {
            class: "lesson-card",
            onclick: move |_| on_select.call(()),
            div { class: "lesson-card-head",
                h3 { "{card.title}" }
                if card.completed {
                    span { class: "lesson-card-award", "✓" }
                }
            }
            p { class: "lesson-card-meta", "{card.meta_label}" }
            p { class: "lesson-card-desc", "{card.description}" }
            div { class: "lesson-card-progress",
                span { class: "progress-label", "Progress" }
                span { class: "progress-value", "{card.progress_percentage}%" }
            }
            div { class: "progress-track",
                div { class: bar_class, style: "width: {card.progress_percentage}%" }
            }
            button { class: "btn lesson-card-cta", r#type: "button", "{card.cta_label}" }
        }
    }
}
