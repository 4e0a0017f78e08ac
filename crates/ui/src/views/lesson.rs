use dioxus::prelude::*;

use portal_core::model::{LessonId, QuizId, UserId};
use services::LessonServiceError;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::map_lesson_detail;

#[component]
pub fn LessonView(
    lesson_id: LessonId,
    user_id: UserId,
    on_back: EventHandler<()>,
    on_quiz_start: EventHandler<QuizId>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let lessons = ctx.lessons();

    // Loading the view is the implicit "start": the service upserts the
    // progress row as a side effect of the fetch.
    let resource = use_resource(move || {
        let lessons = lessons.clone();
        async move {
            lessons
                .open(lesson_id, user_id)
                .await
                .map_err(|err| match err {
                    LessonServiceError::NotFound => ViewError::NotFound,
                    _ => ViewError::Unknown,
                })
        }
    });
    let state = view_state_from_resource(resource);

    // The completion flip is optimistic: the local badge turns regardless of
    // whether the remote write lands.
    let mut completed_locally = use_signal(|| false);

    rsx! {
        div { class: "page lesson-page",
            button {
                class: "btn back-link",
                r#type: "button",
                onclick: move |_| on_back.call(()),
                "‹ Back to Lessons"
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { class: "page-loading", "Loading..." }
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
                ViewState::Ready(material) => {
                    let vm = map_lesson_detail(&material);
                    let completed = vm.completed || completed_locally();
                    let mark_complete = {
                        let lessons = ctx.lessons();
                        move |_: MouseEvent| {
                            let lessons = lessons.clone();
                            completed_locally.set(true);
                            spawn(async move {
                                let _ = lessons.mark_complete(user_id, lesson_id).await;
                            });
                        }
                    };

                    rsx! {
                        article { class: "lesson-detail",
                            header { class: "lesson-detail-head",
                                div {
                                    h1 { "{vm.title}" }
                                    p { class: "lesson-detail-meta", "{vm.meta_label}" }
                                }
                                if completed {
                                    span { class: "lesson-complete-badge", "✓" }
                                }
                            }

                            p { class: "lesson-detail-desc", "{vm.description}" }

                            div {
                                class: "lesson-content",
                                dangerous_inner_html: "{vm.content_html}",
                            }

                            if !completed {
                                button {
                                    class: "btn btn-success",
                                    r#type: "button",
                                    onclick: mark_complete,
                                    "Mark as Complete"
                                }
                            }
                        }

                        if !vm.quizzes.is_empty() {
                            section { class: "lesson-quizzes",
                                h2 { "Assessment Quizzes" }
                                for quiz in vm.quizzes {
                                    div { class: "quiz-row", key: "{quiz.id}",
                                        div { class: "quiz-row-text",
                                            h3 { "{quiz.title}" }
                                            p { "{quiz.description}" }
                                        }
                                        button {
                                            class: "btn btn-primary",
                                            r#type: "button",
                                            onclick: move |_| on_quiz_start.call(quiz.id),
                                            "Take Quiz"
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
}
