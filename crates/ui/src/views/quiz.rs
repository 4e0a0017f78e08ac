use dioxus::prelude::*;

use portal_core::model::{Answer, QuestionKind, QuizId, UserId};
use services::{QuizPlayer, QuizResult, QuizServiceError};

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{map_quiz_result, map_quiz_step};

/// The quiz attempt: Loading until the quiz and its ordered questions
/// arrive, then Answering in the player, then Submitted. Submission is
/// one-way; "back" is the only way out and returns to the lesson.
#[component]
pub fn QuizPlayerView(quiz_id: QuizId, user_id: UserId, on_back: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let mut player = use_signal(|| None::<QuizPlayer>);
    let mut load_error = use_signal(|| None::<ViewError>);
    let mut result = use_signal(|| None::<QuizResult>);
    let mut submitting = use_signal(|| false);

    {
        let quizzes = ctx.quizzes();
        use_future(move || {
            let quizzes = quizzes.clone();
            async move {
                match quizzes.start(quiz_id).await {
                    Ok(started) => player.set(Some(started)),
                    Err(QuizServiceError::NoQuestions) => {
                        load_error.set(Some(ViewError::EmptyQuiz));
                    }
                    Err(QuizServiceError::NotFound) => load_error.set(Some(ViewError::NotFound)),
                    Err(_) => load_error.set(Some(ViewError::Unknown)),
                }
            }
        });
    }

    // Submitted: the result card replaces the player.
    if let Some(res) = result() {
        let vm = map_quiz_result(&res);
        return rsx! {
            div { class: "page quiz-page",
                div { class: "quiz-result-card",
                    span { class: "quiz-result-icon", "✓" }
                    h2 { "Quiz Completed!" }
                    p { class: "quiz-result-score",
                        "Your Score: "
                        strong { "{vm.percentage_label}" }
                    }
                    p { class: "quiz-result-marks", "{vm.marks_label}" }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| on_back.call(()),
                        "Back to Lesson"
                    }
                }
            }
        };
    }

    if let Some(err) = load_error() {
        return rsx! {
            div { class: "page quiz-page",
                p { "{err.message()}" }
                button {
                    class: "btn back-link",
                    r#type: "button",
                    onclick: move |_| on_back.call(()),
                    "‹ Back"
                }
            }
        };
    }

    let Some(step) = player.with(|p| p.as_ref().map(map_quiz_step)) else {
        return rsx! {
            div { class: "page quiz-page",
                p { class: "page-loading", "Loading quiz..." }
            }
        };
    };

    let submit = {
        let quizzes = ctx.quizzes();
        move |_: MouseEvent| {
            if submitting() {
                return;
            }
            submitting.set(true);
            let quizzes = quizzes.clone();
            spawn(async move {
                // Take the player out of the signal so no borrow is held
                // across the await.
                let taken = player.write().take();
                if let Some(mut active) = taken {
                    match quizzes.submit(&mut active, user_id).await {
                        Ok(outcome) => result.set(Some(outcome)),
                        Err(_) => {
                            player.set(Some(active));
                            submitting.set(false);
                        }
                    }
                }
            });
        }
    };

    rsx! {
        div { class: "page quiz-page",
            button {
                class: "btn back-link",
                r#type: "button",
                onclick: move |_| on_back.call(()),
                "‹ Back"
            }

            div { class: "quiz-card",
                header { class: "quiz-head",
                    h2 { "{step.title}" }
                    span { class: "quiz-counter", "{step.counter_label}" }
                }
                div { class: "progress-track",
                    div { class: "progress-fill", style: "width: {step.progress_width}" }
                }

                div { class: "quiz-question",
                    h3 { "{step.prompt}" }
                    match step.kind {
                        QuestionKind::MultipleChoice => rsx! {
                            div { class: "quiz-options",
                                for option in step.options.clone() {
                                    label {
                                        class: if option.selected { "quiz-option quiz-option--selected" } else { "quiz-option" },
                                        input {
                                            r#type: "radio",
                                            name: "quiz-option",
                                            value: "{option.text}",
                                            checked: option.selected,
                                            onchange: move |evt| {
                                                player.with_mut(|p| {
                                                    if let Some(active) = p.as_mut() {
                                                        active.answer_current(Answer::Choice(evt.value()));
                                                    }
                                                });
                                            },
                                        }
                                        span { "{option.text}" }
                                    }
                                }
                            }
                        },
                        QuestionKind::ShortAnswer => rsx! {
                            input {
                                class: "field-input",
                                r#type: "text",
                                placeholder: "Type your answer here",
                                value: "{step.typed}",
                                oninput: move |evt| {
                                    player.with_mut(|p| {
                                        if let Some(active) = p.as_mut() {
                                            active.answer_current(Answer::Text(evt.value()));
                                        }
                                    });
                                },
                            }
                        },
                    }
                }

                div { class: "quiz-nav",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        disabled: step.at_first,
                        onclick: move |_| {
                            player.with_mut(|p| {
                                if let Some(active) = p.as_mut() {
                                    active.previous();
                                }
                            });
                        },
                        "Previous"
                    }
                    if step.at_last {
                        button {
                            class: "btn btn-success",
                            r#type: "button",
                            disabled: submitting(),
                            onclick: submit,
                            "Submit Quiz"
                        }
                    } else {
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| {
                                player.with_mut(|p| {
                                    if let Some(active) = p.as_mut() {
                                        active.next();
                                    }
                                });
                            },
                            "Next"
                        }
                    }
                }
            }
        }
    }
}
