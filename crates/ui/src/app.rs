use dioxus::prelude::*;

use portal_core::model::{Identity, Role};

use crate::context::AppContext;
use crate::router::Page;
use crate::views::{
    AuthPage, LessonView, Navbar, QuizPlayerView, StudentDashboardView, TeacherDashboardView,
};

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        // Stable OS/window title. Per-page headings live inside the views.
        document::Title { "Gyan Setu" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Shell {}
            }
        }
    }
}

/// Session gate plus the page machine. The identity signal follows the
/// provider: resolved once at start, then re-resolved on every sign-in or
/// sign-out event. The subscription lives inside the future, which Dioxus
/// drops with this scope, so teardown needs no manual unsubscribe.
#[component]
pub fn Shell() -> Element {
    let ctx = use_context::<AppContext>();
    let mut identity = use_signal(|| None::<Identity>);
    let mut booted = use_signal(|| false);
    let mut page = use_signal(Page::default);

    {
        let session = ctx.session();
        use_future(move || {
            let session = session.clone();
            async move {
                identity.set(session.resolve_current().await);
                booted.set(true);

                let mut events = session.subscribe();
                while events.changed().await {
                    identity.set(session.resolve_current().await);
                    // Any auth change resets navigation to the dashboard.
                    page.set(Page::default());
                }
            }
        });
    }

    if !booted() {
        return rsx! {
            div { class: "boot-screen", "Loading..." }
        };
    }

    let Some(user) = identity() else {
        return rsx! {
            AuthPage {}
        };
    };

    let body = match page() {
        Page::Dashboard => match user.role() {
            Role::Student => rsx! {
                StudentDashboardView {
                    user: user.clone(),
                    on_lesson_select: move |lesson_id| page.with_mut(|p| p.select_lesson(lesson_id)),
                }
            },
            Role::Teacher => rsx! {
                TeacherDashboardView { user: user.clone() }
            },
        },
        Page::Lesson(lesson_id) => rsx! {
            LessonView {
                lesson_id,
                user_id: user.id(),
                on_back: move |()| page.with_mut(Page::back),
                on_quiz_start: move |quiz_id| page.with_mut(|p| p.start_quiz(quiz_id)),
            }
        },
        Page::Quiz { quiz, .. } => rsx! {
            QuizPlayerView {
                quiz_id: quiz,
                user_id: user.id(),
                on_back: move |()| page.with_mut(Page::back),
            }
        },
    };

    rsx! {
        Navbar { user: user.clone() }
        main { class: "content", {body} }
    }
}
