use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;

use backend::InMemoryBackend;
use portal_core::model::{Identity, LessonId, QuizId, Role, UserId};
use portal_core::time::fixed_clock;
use services::AppServices;

use crate::context::{UiApp, build_app_context};
use crate::views::{
    AuthPage, LessonView, QuizPlayerView, StudentDashboardView, TeacherDashboardView,
};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Auth,
    StudentDashboard,
    TeacherDashboard,
    Lesson(LessonId),
    Quiz(QuizId),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    services: AppServices,
    user: Identity,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = Arc::new(props.services.clone());
    use_context_provider(|| build_app_context(&app));

    let user = props.user.clone();
    match props.view {
        ViewKind::Auth => rsx! {
            AuthPage {}
        },
        ViewKind::StudentDashboard => rsx! {
            StudentDashboardView { user, on_lesson_select: move |_| {} }
        },
        ViewKind::TeacherDashboard => rsx! {
            TeacherDashboardView { user }
        },
        ViewKind::Lesson(lesson_id) => rsx! {
            LessonView {
                lesson_id,
                user_id: user.id(),
                on_back: move |_| {},
                on_quiz_start: move |_| {},
            }
        },
        ViewKind::Quiz(quiz_id) => rsx! {
            QuizPlayerView { quiz_id, user_id: user.id(), on_back: move |_| {} }
        },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub mem: InMemoryBackend,
    pub user: Identity,
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

    /// Let spawned fetches resolve and their updates render.
    pub async fn settle(&mut self) {
        for _ in 0..5 {
            self.drive_async().await;
        }
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

pub fn student_identity() -> Identity {
    Identity::new(
        UserId::random(),
        "ria@example.com",
        "Ria Sharma",
        Role::Student,
        "Hill Valley School",
        "en",
    )
    .expect("valid identity")
}

pub fn teacher_identity() -> Identity {
    Identity::new(
        UserId::random(),
        "anita@example.com",
        "Anita Desai",
        Role::Teacher,
        "Hill Valley School",
        "en",
    )
    .expect("valid identity")
}

pub fn setup_view_harness(view: ViewKind, mem: InMemoryBackend, user: Identity) -> ViewHarness {
    let services = AppServices::new(fixed_clock(), &mem.backend());
    let dom = VirtualDom::new_with_props(
        ViewHarnessRoot,
        ViewHarnessProps {
            services,
            user: user.clone(),
            view,
        },
    );

    ViewHarness { dom, mem, user }
}
