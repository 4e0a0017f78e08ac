use std::sync::Arc;

use services::{
    AppServices, LessonService, QuizService, SessionService, StudentDashboardService,
    TeacherDashboardService,
};

/// The services a UI composition root must supply.
pub trait UiApp: Send + Sync {
    fn session(&self) -> Arc<SessionService>;
    fn lessons(&self) -> Arc<LessonService>;
    fn quizzes(&self) -> Arc<QuizService>;
    fn student_dashboard(&self) -> Arc<StudentDashboardService>;
    fn teacher_dashboard(&self) -> Arc<TeacherDashboardService>;
}

impl UiApp for AppServices {
    fn session(&self) -> Arc<SessionService> {
        AppServices::session(self)
    }

    fn lessons(&self) -> Arc<LessonService> {
        AppServices::lessons(self)
    }

    fn quizzes(&self) -> Arc<QuizService> {
        AppServices::quizzes(self)
    }

    fn student_dashboard(&self) -> Arc<StudentDashboardService> {
        AppServices::student_dashboard(self)
    }

    fn teacher_dashboard(&self) -> Arc<TeacherDashboardService> {
        AppServices::teacher_dashboard(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    session: Arc<SessionService>,
    lessons: Arc<LessonService>,
    quizzes: Arc<QuizService>,
    student_dashboard: Arc<StudentDashboardService>,
    teacher_dashboard: Arc<TeacherDashboardService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            session: app.session(),
            lessons: app.lessons(),
            quizzes: app.quizzes(),
            student_dashboard: app.student_dashboard(),
            teacher_dashboard: app.teacher_dashboard(),
        }
    }

    #[must_use]
    pub fn session(&self) -> Arc<SessionService> {
        Arc::clone(&self.session)
    }

    #[must_use]
    pub fn lessons(&self) -> Arc<LessonService> {
        Arc::clone(&self.lessons)
    }

    #[must_use]
    pub fn quizzes(&self) -> Arc<QuizService> {
        Arc::clone(&self.quizzes)
    }

    #[must_use]
    pub fn student_dashboard(&self) -> Arc<StudentDashboardService> {
        Arc::clone(&self.student_dashboard)
    }

    #[must_use]
    pub fn teacher_dashboard(&self) -> Arc<TeacherDashboardService> {
        Arc::clone(&self.teacher_dashboard)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
