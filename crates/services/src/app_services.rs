use std::sync::Arc;

use backend::{Backend, HostedConfig};
use portal_core::Clock;

use crate::dashboards::{StudentDashboardService, TeacherDashboardService};
use crate::lesson_service::LessonService;
use crate::quiz_player::QuizService;
use crate::session_service::SessionService;

/// Assembles the app-facing services over one backend.
#[derive(Clone)]
pub struct AppServices {
    session: Arc<SessionService>,
    lessons: Arc<LessonService>,
    quizzes: Arc<QuizService>,
    student_dashboard: Arc<StudentDashboardService>,
    teacher_dashboard: Arc<TeacherDashboardService>,
}

impl AppServices {
    /// Wire every service to the given backend.
    #[must_use]
    pub fn new(clock: Clock, backend: &Backend) -> Self {
        let session = Arc::new(SessionService::new(
            Arc::clone(&backend.auth),
            Arc::clone(&backend.identities),
        ));
        let lessons = Arc::new(LessonService::new(
            clock,
            Arc::clone(&backend.lessons),
            Arc::clone(&backend.progress),
            Arc::clone(&backend.quizzes),
        ));
        let quizzes = Arc::new(QuizService::new(
            clock,
            Arc::clone(&backend.quizzes),
            Arc::clone(&backend.assessments),
        ));
        let student_dashboard = Arc::new(StudentDashboardService::new(
            Arc::clone(&backend.lessons),
            Arc::clone(&backend.progress),
            Arc::clone(&backend.assessments),
        ));
        let teacher_dashboard = Arc::new(TeacherDashboardService::new(
            Arc::clone(&backend.identities),
            Arc::clone(&backend.lessons),
            Arc::clone(&backend.assessments),
        ));

        Self {
            session,
            lessons,
            quizzes,
            student_dashboard,
            teacher_dashboard,
        }
    }

    /// Services over the hosted backend with the real clock.
    #[must_use]
    pub fn hosted(config: HostedConfig) -> Self {
        Self::new(Clock::default_clock(), &Backend::hosted(config))
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
