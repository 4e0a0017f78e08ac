#![forbid(unsafe_code)]

pub mod app_services;
pub mod dashboards;
pub mod error;
pub mod lesson_service;
pub mod quiz_player;
pub mod session_service;

pub use backend::AuthEvents;
pub use portal_core::Clock;

pub use app_services::AppServices;
pub use dashboards::{
    LessonProgressEntry, StudentDashboardService, StudentOverview, TeacherDashboardService,
    TeacherOverview,
};
pub use error::{LessonServiceError, QuizServiceError, SessionError};
pub use lesson_service::{LessonMaterial, LessonService};
pub use quiz_player::{QuizPlayer, QuizResult, QuizService};
pub use session_service::{Registration, SessionService};
