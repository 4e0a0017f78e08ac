mod auth;
mod lesson;
mod navbar;
mod quiz;
mod state;
mod student_dashboard;
mod teacher_dashboard;

pub use auth::AuthPage;
pub use lesson::LessonView;
pub use navbar::Navbar;
pub use quiz::QuizPlayerView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use student_dashboard::StudentDashboardView;
pub use teacher_dashboard::TeacherDashboardView;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
