use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

use portal_core::model::{
    Assessment, Identity, Lesson, LessonId, ProgressRecord, Question, Quiz, QuizId, UserId,
};

/// Errors surfaced by the external-service boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BackendError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("email already registered")]
    EmailTaken,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// What the auth provider knows about the signed-in user. The profile row
/// (role, school, language) lives in the relational store and is resolved
/// separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: UserId,
    pub email: String,
}

/// A change-notification handle for the provider session. The stream fires
/// on every sign-in and sign-out bound to the same provider client.
/// Dropping the handle releases the subscription; holders get exactly-once
/// teardown by construction.
#[derive(Debug, Clone)]
pub struct AuthEvents {
    rx: watch::Receiver<()>,
}

impl AuthEvents {
    #[must_use]
    pub fn new(rx: watch::Receiver<()>) -> Self {
        Self { rx }
    }

    /// Wait for the next sign-in/sign-out. Returns `false` once the
    /// provider has shut down and no further events can fire.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

/// Contract for the hosted authentication capability.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::EmailTaken` for a duplicate registration, or
    /// other backend errors.
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, BackendError>;

    /// Authenticate with email and password.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::InvalidCredentials` on bad credentials, or
    /// other backend errors.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, BackendError>;

    /// Invalidate the provider session.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the provider rejects the request.
    async fn sign_out(&self) -> Result<(), BackendError>;

    /// The session the provider currently holds, if any.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the provider cannot be reached.
    async fn current_session(&self) -> Result<Option<AuthUser>, BackendError>;

    /// Register for sign-in/sign-out notifications.
    fn subscribe(&self) -> AuthEvents;
}

/// Contract for the profile-row table.
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Fetch one profile row.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport or decode failures; an absent row
    /// is `Ok(None)`.
    async fn get_identity(&self, id: UserId) -> Result<Option<Identity>, BackendError>;

    /// Insert the profile row created at registration.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Conflict` if the row already exists.
    async fn insert_identity(&self, identity: &Identity) -> Result<(), BackendError>;

    /// All identities with the student role.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport or decode failures.
    async fn list_students(&self) -> Result<Vec<Identity>, BackendError>;
}

/// Contract for the lesson table.
#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// Every lesson, newest first.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport or decode failures.
    async fn list_lessons(&self) -> Result<Vec<Lesson>, BackendError>;

    /// Fetch one lesson.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport or decode failures; an absent row
    /// is `Ok(None)`.
    async fn get_lesson(&self, id: LessonId) -> Result<Option<Lesson>, BackendError>;

    /// Lessons authored by the given teacher.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport or decode failures.
    async fn list_lessons_by_author(&self, author: UserId) -> Result<Vec<Lesson>, BackendError>;
}

/// Contract for quizzes and their questions.
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Fetch one quiz.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport or decode failures; an absent row
    /// is `Ok(None)`.
    async fn get_quiz(&self, id: QuizId) -> Result<Option<Quiz>, BackendError>;

    /// Quizzes attached to a lesson.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport or decode failures.
    async fn list_quizzes_for_lesson(&self, lesson: LessonId) -> Result<Vec<Quiz>, BackendError>;

    /// A quiz's questions in ascending display order.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport or decode failures.
    async fn list_questions(&self, quiz: QuizId) -> Result<Vec<Question>, BackendError>;
}

/// Contract for per-student-per-lesson progress rows.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// The unique row for (student, lesson), if any.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport or decode failures.
    async fn get_progress(
        &self,
        student: UserId,
        lesson: LessonId,
    ) -> Result<Option<ProgressRecord>, BackendError>;

    /// Every progress row belonging to a student.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport or decode failures.
    async fn list_progress_for_student(
        &self,
        student: UserId,
    ) -> Result<Vec<ProgressRecord>, BackendError>;

    /// Idempotent "the student has opened this lesson" upsert, keyed by the
    /// natural (student, lesson) pair. Creates an in-progress row at zero
    /// percent on first call; later calls only stamp the last-accessed time.
    /// Two concurrent calls for the same pair must not create two rows.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the upsert cannot be performed.
    async fn ensure_started(
        &self,
        student: UserId,
        lesson: LessonId,
        at: DateTime<Utc>,
    ) -> Result<ProgressRecord, BackendError>;

    /// Overwrite the row to completed/100 with a completion timestamp.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the update cannot be performed.
    async fn mark_completed(
        &self,
        student: UserId,
        lesson: LessonId,
        at: DateTime<Utc>,
    ) -> Result<(), BackendError>;
}

/// The (student, percentage) projection the teacher dashboard reads.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentSummaryRow {
    pub student_id: UserId,
    pub percentage: f64,
}

/// Contract for the assessment log.
#[async_trait]
pub trait AssessmentRepository: Send + Sync {
    /// Append one submission record.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the insert cannot be performed.
    async fn insert_assessment(&self, assessment: &Assessment) -> Result<(), BackendError>;

    /// Percentages of every assessment a student has submitted.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport or decode failures.
    async fn list_percentages_for_student(
        &self,
        student: UserId,
    ) -> Result<Vec<f64>, BackendError>;

    /// Summary rows of every assessment tied to one of the given lessons.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport or decode failures.
    async fn list_for_lessons(
        &self,
        lessons: &[LessonId],
    ) -> Result<Vec<AssessmentSummaryRow>, BackendError>;
}

/// Aggregates the auth capability and entity repositories behind trait
/// objects for easy backend swapping.
#[derive(Clone)]
pub struct Backend {
    pub auth: Arc<dyn AuthProvider>,
    pub identities: Arc<dyn IdentityRepository>,
    pub lessons: Arc<dyn LessonRepository>,
    pub quizzes: Arc<dyn QuizRepository>,
    pub progress: Arc<dyn ProgressRepository>,
    pub assessments: Arc<dyn AssessmentRepository>,
}

impl Backend {
    /// A fresh in-memory backend for tests and prototyping.
    #[must_use]
    pub fn in_memory() -> Self {
        crate::memory::InMemoryBackend::new().backend()
    }
}
