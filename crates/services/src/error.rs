//! Shared error types for the services crate.

use thiserror::Error;

use backend::BackendError;
use portal_core::ScoringError;
use portal_core::model::IdentityError;

/// Errors emitted by `SessionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("an account with this email already exists")]
    EmailTaken,

    #[error("no profile record for the signed-in account")]
    MissingProfile,

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors emitted by `LessonService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LessonServiceError {
    #[error("lesson not found")]
    NotFound,

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors emitted by `QuizService` and the player.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error("quiz not found")]
    NotFound,

    #[error("quiz has no questions")]
    NoQuestions,

    #[error("quiz already submitted")]
    AlreadySubmitted,

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}
