use thiserror::Error;

use crate::model::assessment::AssessmentError;
use crate::model::identity::IdentityError;
use crate::model::lesson::LessonError;
use crate::model::progress::ProgressError;
use crate::model::quiz::QuestionError;
use crate::scoring::ScoringError;

/// Umbrella error for domain validation failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Assessment(#[from] AssessmentError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}
