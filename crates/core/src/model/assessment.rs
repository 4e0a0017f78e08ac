use chrono::{DateTime, Utc};
use std::collections::HashMap;
use thiserror::Error;

use crate::model::ids::{AssessmentId, LessonId, QuestionId, QuizId, UserId};
use crate::model::quiz::Answer;
use crate::scoring::QuizScore;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum AssessmentError {
    #[error("assessment percentage must be in 0..=100, got {0}")]
    InvalidPercentage(f64),
}

/// An immutable log of one quiz submission and its score. One record is
/// appended per submission; there is no update-in-place and no attempt
/// limit.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    id: AssessmentId,
    student_id: UserId,
    quiz_id: QuizId,
    lesson_id: LessonId,
    score: u32,
    total_marks: u32,
    percentage: f64,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    answers: HashMap<QuestionId, Answer>,
}

impl Assessment {
    /// Build the record appended when a quiz is submitted.
    #[must_use]
    pub fn from_submission(
        id: AssessmentId,
        student_id: UserId,
        quiz_id: QuizId,
        lesson_id: LessonId,
        score: QuizScore,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        answers: HashMap<QuestionId, Answer>,
    ) -> Self {
        Self {
            id,
            student_id,
            quiz_id,
            lesson_id,
            score: score.score(),
            total_marks: score.total_marks(),
            percentage: score.percentage(),
            started_at,
            completed_at: Some(completed_at),
            answers,
        }
    }

    /// Rehydrate a record from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::InvalidPercentage` if the stored percentage
    /// falls outside `[0, 100]` or is not a number.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persisted(
        id: AssessmentId,
        student_id: UserId,
        quiz_id: QuizId,
        lesson_id: LessonId,
        score: u32,
        total_marks: u32,
        percentage: f64,
        started_at: DateTime<Utc>,
        completed_at: Option<DateTime<Utc>>,
        answers: HashMap<QuestionId, Answer>,
    ) -> Result<Self, AssessmentError> {
        if !(0.0..=100.0).contains(&percentage) {
            return Err(AssessmentError::InvalidPercentage(percentage));
        }

        Ok(Self {
            id,
            student_id,
            quiz_id,
            lesson_id,
            score,
            total_marks,
            percentage,
            started_at,
            completed_at,
            answers,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> AssessmentId {
        self.id
    }

    #[must_use]
    pub fn student_id(&self) -> UserId {
        self.student_id
    }

    #[must_use]
    pub fn quiz_id(&self) -> QuizId {
        self.quiz_id
    }

    #[must_use]
    pub fn lesson_id(&self) -> LessonId {
        self.lesson_id
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total_marks(&self) -> u32 {
        self.total_marks
    }

    #[must_use]
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn answers(&self) -> &HashMap<QuestionId, Answer> {
        &self.answers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn from_persisted_rejects_out_of_range_percentage() {
        let err = Assessment::from_persisted(
            AssessmentId::random(),
            UserId::random(),
            QuizId::random(),
            LessonId::random(),
            3,
            2,
            150.0,
            fixed_now(),
            Some(fixed_now()),
            HashMap::new(),
        )
        .unwrap_err();
        assert_eq!(err, AssessmentError::InvalidPercentage(150.0));
    }

    #[test]
    fn from_persisted_rejects_nan_percentage() {
        let err = Assessment::from_persisted(
            AssessmentId::random(),
            UserId::random(),
            QuizId::random(),
            LessonId::random(),
            0,
            0,
            f64::NAN,
            fixed_now(),
            None,
            HashMap::new(),
        )
        .unwrap_err();
        assert!(matches!(err, AssessmentError::InvalidPercentage(_)));
    }
}
