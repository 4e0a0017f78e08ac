//! Wire shapes for the hosted tables and their domain conversions. Unknown
//! enum strings become serialization errors, never panics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use portal_core::model::{
    Assessment, CompletionStatus, Identity, Lesson, LessonId, ProgressId, ProgressRecord,
    Question, QuestionId, QuestionKind, Quiz, QuizId, Role, UserId,
};

use crate::repository::{AssessmentSummaryRow, BackendError};

fn invalid<E: std::fmt::Display>(err: E) -> BackendError {
    BackendError::Serialization(err.to_string())
}

// ─── users ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct IdentityRow {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub school: String,
    pub language_preference: String,
}

impl IdentityRow {
    pub(crate) fn into_identity(self) -> Result<Identity, BackendError> {
        let role = Role::parse(&self.role).map_err(invalid)?;
        Identity::new(
            UserId::new(self.id),
            self.email,
            self.full_name,
            role,
            self.school,
            self.language_preference,
        )
        .map_err(invalid)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct NewIdentityRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub full_name: &'a str,
    pub role: &'static str,
    pub school: &'a str,
    pub language_preference: &'a str,
}

impl<'a> NewIdentityRow<'a> {
    pub(crate) fn from_identity(identity: &'a Identity) -> Self {
        Self {
            id: identity.id().value(),
            email: identity.email(),
            full_name: identity.full_name(),
            role: identity.role().as_str(),
            school: identity.school(),
            language_preference: identity.language_preference(),
        }
    }
}

// ─── lessons ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct LessonRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub content: String,
    pub subject: String,
    pub grade_level: u8,
    pub language: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl LessonRow {
    pub(crate) fn into_lesson(self) -> Result<Lesson, BackendError> {
        Lesson::new(
            LessonId::new(self.id),
            self.title,
            self.description,
            self.content,
            self.subject,
            self.grade_level,
            self.language,
            UserId::new(self.created_by),
            self.created_at,
        )
        .map_err(invalid)
    }
}

// ─── quizzes ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct QuizRow {
    pub id: Uuid,
    pub lesson_id: Uuid,
    pub title: String,
    pub description: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl QuizRow {
    pub(crate) fn into_quiz(self) -> Quiz {
        Quiz::new(
            QuizId::new(self.id),
            LessonId::new(self.lesson_id),
            self.title,
            self.description,
            UserId::new(self.created_by),
            self.created_at,
        )
    }
}

// ─── quiz_questions ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionRow {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub question_text: String,
    pub question_type: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
    pub marks: u32,
    #[serde(rename = "order")]
    pub position: u32,
}

impl QuestionRow {
    pub(crate) fn into_question(self) -> Result<Question, BackendError> {
        let kind = QuestionKind::parse(&self.question_type).map_err(invalid)?;
        Question::new(
            QuestionId::new(self.id),
            QuizId::new(self.quiz_id),
            self.question_text,
            kind,
            self.options.unwrap_or_default(),
            self.correct_answer,
            self.marks,
            self.position,
        )
        .map_err(invalid)
    }
}

// ─── student_progress ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct ProgressRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub lesson_id: Uuid,
    pub completion_status: String,
    pub progress_percentage: u8,
    pub last_accessed_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ProgressRow {
    pub(crate) fn into_progress(self) -> Result<ProgressRecord, BackendError> {
        let status = CompletionStatus::parse(&self.completion_status).map_err(invalid)?;
        ProgressRecord::from_persisted(
            ProgressId::new(self.id),
            UserId::new(self.student_id),
            LessonId::new(self.lesson_id),
            status,
            self.progress_percentage,
            self.last_accessed_at,
            self.completed_at,
        )
        .map_err(invalid)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct NewProgressRow {
    pub student_id: Uuid,
    pub lesson_id: Uuid,
    pub completion_status: &'static str,
    pub progress_percentage: u8,
    pub last_accessed_at: DateTime<Utc>,
}

impl NewProgressRow {
    pub(crate) fn started(student: UserId, lesson: LessonId, at: DateTime<Utc>) -> Self {
        Self {
            student_id: student.value(),
            lesson_id: lesson.value(),
            completion_status: CompletionStatus::InProgress.as_str(),
            progress_percentage: 0,
            last_accessed_at: at,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CompletedProgressPatch {
    pub completion_status: &'static str,
    pub progress_percentage: u8,
    pub completed_at: DateTime<Utc>,
}

impl CompletedProgressPatch {
    pub(crate) fn at(at: DateTime<Utc>) -> Self {
        Self {
            completion_status: CompletionStatus::Completed.as_str(),
            progress_percentage: 100,
            completed_at: at,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct TouchProgressPatch {
    pub last_accessed_at: DateTime<Utc>,
}

// ─── student_assessments ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct NewAssessmentRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub quiz_id: Uuid,
    pub lesson_id: Uuid,
    pub score: u32,
    pub total_marks: u32,
    pub percentage: f64,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub answers: HashMap<String, String>,
}

impl NewAssessmentRow {
    pub(crate) fn from_assessment(assessment: &Assessment) -> Self {
        let answers = assessment
            .answers()
            .iter()
            .map(|(question, answer)| (question.to_string(), answer.as_str().to_string()))
            .collect();
        Self {
            id: assessment.id().value(),
            student_id: assessment.student_id().value(),
            quiz_id: assessment.quiz_id().value(),
            lesson_id: assessment.lesson_id().value(),
            score: assessment.score(),
            total_marks: assessment.total_marks(),
            percentage: assessment.percentage(),
            started_at: assessment.started_at(),
            completed_at: assessment.completed_at(),
            answers,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PercentageRow {
    pub percentage: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SummaryRow {
    pub student_id: Uuid,
    pub percentage: f64,
}

impl SummaryRow {
    pub(crate) fn into_summary(self) -> AssessmentSummaryRow {
        AssessmentSummaryRow {
            student_id: UserId::new(self.student_id),
            percentage: self.percentage,
        }
    }
}
