use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{LessonId, ProgressId, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("progress percentage must be in 0..=100, got {0}")]
    InvalidPercentage(u8),

    #[error("completed record must carry percentage 100")]
    IncompleteCompletion,

    #[error("unknown completion status: {0}")]
    UnknownStatus(String),
}

/// Lesson completion state. Progression is monotonic: absent/not-started
/// records move to in-progress on first view and from there only to
/// completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl CompletionStatus {
    /// Wire representation used by the hosted service.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionStatus::NotStarted => "not_started",
            CompletionStatus::InProgress => "in_progress",
            CompletionStatus::Completed => "completed",
        }
    }

    /// Parse the wire representation.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::UnknownStatus` for any other string.
    pub fn parse(raw: &str) -> Result<Self, ProgressError> {
        match raw {
            "not_started" => Ok(CompletionStatus::NotStarted),
            "in_progress" => Ok(CompletionStatus::InProgress),
            "completed" => Ok(CompletionStatus::Completed),
            other => Err(ProgressError::UnknownStatus(other.to_string())),
        }
    }
}

/// Per-student-per-lesson completion tracking row. At most one exists per
/// (student, lesson) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    id: ProgressId,
    student_id: UserId,
    lesson_id: LessonId,
    status: CompletionStatus,
    percentage: u8,
    last_accessed_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl ProgressRecord {
    /// The record created when a student first opens a lesson: in-progress
    /// at zero percent.
    #[must_use]
    pub fn started(
        id: ProgressId,
        student_id: UserId,
        lesson_id: LessonId,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            student_id,
            lesson_id,
            status: CompletionStatus::InProgress,
            percentage: 0,
            last_accessed_at: Some(at),
            completed_at: None,
        }
    }

    /// Rehydrate a record from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::InvalidPercentage` for a percentage above 100
    /// and `ProgressError::IncompleteCompletion` for a completed record whose
    /// percentage is not 100.
    pub fn from_persisted(
        id: ProgressId,
        student_id: UserId,
        lesson_id: LessonId,
        status: CompletionStatus,
        percentage: u8,
        last_accessed_at: Option<DateTime<Utc>>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<Self, ProgressError> {
        if percentage > 100 {
            return Err(ProgressError::InvalidPercentage(percentage));
        }
        if status == CompletionStatus::Completed && percentage != 100 {
            return Err(ProgressError::IncompleteCompletion);
        }

        Ok(Self {
            id,
            student_id,
            lesson_id,
            status,
            percentage,
            last_accessed_at,
            completed_at,
        })
    }

    /// Mark the lesson completed, stamping the completion time and setting
    /// the percentage to 100. Completing an already-completed record is a
    /// no-op: the status never regresses and the original timestamp wins.
    pub fn complete(&mut self, at: DateTime<Utc>) {
        if self.status == CompletionStatus::Completed {
            return;
        }
        self.status = CompletionStatus::Completed;
        self.percentage = 100;
        self.completed_at = Some(at);
    }

    /// Stamp a view of the lesson.
    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.last_accessed_at = Some(at);
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> ProgressId {
        self.id
    }

    #[must_use]
    pub fn student_id(&self) -> UserId {
        self.student_id
    }

    #[must_use]
    pub fn lesson_id(&self) -> LessonId {
        self.lesson_id
    }

    #[must_use]
    pub fn status(&self) -> CompletionStatus {
        self.status
    }

    #[must_use]
    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    #[must_use]
    pub fn last_accessed_at(&self) -> Option<DateTime<Utc>> {
        self.last_accessed_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == CompletionStatus::Completed
    }
}
