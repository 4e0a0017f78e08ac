use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::{LessonId, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson title cannot be empty")]
    EmptyTitle,
}

/// A published lesson. Immutable from the student's perspective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    id: LessonId,
    title: String,
    description: String,
    content: String,
    subject: String,
    grade_level: u8,
    language: String,
    created_by: UserId,
    created_at: DateTime<Utc>,
}

impl Lesson {
    /// Creates a new Lesson.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::EmptyTitle` if the title is empty or
    /// whitespace-only.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: LessonId,
        title: impl Into<String>,
        description: impl Into<String>,
        content: impl Into<String>,
        subject: impl Into<String>,
        grade_level: u8,
        language: impl Into<String>,
        created_by: UserId,
        created_at: DateTime<Utc>,
    ) -> Result<Self, LessonError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(LessonError::EmptyTitle);
        }

        Ok(Self {
            id,
            title: title.trim().to_owned(),
            description: description.into(),
            content: content.into(),
            subject: subject.into(),
            grade_level,
            language: language.into(),
            created_by,
            created_at,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> LessonId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn grade_level(&self) -> u8 {
        self.grade_level
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn created_by(&self) -> UserId {
        self.created_by
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
