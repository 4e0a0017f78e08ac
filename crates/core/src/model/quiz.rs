use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{LessonId, QuestionId, QuizId, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("multiple-choice question needs at least one option")]
    NoOptions,

    #[error("correct answer is not one of the options")]
    CorrectAnswerNotAnOption,

    #[error("unknown question kind: {0}")]
    UnknownKind(String),
}

/// A quiz attached to a lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    id: QuizId,
    lesson_id: LessonId,
    title: String,
    description: String,
    created_by: UserId,
    created_at: DateTime<Utc>,
}

impl Quiz {
    #[must_use]
    pub fn new(
        id: QuizId,
        lesson_id: LessonId,
        title: impl Into<String>,
        description: impl Into<String>,
        created_by: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            lesson_id,
            title: title.into(),
            description: description.into(),
            created_by,
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> QuizId {
        self.id
    }

    #[must_use]
    pub fn lesson_id(&self) -> LessonId {
        self.lesson_id
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
    pub fn created_by(&self) -> UserId {
        self.created_by
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    ShortAnswer,
}

impl QuestionKind {
    /// Wire representation used by the hosted service.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "multiple_choice",
            QuestionKind::ShortAnswer => "short_answer",
        }
    }

    /// Parse the wire representation.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::UnknownKind` for any other string.
    pub fn parse(raw: &str) -> Result<Self, QuestionError> {
        match raw {
            "multiple_choice" => Ok(QuestionKind::MultipleChoice),
            "short_answer" => Ok(QuestionKind::ShortAnswer),
            other => Err(QuestionError::UnknownKind(other.to_string())),
        }
    }
}

/// A submitted answer value. The variant mirrors the question kind so a
/// free-text value can never masquerade as an option selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    /// The selected option text of a multiple-choice question.
    Choice(String),
    /// Raw text typed for a short-answer question.
    Text(String),
}

impl Answer {
    /// The submitted value as stored and compared by the grader.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Answer::Choice(value) | Answer::Text(value) => value,
        }
    }
}

/// One question of a quiz. `position` is unique within the quiz and defines
/// traversal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    quiz_id: QuizId,
    prompt: String,
    kind: QuestionKind,
    options: Vec<String>,
    correct_answer: String,
    marks: u32,
    position: u32,
}

impl Question {
    /// Creates a new Question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` if the prompt is blank,
    /// `QuestionError::NoOptions` if a multiple-choice question has no
    /// options, and `QuestionError::CorrectAnswerNotAnOption` if the correct
    /// answer is missing from the option list.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: QuestionId,
        quiz_id: QuizId,
        prompt: impl Into<String>,
        kind: QuestionKind,
        options: Vec<String>,
        correct_answer: impl Into<String>,
        marks: u32,
        position: u32,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        let correct_answer = correct_answer.into();
        if kind == QuestionKind::MultipleChoice {
            if options.is_empty() {
                return Err(QuestionError::NoOptions);
            }
            if !options.iter().any(|option| *option == correct_answer) {
                return Err(QuestionError::CorrectAnswerNotAnOption);
            }
        }

        Ok(Self {
            id,
            quiz_id,
            prompt,
            kind,
            options,
            correct_answer,
            marks,
            position,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn quiz_id(&self) -> QuizId {
        self.quiz_id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn marks(&self) -> u32 {
        self.marks
    }

    #[must_use]
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Exact, case- and whitespace-sensitive comparison against the stored
    /// correct answer. No normalization.
    #[must_use]
    pub fn matches(&self, answer: &Answer) -> bool {
        answer.as_str() == self.correct_answer
    }
}
