//! Quiz grading: a single reduction over the fetched question list.

use std::collections::HashMap;
use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::quiz::{Answer, Question};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoringError {
    /// A quiz with no questions cannot be graded; it must be rejected
    /// before the player is entered.
    #[error("quiz has no questions")]
    NoQuestions,
}

/// The outcome of grading one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    score: u32,
    total_marks: u32,
}

impl QuizScore {
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total_marks(&self) -> u32 {
        self.total_marks
    }

    /// `100 · score / total_marks`. A quiz whose questions all carry zero
    /// marks grades as 0%, never NaN.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.total_marks == 0 {
            return 0.0;
        }
        100.0 * f64::from(self.score) / f64::from(self.total_marks)
    }
}

/// Grade a submission: sum the marks of every question whose stored answer
/// equals its correct answer exactly (case- and whitespace-sensitive).
/// Unanswered questions score nothing.
///
/// # Errors
///
/// Returns `ScoringError::NoQuestions` for an empty question list.
pub fn score_quiz(
    questions: &[Question],
    answers: &HashMap<QuestionId, Answer>,
) -> Result<QuizScore, ScoringError> {
    if questions.is_empty() {
        return Err(ScoringError::NoQuestions);
    }

    let mut score = 0_u32;
    let mut total_marks = 0_u32;
    for question in questions {
        total_marks = total_marks.saturating_add(question.marks());
        if answers
            .get(&question.id())
            .is_some_and(|answer| question.matches(answer))
        {
            score = score.saturating_add(question.marks());
        }
    }

    Ok(QuizScore { score, total_marks })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::QuizId;
    use crate::model::quiz::QuestionKind;

    fn question(marks: u32, position: u32, correct: &str) -> Question {
        Question::new(
            QuestionId::random(),
            QuizId::random(),
            format!("Q{position}"),
            QuestionKind::ShortAnswer,
            Vec::new(),
            correct,
            marks,
            position,
        )
        .unwrap()
    }

    #[test]
    fn all_correct_scores_full_marks() {
        let q1 = question(5, 0, "ice");
        let q2 = question(10, 1, "steam");
        let mut answers = HashMap::new();
        answers.insert(q1.id(), Answer::Text("ice".into()));
        answers.insert(q2.id(), Answer::Text("steam".into()));

        let score = score_quiz(&[q1, q2], &answers).unwrap();
        assert_eq!(score.score(), 15);
        assert_eq!(score.total_marks(), 15);
        assert!((score.percentage() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_credit_for_one_of_two() {
        let q1 = question(5, 0, "ice");
        let q2 = question(10, 1, "steam");
        let mut answers = HashMap::new();
        answers.insert(q1.id(), Answer::Text("ice".into()));
        answers.insert(q2.id(), Answer::Text("smoke".into()));

        let score = score_quiz(&[q1, q2], &answers).unwrap();
        assert_eq!(score.score(), 5);
        assert_eq!(score.total_marks(), 15);
        assert!((score.percentage() - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn unanswered_questions_score_nothing() {
        let q1 = question(5, 0, "ice");
        let q2 = question(10, 1, "steam");
        let answers = HashMap::new();

        let score = score_quiz(&[q1, q2], &answers).unwrap();
        assert_eq!(score.score(), 0);
        assert_eq!(score.total_marks(), 15);
        assert!((score.percentage() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn comparison_is_case_and_whitespace_sensitive() {
        let q = question(5, 0, "Ice");
        let mut answers = HashMap::new();
        answers.insert(q.id(), Answer::Text("ice".into()));
        let score = score_quiz(std::slice::from_ref(&q), &answers).unwrap();
        assert_eq!(score.score(), 0);

        answers.insert(q.id(), Answer::Text("Ice ".into()));
        let score = score_quiz(std::slice::from_ref(&q), &answers).unwrap();
        assert_eq!(score.score(), 0);
    }

    #[test]
    fn empty_quiz_is_rejected() {
        let err = score_quiz(&[], &HashMap::new()).unwrap_err();
        assert_eq!(err, ScoringError::NoQuestions);
    }

    #[test]
    fn zero_mark_quiz_grades_as_zero_percent() {
        let q = question(0, 0, "ice");
        let mut answers = HashMap::new();
        answers.insert(q.id(), Answer::Text("ice".into()));
        let score = score_quiz(std::slice::from_ref(&q), &answers).unwrap();
        assert_eq!(score.total_marks(), 0);
        assert!((score.percentage() - 0.0).abs() < f64::EPSILON);
    }
}
