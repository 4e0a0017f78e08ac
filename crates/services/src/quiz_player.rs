//! The quiz player: fetch, step through questions, collect answers, grade
//! once on submit.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

use backend::{AssessmentRepository, QuizRepository};
use chrono::{DateTime, Utc};
use portal_core::model::{
    Answer, Assessment, AssessmentId, Question, QuestionId, Quiz, QuizId, UserId,
};
use portal_core::{Clock, QuizScore, score_quiz};

use crate::error::QuizServiceError;

/// The score shown after submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizResult {
    pub score: u32,
    pub total_marks: u32,
    pub percentage: f64,
}

impl From<QuizScore> for QuizResult {
    fn from(score: QuizScore) -> Self {
        Self {
            score: score.score(),
            total_marks: score.total_marks(),
            percentage: score.percentage(),
        }
    }
}

/// In-memory state of one quiz attempt.
///
/// Constructed only after the quiz and its ordered questions are fetched, so
/// "loading" never leaks in here; the index stays clamped to
/// `[0, question_count - 1]` and submission is one-way.
pub struct QuizPlayer {
    quiz: Quiz,
    questions: Vec<Question>,
    current: usize,
    answers: HashMap<QuestionId, Answer>,
    started_at: DateTime<Utc>,
    submitted: Option<QuizResult>,
}

impl QuizPlayer {
    /// # Errors
    ///
    /// Returns `QuizServiceError::NoQuestions` for an empty quiz; the player
    /// is never entered in that case.
    pub fn new(
        quiz: Quiz,
        mut questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, QuizServiceError> {
        if questions.is_empty() {
            return Err(QuizServiceError::NoQuestions);
        }
        // Traversal order is the display order, whatever order rows arrived.
        questions.sort_by_key(Question::position);

        Ok(Self {
            quiz,
            questions,
            current: 0,
            answers: HashMap::new(),
            started_at,
            submitted: None,
        })
    }

    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The question at the current index. Always present: the player
    /// rejects empty quizzes and clamps the index.
    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    /// The stored answer for the current question, if any. Revisiting a
    /// question restores what was selected or typed before.
    #[must_use]
    pub fn current_answer(&self) -> Option<&Answer> {
        self.answers.get(&self.current_question().id())
    }

    /// Store (or overwrite) the current question's answer.
    pub fn answer_current(&mut self, answer: Answer) {
        let id = self.current_question().id();
        self.answers.insert(id, answer);
    }

    /// Step forward. A no-op at the last question.
    pub fn next(&mut self) {
        if self.current + 1 < self.questions.len() {
            self.current += 1;
        }
    }

    /// Step back. A no-op at the first question.
    pub fn previous(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    #[must_use]
    pub fn at_first(&self) -> bool {
        self.current == 0
    }

    #[must_use]
    pub fn at_last(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    #[must_use]
    pub fn result(&self) -> Option<QuizResult> {
        self.submitted
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submitted.is_some()
    }

    /// Grade the attempt and build the assessment record to persist. The
    /// transition is one-way.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::AlreadySubmitted` on a second submission.
    pub(crate) fn grade(
        &mut self,
        student: UserId,
        completed_at: DateTime<Utc>,
    ) -> Result<(Assessment, QuizResult), QuizServiceError> {
        if self.submitted.is_some() {
            return Err(QuizServiceError::AlreadySubmitted);
        }

        let score = score_quiz(&self.questions, &self.answers)?;
        let result = QuizResult::from(score);
        self.submitted = Some(result);

        let assessment = Assessment::from_submission(
            AssessmentId::random(),
            student,
            self.quiz.id(),
            self.quiz.lesson_id(),
            score,
            self.started_at,
            completed_at,
            self.answers.clone(),
        );
        Ok((assessment, result))
    }
}

impl fmt::Debug for QuizPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizPlayer")
            .field("quiz_id", &self.quiz.id())
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answered", &self.answers.len())
            .field("submitted", &self.submitted.is_some())
            .finish_non_exhaustive()
    }
}

/// Fetches quizzes and persists submissions.
pub struct QuizService {
    clock: Clock,
    quizzes: Arc<dyn QuizRepository>,
    assessments: Arc<dyn AssessmentRepository>,
}

impl QuizService {
    #[must_use]
    pub fn new(
        clock: Clock,
        quizzes: Arc<dyn QuizRepository>,
        assessments: Arc<dyn AssessmentRepository>,
    ) -> Self {
        Self {
            clock,
            quizzes,
            assessments,
        }
    }

    /// Fetch the quiz and its questions and enter the player.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::NotFound` when the quiz is absent and
    /// `QuizServiceError::NoQuestions` when it has no questions.
    pub async fn start(&self, quiz_id: QuizId) -> Result<QuizPlayer, QuizServiceError> {
        let quiz = self
            .quizzes
            .get_quiz(quiz_id)
            .await?
            .ok_or(QuizServiceError::NotFound)?;
        let questions = self.quizzes.list_questions(quiz_id).await?;
        QuizPlayer::new(quiz, questions, self.clock.now())
    }

    /// Grade and persist one submission. The local result stands even when
    /// the remote write fails; the failure is logged, not surfaced, matching
    /// the portal's optimistic write behavior.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::AlreadySubmitted` on a second submission.
    pub async fn submit(
        &self,
        player: &mut QuizPlayer,
        student: UserId,
    ) -> Result<QuizResult, QuizServiceError> {
        let (assessment, result) = player.grade(student, self.clock.now())?;
        if let Err(err) = self.assessments.insert_assessment(&assessment).await {
            warn!(%err, quiz = %assessment.quiz_id(), "assessment insert failed; result kept locally");
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend::InMemoryBackend;
    use portal_core::model::{LessonId, QuestionKind};
    use portal_core::time::{fixed_clock, fixed_now};

    fn quiz(id: QuizId) -> Quiz {
        Quiz::new(
            id,
            LessonId::random(),
            "States of matter",
            "Two quick questions",
            UserId::random(),
            fixed_now(),
        )
    }

    fn question(quiz_id: QuizId, marks: u32, position: u32, correct: &str) -> Question {
        Question::new(
            QuestionId::random(),
            quiz_id,
            format!("Q{position}"),
            QuestionKind::ShortAnswer,
            Vec::new(),
            correct,
            marks,
            position,
        )
        .unwrap()
    }

    fn player_with(marks: &[(u32, &str)]) -> QuizPlayer {
        let quiz_id = QuizId::random();
        let questions = marks
            .iter()
            .enumerate()
            .map(|(position, (m, correct))| {
                question(quiz_id, *m, u32::try_from(position).unwrap(), correct)
            })
            .collect();
        QuizPlayer::new(quiz(quiz_id), questions, fixed_now()).unwrap()
    }

    #[test]
    fn empty_quiz_is_rejected_before_entry() {
        let err = QuizPlayer::new(quiz(QuizId::random()), Vec::new(), fixed_now()).unwrap_err();
        assert!(matches!(err, QuizServiceError::NoQuestions));
    }

    #[test]
    fn traversal_clamps_at_both_ends() {
        let mut player = player_with(&[(5, "ice"), (10, "steam")]);

        player.previous();
        assert_eq!(player.current_index(), 0);

        player.next();
        assert_eq!(player.current_index(), 1);
        player.next();
        assert_eq!(player.current_index(), 1);
        assert!(player.at_last());
    }

    #[test]
    fn questions_are_traversed_in_display_order() {
        let quiz_id = QuizId::random();
        // Arrival order deliberately reversed.
        let questions = vec![
            question(quiz_id, 10, 1, "steam"),
            question(quiz_id, 5, 0, "ice"),
        ];
        let player = QuizPlayer::new(quiz(quiz_id), questions, fixed_now()).unwrap();
        assert_eq!(player.current_question().position(), 0);
        assert_eq!(player.current_question().marks(), 5);
    }

    #[test]
    fn revisiting_a_question_restores_its_answer() {
        let mut player = player_with(&[(5, "ice"), (10, "steam")]);

        player.answer_current(Answer::Text("ice".into()));
        player.next();
        assert_eq!(player.current_answer(), None);
        player.previous();
        assert_eq!(player.current_answer(), Some(&Answer::Text("ice".into())));
    }

    #[tokio::test]
    async fn full_marks_submission() {
        let mem = InMemoryBackend::new();
        let service = QuizService::new(
            fixed_clock(),
            mem.backend().quizzes,
            mem.backend().assessments,
        );
        let student = UserId::random();
        let mut player = player_with(&[(5, "ice"), (10, "steam")]);

        player.answer_current(Answer::Text("ice".into()));
        player.next();
        player.answer_current(Answer::Text("steam".into()));

        let result = service.submit(&mut player, student).await.unwrap();
        assert_eq!(result.score, 15);
        assert_eq!(result.total_marks, 15);
        assert!((result.percentage - 100.0).abs() < f64::EPSILON);

        let percentages = mem
            .backend()
            .assessments
            .list_percentages_for_student(student)
            .await
            .unwrap();
        assert_eq!(percentages.len(), 1);
    }

    #[tokio::test]
    async fn partial_submission_scores_one_third() {
        let mem = InMemoryBackend::new();
        let service = QuizService::new(
            fixed_clock(),
            mem.backend().quizzes,
            mem.backend().assessments,
        );
        let mut player = player_with(&[(5, "ice"), (10, "steam")]);

        player.answer_current(Answer::Text("ice".into()));
        // The 10-mark question is left unanswered.

        let result = service
            .submit(&mut player, UserId::random())
            .await
            .unwrap();
        assert_eq!(result.score, 5);
        assert_eq!(result.total_marks, 15);
        assert!((result.percentage - 100.0 / 3.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn second_submission_is_rejected() {
        let mem = InMemoryBackend::new();
        let service = QuizService::new(
            fixed_clock(),
            mem.backend().quizzes,
            mem.backend().assessments,
        );
        let student = UserId::random();
        let mut player = player_with(&[(5, "ice")]);

        service.submit(&mut player, student).await.unwrap();
        let err = service.submit(&mut player, student).await.unwrap_err();
        assert!(matches!(err, QuizServiceError::AlreadySubmitted));

        // Only one record was appended.
        let percentages = mem
            .backend()
            .assessments
            .list_percentages_for_student(student)
            .await
            .unwrap();
        assert_eq!(percentages.len(), 1);
    }

    #[tokio::test]
    async fn start_rejects_a_quiz_with_no_questions() {
        let mem = InMemoryBackend::new();
        let quiz_id = QuizId::random();
        mem.seed_quiz(quiz(quiz_id));

        let service = QuizService::new(
            fixed_clock(),
            mem.backend().quizzes,
            mem.backend().assessments,
        );
        let err = service.start(quiz_id).await.unwrap_err();
        assert!(matches!(err, QuizServiceError::NoQuestions));
    }
}
