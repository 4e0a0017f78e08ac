use async_trait::async_trait;

use super::HostedClient;
use super::query::eq;
use super::rows::{QuestionRow, QuizRow};
use crate::repository::{BackendError, QuizRepository};
use portal_core::model::{LessonId, Question, Quiz, QuizId};

#[async_trait]
impl QuizRepository for HostedClient {
    async fn get_quiz(&self, id: QuizId) -> Result<Option<Quiz>, BackendError> {
        let row: Option<QuizRow> = self.select_one("quizzes", &[("id", eq(id))]).await?;
        Ok(row.map(QuizRow::into_quiz))
    }

    async fn list_quizzes_for_lesson(&self, lesson: LessonId) -> Result<Vec<Quiz>, BackendError> {
        let rows: Vec<QuizRow> = self
            .select_rows("quizzes", &[("lesson_id", eq(lesson))], None)
            .await?;
        Ok(rows.into_iter().map(QuizRow::into_quiz).collect())
    }

    async fn list_questions(&self, quiz: QuizId) -> Result<Vec<Question>, BackendError> {
        let rows: Vec<QuestionRow> = self
            .select_rows("quiz_questions", &[("quiz_id", eq(quiz))], Some("order.asc"))
            .await?;
        rows.into_iter().map(QuestionRow::into_question).collect()
    }
}
