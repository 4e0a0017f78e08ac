use async_trait::async_trait;

use super::HostedClient;
use super::query::eq;
use super::rows::LessonRow;
use crate::repository::{BackendError, LessonRepository};
use portal_core::model::{Lesson, LessonId, UserId};

#[async_trait]
impl LessonRepository for HostedClient {
    async fn list_lessons(&self) -> Result<Vec<Lesson>, BackendError> {
        let rows: Vec<LessonRow> = self
            .select_rows("lessons", &[], Some("created_at.desc"))
            .await?;
        rows.into_iter().map(LessonRow::into_lesson).collect()
    }

    async fn get_lesson(&self, id: LessonId) -> Result<Option<Lesson>, BackendError> {
        let row: Option<LessonRow> = self.select_one("lessons", &[("id", eq(id))]).await?;
        row.map(LessonRow::into_lesson).transpose()
    }

    async fn list_lessons_by_author(&self, author: UserId) -> Result<Vec<Lesson>, BackendError> {
        let rows: Vec<LessonRow> = self
            .select_rows(
                "lessons",
                &[("created_by", eq(author))],
                Some("created_at.desc"),
            )
            .await?;
        rows.into_iter().map(LessonRow::into_lesson).collect()
    }
}
