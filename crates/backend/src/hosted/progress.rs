use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::HostedClient;
use super::query::eq;
use super::rows::{CompletedProgressPatch, NewProgressRow, ProgressRow, TouchProgressPatch};
use crate::repository::{BackendError, ProgressRepository};
use portal_core::model::{LessonId, ProgressRecord, UserId};

fn pair_filters(student: UserId, lesson: LessonId) -> [(&'static str, String); 2] {
    [("student_id", eq(student)), ("lesson_id", eq(lesson))]
}

#[async_trait]
impl ProgressRepository for HostedClient {
    async fn get_progress(
        &self,
        student: UserId,
        lesson: LessonId,
    ) -> Result<Option<ProgressRecord>, BackendError> {
        let row: Option<ProgressRow> = self
            .select_one("student_progress", &pair_filters(student, lesson))
            .await?;
        row.map(ProgressRow::into_progress).transpose()
    }

    async fn list_progress_for_student(
        &self,
        student: UserId,
    ) -> Result<Vec<ProgressRecord>, BackendError> {
        let rows: Vec<ProgressRow> = self
            .select_rows("student_progress", &[("student_id", eq(student))], None)
            .await?;
        rows.into_iter().map(ProgressRow::into_progress).collect()
    }

    async fn ensure_started(
        &self,
        student: UserId,
        lesson: LessonId,
        at: DateTime<Utc>,
    ) -> Result<ProgressRecord, BackendError> {
        // Conflict on the natural key means somebody (possibly another
        // browser context) already created the row; only the access stamp
        // moves in that case, never the status.
        let created: Option<ProgressRow> = self
            .insert_ignore_duplicates(
                "student_progress",
                "student_id,lesson_id",
                &NewProgressRow::started(student, lesson, at),
            )
            .await?;
        if let Some(row) = created {
            return row.into_progress();
        }

        self.update_rows(
            "student_progress",
            &pair_filters(student, lesson),
            &TouchProgressPatch {
                last_accessed_at: at,
            },
        )
        .await?;
        let row: Option<ProgressRow> = self
            .select_one("student_progress", &pair_filters(student, lesson))
            .await?;
        row.map(ProgressRow::into_progress)
            .transpose()?
            .ok_or(BackendError::NotFound)
    }

    async fn mark_completed(
        &self,
        student: UserId,
        lesson: LessonId,
        at: DateTime<Utc>,
    ) -> Result<(), BackendError> {
        self.update_rows(
            "student_progress",
            &pair_filters(student, lesson),
            &CompletedProgressPatch::at(at),
        )
        .await
    }
}
