use async_trait::async_trait;

use super::HostedClient;
use super::query::{any_of, eq};
use super::rows::{NewAssessmentRow, PercentageRow, SummaryRow};
use crate::repository::{AssessmentRepository, AssessmentSummaryRow, BackendError};
use portal_core::model::{Assessment, LessonId, UserId};

#[async_trait]
impl AssessmentRepository for HostedClient {
    async fn insert_assessment(&self, assessment: &Assessment) -> Result<(), BackendError> {
        self.insert_row(
            "student_assessments",
            &NewAssessmentRow::from_assessment(assessment),
        )
        .await
    }

    async fn list_percentages_for_student(
        &self,
        student: UserId,
    ) -> Result<Vec<f64>, BackendError> {
        let rows: Vec<PercentageRow> = self
            .select_rows("student_assessments", &[("student_id", eq(student))], None)
            .await?;
        Ok(rows.into_iter().map(|row| row.percentage).collect())
    }

    async fn list_for_lessons(
        &self,
        lessons: &[LessonId],
    ) -> Result<Vec<AssessmentSummaryRow>, BackendError> {
        // A membership filter over nothing matches nothing; skip the trip.
        if lessons.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<SummaryRow> = self
            .select_rows(
                "student_assessments",
                &[("lesson_id", any_of(lessons.iter().copied()))],
                None,
            )
            .await?;
        Ok(rows.into_iter().map(SummaryRow::into_summary).collect())
    }
}
