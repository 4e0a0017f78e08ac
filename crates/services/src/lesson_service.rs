//! The lesson flow: fetch, ensure-started progress, related quizzes, and
//! the mark-complete action.

use std::sync::Arc;
use tracing::warn;

use backend::{LessonRepository, ProgressRepository, QuizRepository};
use portal_core::Clock;
use portal_core::model::{Lesson, LessonId, ProgressRecord, Quiz, UserId};

use crate::error::LessonServiceError;

/// Everything the lesson view needs, loaded in one pass.
#[derive(Debug, Clone)]
pub struct LessonMaterial {
    pub lesson: Lesson,
    pub progress: ProgressRecord,
    pub quizzes: Vec<Quiz>,
}

pub struct LessonService {
    clock: Clock,
    lessons: Arc<dyn LessonRepository>,
    progress: Arc<dyn ProgressRepository>,
    quizzes: Arc<dyn QuizRepository>,
}

impl LessonService {
    #[must_use]
    pub fn new(
        clock: Clock,
        lessons: Arc<dyn LessonRepository>,
        progress: Arc<dyn ProgressRepository>,
        quizzes: Arc<dyn QuizRepository>,
    ) -> Self {
        Self {
            clock,
            lessons,
            progress,
            quizzes,
        }
    }

    /// Open a lesson for a student. Viewing is the implicit "start" action:
    /// the progress row is upserted through `ensure_started`, so the first
    /// visit creates exactly one in-progress record at zero percent and
    /// later visits only stamp the access time.
    ///
    /// A failed quiz listing degrades to an empty list; the lesson itself
    /// failing to load fails the whole view.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError::NotFound` when the lesson is absent and
    /// `LessonServiceError::Backend` for transport failures on the lesson or
    /// progress fetches.
    pub async fn open(
        &self,
        lesson_id: LessonId,
        student: UserId,
    ) -> Result<LessonMaterial, LessonServiceError> {
        let lesson = self
            .lessons
            .get_lesson(lesson_id)
            .await?
            .ok_or(LessonServiceError::NotFound)?;

        let progress = self
            .progress
            .ensure_started(student, lesson_id, self.clock.now())
            .await?;

        let quizzes = match self.quizzes.list_quizzes_for_lesson(lesson_id).await {
            Ok(quizzes) => quizzes,
            Err(err) => {
                warn!(%err, lesson = %lesson_id, "quiz listing failed; showing none");
                Vec::new()
            }
        };

        Ok(LessonMaterial {
            lesson,
            progress,
            quizzes,
        })
    }

    /// Overwrite the progress row to completed/100 with a completion
    /// timestamp. Not conditioned on any prerequisite.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError::Backend` if the update cannot be sent.
    pub async fn mark_complete(
        &self,
        student: UserId,
        lesson: LessonId,
    ) -> Result<(), LessonServiceError> {
        self.progress
            .mark_completed(student, lesson, self.clock.now())
            .await
            .map_err(LessonServiceError::Backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend::InMemoryBackend;
    use portal_core::model::{CompletionStatus, QuizId};
    use portal_core::time::{fixed_clock, fixed_now};

    fn lesson(id: LessonId, author: UserId) -> Lesson {
        Lesson::new(
            id,
            "The Water Cycle",
            "Where rain comes from",
            "Evaporation, condensation, precipitation.",
            "Science",
            6,
            "en",
            author,
            fixed_now(),
        )
        .unwrap()
    }

    fn service(mem: &InMemoryBackend) -> LessonService {
        let backend = mem.backend();
        LessonService::new(
            fixed_clock(),
            backend.lessons,
            backend.progress,
            backend.quizzes,
        )
    }

    #[tokio::test]
    async fn first_open_creates_exactly_one_in_progress_record() {
        let mem = InMemoryBackend::new();
        let lesson_id = LessonId::random();
        let student = UserId::random();
        mem.seed_lesson(lesson(lesson_id, UserId::random()));

        let service = service(&mem);
        let material = service.open(lesson_id, student).await.unwrap();
        assert_eq!(material.progress.status(), CompletionStatus::InProgress);
        assert_eq!(material.progress.percentage(), 0);

        // A second visit reuses the same row.
        let again = service.open(lesson_id, student).await.unwrap();
        assert_eq!(again.progress.id(), material.progress.id());
    }

    #[tokio::test]
    async fn open_lists_the_lessons_quizzes() {
        let mem = InMemoryBackend::new();
        let lesson_id = LessonId::random();
        let author = UserId::random();
        mem.seed_lesson(lesson(lesson_id, author));
        mem.seed_quiz(portal_core::model::Quiz::new(
            QuizId::random(),
            lesson_id,
            "Check your understanding",
            "Two quick questions",
            author,
            fixed_now(),
        ));

        let material = service(&mem)
            .open(lesson_id, UserId::random())
            .await
            .unwrap();
        assert_eq!(material.quizzes.len(), 1);
        assert_eq!(material.quizzes[0].title(), "Check your understanding");
    }

    #[tokio::test]
    async fn missing_lesson_fails_the_view() {
        let mem = InMemoryBackend::new();
        let err = service(&mem)
            .open(LessonId::random(), UserId::random())
            .await
            .unwrap_err();
        assert!(matches!(err, LessonServiceError::NotFound));
    }

    #[tokio::test]
    async fn mark_complete_overwrites_unconditionally() {
        let mem = InMemoryBackend::new();
        let lesson_id = LessonId::random();
        let student = UserId::random();
        mem.seed_lesson(lesson(lesson_id, UserId::random()));

        let service = service(&mem);
        service.open(lesson_id, student).await.unwrap();
        service.mark_complete(student, lesson_id).await.unwrap();

        let material = service.open(lesson_id, student).await.unwrap();
        assert!(material.progress.is_completed());
        assert_eq!(material.progress.percentage(), 100);
        assert_eq!(material.progress.completed_at(), Some(fixed_now()));
    }
}
