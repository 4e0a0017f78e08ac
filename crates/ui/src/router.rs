//! The portal shows one page at a time; navigation is a tiny in-memory
//! machine, not URL routing. Transitions carry the selected identifiers and
//! only one level of "back" is representable: the quiz returns to its
//! lesson, the lesson returns to the dashboard. No transition waits for the
//! target's data; every view owns its own loading state.

use portal_core::model::{LessonId, QuizId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Dashboard,
    Lesson(LessonId),
    Quiz {
        quiz: QuizId,
        lesson: LessonId,
    },
}

impl Page {
    /// Dashboard (or anywhere) hands off a lesson id.
    pub fn select_lesson(&mut self, lesson: LessonId) {
        *self = Page::Lesson(lesson);
    }

    /// Lesson hands off a quiz id, retaining the originating lesson so the
    /// quiz's "back" can return there. Ignored outside the lesson page.
    pub fn start_quiz(&mut self, quiz: QuizId) {
        if let Page::Lesson(lesson) = *self {
            *self = Page::Quiz { quiz, lesson };
        }
    }

    /// One step back, discarding the corresponding payload. A no-op on the
    /// dashboard.
    pub fn back(&mut self) {
        *self = match *self {
            Page::Quiz { lesson, .. } => Page::Lesson(lesson),
            Page::Lesson(_) | Page::Dashboard => Page::Dashboard,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_the_dashboard() {
        assert_eq!(Page::default(), Page::Dashboard);
    }

    #[test]
    fn lesson_handoff_carries_the_id() {
        let lesson = LessonId::random();
        let mut page = Page::default();
        page.select_lesson(lesson);
        assert_eq!(page, Page::Lesson(lesson));
    }

    #[test]
    fn quiz_handoff_retains_the_originating_lesson() {
        let lesson = LessonId::random();
        let quiz = QuizId::random();
        let mut page = Page::Lesson(lesson);
        page.start_quiz(quiz);
        assert_eq!(page, Page::Quiz { quiz, lesson });

        page.back();
        assert_eq!(page, Page::Lesson(lesson));
        page.back();
        assert_eq!(page, Page::Dashboard);
    }

    #[test]
    fn quiz_handoff_is_ignored_outside_a_lesson() {
        let mut page = Page::Dashboard;
        page.start_quiz(QuizId::random());
        assert_eq!(page, Page::Dashboard);
    }

    #[test]
    fn back_on_the_dashboard_is_a_noop() {
        let mut page = Page::Dashboard;
        page.back();
        assert_eq!(page, Page::Dashboard);
    }

    #[test]
    fn only_one_level_of_back_exists() {
        let lesson_a = LessonId::random();
        let mut page = Page::Lesson(lesson_a);
        page.start_quiz(QuizId::random());
        // Selecting a different lesson from nowhere near the dashboard still
        // lands on that lesson; there is no deeper history to unwind.
        let lesson_b = LessonId::random();
        page.select_lesson(lesson_b);
        page.back();
        assert_eq!(page, Page::Dashboard);
    }
}
