use portal_core::model::QuizId;
use services::LessonMaterial;

use crate::vm::markdown::markdown_to_html;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizRowVm {
    pub id: QuizId,
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonDetailVm {
    pub title: String,
    pub meta_label: String,
    pub description: String,
    pub content_html: String,
    pub completed: bool,
    pub quizzes: Vec<QuizRowVm>,
}

#[must_use]
pub fn map_lesson_detail(material: &LessonMaterial) -> LessonDetailVm {
    LessonDetailVm {
        title: material.lesson.title().to_string(),
        meta_label: format!(
            "Grade {} • {} • {}",
            material.lesson.grade_level(),
            material.lesson.subject(),
            material.lesson.language()
        ),
        description: material.lesson.description().to_string(),
        content_html: markdown_to_html(material.lesson.content()),
        completed: material.progress.is_completed(),
        quizzes: material
            .quizzes
            .iter()
            .map(|quiz| QuizRowVm {
                id: quiz.id(),
                title: quiz.title().to_string(),
                description: quiz.description().to_string(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::model::{
        Lesson, LessonId, ProgressId, ProgressRecord, Quiz, UserId,
    };
    use portal_core::time::fixed_now;

    #[test]
    fn detail_renders_content_and_lists_quizzes() {
        let lesson_id = LessonId::random();
        let author = UserId::random();
        let material = LessonMaterial {
            lesson: Lesson::new(
                lesson_id,
                "The Water Cycle",
                "Where rain comes from",
                "## Stages\n\nEvaporation happens first.",
                "Science",
                6,
                "en",
                author,
                fixed_now(),
            )
            .unwrap(),
            progress: ProgressRecord::started(
                ProgressId::random(),
                UserId::random(),
                lesson_id,
                fixed_now(),
            ),
            quizzes: vec![Quiz::new(
                QuizId::random(),
                lesson_id,
                "Check your understanding",
                "Two quick questions",
                author,
                fixed_now(),
            )],
        };

        let vm = map_lesson_detail(&material);
        assert_eq!(vm.meta_label, "Grade 6 • Science • en");
        assert!(vm.content_html.contains("<h2>Stages</h2>"));
        assert!(!vm.completed);
        assert_eq!(vm.quizzes.len(), 1);
        assert_eq!(vm.quizzes[0].title, "Check your understanding");
    }
}
