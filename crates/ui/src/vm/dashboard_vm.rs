use portal_core::model::{Identity, LessonId};
use services::{LessonProgressEntry, StudentOverview, TeacherOverview};

/// How many incomplete lessons the "continue" strip highlights.
pub const CONTINUE_STRIP_LIMIT: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonCardVm {
    pub id: LessonId,
    pub title: String,
    pub meta_label: String,
    pub description: String,
    pub progress_percentage: u8,
    pub completed: bool,
    pub cta_label: &'static str,
}

#[must_use]
pub fn map_lesson_card(entry: &LessonProgressEntry) -> LessonCardVm {
    let progress_percentage = entry
        .progress
        .as_ref()
        .map_or(0, portal_core::model::ProgressRecord::percentage);
    let completed = entry.is_completed();

    LessonCardVm {
        id: entry.lesson.id(),
        title: entry.lesson.title().to_string(),
        meta_label: format!(
            "Grade {} • {}",
            entry.lesson.grade_level(),
            entry.lesson.subject()
        ),
        description: entry.lesson.description().to_string(),
        progress_percentage,
        completed,
        cta_label: if completed { "Review" } else { "Continue" },
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentStatsVm {
    pub completed_label: String,
    pub average_label: String,
    pub streak_label: String,
}

#[must_use]
pub fn map_student_stats(overview: &StudentOverview) -> StudentStatsVm {
    StudentStatsVm {
        completed_label: format!(
            "{}/{}",
            overview.completed_lessons, overview.total_lessons
        ),
        average_label: format!("{:.0}%", overview.average_score),
        streak_label: format!("{} days", overview.learning_streak_days),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeacherStatsVm {
    pub students_label: String,
    pub active_label: String,
    pub lessons_label: String,
    pub average_label: String,
}

#[must_use]
pub fn map_teacher_stats(overview: &TeacherOverview) -> TeacherStatsVm {
    TeacherStatsVm {
        students_label: overview.total_students.to_string(),
        active_label: overview.active_students.to_string(),
        lessons_label: overview.total_lessons.to_string(),
        average_label: format!("{:.0}%", overview.average_performance),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentRowVm {
    pub name: String,
    pub school: String,
}

#[must_use]
pub fn map_student_row(identity: &Identity) -> StudentRowVm {
    StudentRowVm {
        name: identity.full_name().to_string(),
        school: identity.school().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::model::{
        CompletionStatus, Lesson, ProgressId, ProgressRecord, UserId,
    };
    use portal_core::time::fixed_now;

    fn lesson() -> Lesson {
        Lesson::new(
            LessonId::random(),
            "The Water Cycle",
            "Where rain comes from",
            "body",
            "Science",
            6,
            "en",
            UserId::random(),
            fixed_now(),
        )
        .unwrap()
    }

    #[test]
    fn card_without_progress_offers_continue_at_zero() {
        let card = map_lesson_card(&LessonProgressEntry {
            lesson: lesson(),
            progress: None,
        });
        assert_eq!(card.progress_percentage, 0);
        assert!(!card.completed);
        assert_eq!(card.cta_label, "Continue");
        assert_eq!(card.meta_label, "Grade 6 • Science");
    }

    #[test]
    fn completed_card_offers_review_at_full() {
        let entry = lesson();
        let record = ProgressRecord::from_persisted(
            ProgressId::random(),
            UserId::random(),
            entry.id(),
            CompletionStatus::Completed,
            100,
            Some(fixed_now()),
            Some(fixed_now()),
        )
        .unwrap();
        let card = map_lesson_card(&LessonProgressEntry {
            lesson: entry,
            progress: Some(record),
        });
        assert_eq!(card.progress_percentage, 100);
        assert!(card.completed);
        assert_eq!(card.cta_label, "Review");
    }

    #[test]
    fn student_stats_round_the_average_for_display() {
        let overview = StudentOverview {
            total_lessons: 3,
            completed_lessons: 1,
            average_score: 100.0 / 3.0,
            learning_streak_days: 4,
            lessons: Vec::new(),
        };
        let stats = map_student_stats(&overview);
        assert_eq!(stats.completed_label, "1/3");
        assert_eq!(stats.average_label, "33%");
        assert_eq!(stats.streak_label, "4 days");
    }

    #[test]
    fn teacher_stats_format_counts() {
        let overview = TeacherOverview {
            total_students: 12,
            total_lessons: 4,
            average_performance: 66.6,
            active_students: 5,
            students: Vec::new(),
        };
        let stats = map_teacher_stats(&overview);
        assert_eq!(stats.students_label, "12");
        assert_eq!(stats.active_label, "5");
        assert_eq!(stats.lessons_label, "4");
        assert_eq!(stats.average_label, "67%");
    }
}
