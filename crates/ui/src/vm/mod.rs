mod dashboard_vm;
mod lesson_vm;
mod markdown;
mod quiz_vm;

pub use dashboard_vm::{
    CONTINUE_STRIP_LIMIT, LessonCardVm, StudentRowVm, StudentStatsVm, TeacherStatsVm,
    map_lesson_card, map_student_row, map_student_stats, map_teacher_stats,
};
pub use lesson_vm::{LessonDetailVm, QuizRowVm, map_lesson_detail};
pub use markdown::{markdown_to_html, sanitize_html};
pub use quiz_vm::{
    QuizOptionVm, QuizResultVm, QuizStepVm, map_quiz_result, map_quiz_step,
};
