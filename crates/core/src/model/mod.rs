pub mod assessment;
pub mod identity;
pub mod ids;
pub mod lesson;
pub mod progress;
pub mod quiz;

pub use assessment::{Assessment, AssessmentError};
pub use identity::{Identity, IdentityError, Role};
pub use ids::{AssessmentId, LessonId, ParseIdError, ProgressId, QuestionId, QuizId, UserId};
pub use lesson::{Lesson, LessonError};
pub use progress::{CompletionStatus, ProgressError, ProgressRecord};
pub use quiz::{Answer, Question, QuestionError, QuestionKind, Quiz};
