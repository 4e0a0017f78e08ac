#![forbid(unsafe_code)]

pub mod hosted;
pub mod memory;
pub mod repository;

pub use hosted::{HostedClient, HostedConfig, HostedInitError};
pub use memory::InMemoryBackend;
pub use repository::{
    AssessmentRepository, AssessmentSummaryRow, AuthEvents, AuthProvider, AuthUser, Backend,
    BackendError, IdentityRepository, LessonRepository, ProgressRepository, QuizRepository,
};
