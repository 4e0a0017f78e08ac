//! In-memory backend used by tests and the SSR view harness.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

use portal_core::model::{
    Assessment, Identity, Lesson, LessonId, ProgressId, ProgressRecord, Question, Quiz, QuizId,
    Role, UserId,
};

use crate::repository::{
    AssessmentRepository, AssessmentSummaryRow, AuthEvents, AuthProvider, AuthUser, Backend,
    BackendError, IdentityRepository, LessonRepository, ProgressRepository, QuizRepository,
};

#[derive(Debug, Clone)]
struct StoredAccount {
    password: String,
    user_id: UserId,
}

/// One struct backs every repository plus a fake auth provider, so a test
/// can seed rows and drive the whole stack without a network.
#[derive(Clone)]
pub struct InMemoryBackend {
    accounts: Arc<Mutex<HashMap<String, StoredAccount>>>,
    session: Arc<Mutex<Option<AuthUser>>>,
    notify: Arc<watch::Sender<()>>,
    identities: Arc<Mutex<HashMap<UserId, Identity>>>,
    lessons: Arc<Mutex<Vec<Lesson>>>,
    quizzes: Arc<Mutex<Vec<Quiz>>>,
    questions: Arc<Mutex<Vec<Question>>>,
    progress: Arc<Mutex<HashMap<(UserId, LessonId), ProgressRecord>>>,
    assessments: Arc<Mutex<Vec<Assessment>>>,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        let (notify, _) = watch::channel(());
        Self {
            accounts: Arc::new(Mutex::new(HashMap::new())),
            session: Arc::new(Mutex::new(None)),
            notify: Arc::new(notify),
            identities: Arc::new(Mutex::new(HashMap::new())),
            lessons: Arc::new(Mutex::new(Vec::new())),
            quizzes: Arc::new(Mutex::new(Vec::new())),
            questions: Arc::new(Mutex::new(Vec::new())),
            progress: Arc::new(Mutex::new(HashMap::new())),
            assessments: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Expose this instance behind the trait-object aggregate.
    #[must_use]
    pub fn backend(&self) -> Backend {
        Backend {
            auth: Arc::new(self.clone()),
            identities: Arc::new(self.clone()),
            lessons: Arc::new(self.clone()),
            quizzes: Arc::new(self.clone()),
            progress: Arc::new(self.clone()),
            assessments: Arc::new(self.clone()),
        }
    }

    // ─── Seeding helpers ───────────────────────────────────────────────────────

    /// Register a sign-in-able account together with its profile row.
    ///
    /// # Panics
    ///
    /// Panics if a lock is poisoned; seeding is test-only.
    pub fn seed_account(&self, email: &str, password: &str, identity: Identity) {
        self.accounts.lock().unwrap().insert(
            email.to_string(),
            StoredAccount {
                password: password.to_string(),
                user_id: identity.id(),
            },
        );
        self.identities
            .lock()
            .unwrap()
            .insert(identity.id(), identity);
    }

    /// Insert a profile row without an account (e.g. roster entries).
    ///
    /// # Panics
    ///
    /// Panics if a lock is poisoned; seeding is test-only.
    pub fn seed_identity(&self, identity: Identity) {
        self.identities
            .lock()
            .unwrap()
            .insert(identity.id(), identity);
    }

    /// # Panics
    ///
    /// Panics if a lock is poisoned; seeding is test-only.
    pub fn seed_lesson(&self, lesson: Lesson) {
        self.lessons.lock().unwrap().push(lesson);
    }

    /// # Panics
    ///
    /// Panics if a lock is poisoned; seeding is test-only.
    pub fn seed_quiz(&self, quiz: Quiz) {
        self.quizzes.lock().unwrap().push(quiz);
    }

    /// # Panics
    ///
    /// Panics if a lock is poisoned; seeding is test-only.
    pub fn seed_question(&self, question: Question) {
        self.questions.lock().unwrap().push(question);
    }

    /// # Panics
    ///
    /// Panics if a lock is poisoned; seeding is test-only.
    pub fn seed_assessment(&self, assessment: Assessment) {
        self.assessments.lock().unwrap().push(assessment);
    }

    fn publish(&self) {
        // Receivers may all be gone; that is fine.
        let _ = self.notify.send(());
    }
}

fn poisoned<T>(err: &std::sync::PoisonError<T>) -> BackendError {
    BackendError::Connection(err.to_string())
}

#[async_trait]
impl AuthProvider for InMemoryBackend {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, BackendError> {
        let user = {
            let mut accounts = self.accounts.lock().map_err(|e| poisoned(&e))?;
            if accounts.contains_key(email) {
                return Err(BackendError::EmailTaken);
            }
            let user_id = UserId::random();
            accounts.insert(
                email.to_string(),
                StoredAccount {
                    password: password.to_string(),
                    user_id,
                },
            );
            AuthUser {
                id: user_id,
                email: email.to_string(),
            }
        };

        // Sign-up also signs the new account in, matching the provider.
        *self.session.lock().map_err(|e| poisoned(&e))? = Some(user.clone());
        self.publish();
        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, BackendError> {
        let user = {
            let accounts = self.accounts.lock().map_err(|e| poisoned(&e))?;
            let account = accounts
                .get(email)
                .ok_or(BackendError::InvalidCredentials)?;
            if account.password != password {
                return Err(BackendError::InvalidCredentials);
            }
            AuthUser {
                id: account.user_id,
                email: email.to_string(),
            }
        };

        *self.session.lock().map_err(|e| poisoned(&e))? = Some(user.clone());
        self.publish();
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        *self.session.lock().map_err(|e| poisoned(&e))? = None;
        self.publish();
        Ok(())
    }

    async fn current_session(&self) -> Result<Option<AuthUser>, BackendError> {
        Ok(self.session.lock().map_err(|e| poisoned(&e))?.clone())
    }

    fn subscribe(&self) -> AuthEvents {
        AuthEvents::new(self.notify.subscribe())
    }
}

#[async_trait]
impl IdentityRepository for InMemoryBackend {
    async fn get_identity(&self, id: UserId) -> Result<Option<Identity>, BackendError> {
        let guard = self.identities.lock().map_err(|e| poisoned(&e))?;
        Ok(guard.get(&id).cloned())
    }

    async fn insert_identity(&self, identity: &Identity) -> Result<(), BackendError> {
        let mut guard = self.identities.lock().map_err(|e| poisoned(&e))?;
        if guard.contains_key(&identity.id()) {
            return Err(BackendError::Conflict);
        }
        guard.insert(identity.id(), identity.clone());
        Ok(())
    }

    async fn list_students(&self) -> Result<Vec<Identity>, BackendError> {
        let guard = self.identities.lock().map_err(|e| poisoned(&e))?;
        Ok(guard
            .values()
            .filter(|identity| identity.role() == Role::Student)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl LessonRepository for InMemoryBackend {
    async fn list_lessons(&self) -> Result<Vec<Lesson>, BackendError> {
        let guard = self.lessons.lock().map_err(|e| poisoned(&e))?;
        let mut lessons = guard.clone();
        lessons.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(lessons)
    }

    async fn get_lesson(&self, id: LessonId) -> Result<Option<Lesson>, BackendError> {
        let guard = self.lessons.lock().map_err(|e| poisoned(&e))?;
        Ok(guard.iter().find(|lesson| lesson.id() == id).cloned())
    }

    async fn list_lessons_by_author(&self, author: UserId) -> Result<Vec<Lesson>, BackendError> {
        let guard = self.lessons.lock().map_err(|e| poisoned(&e))?;
        let mut lessons: Vec<Lesson> = guard
            .iter()
            .filter(|lesson| lesson.created_by() == author)
            .cloned()
            .collect();
        lessons.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(lessons)
    }
}

#[async_trait]
impl QuizRepository for InMemoryBackend {
    async fn get_quiz(&self, id: QuizId) -> Result<Option<Quiz>, BackendError> {
        let guard = self.quizzes.lock().map_err(|e| poisoned(&e))?;
        Ok(guard.iter().find(|quiz| quiz.id() == id).cloned())
    }

    async fn list_quizzes_for_lesson(&self, lesson: LessonId) -> Result<Vec<Quiz>, BackendError> {
        let guard = self.quizzes.lock().map_err(|e| poisoned(&e))?;
        Ok(guard
            .iter()
            .filter(|quiz| quiz.lesson_id() == lesson)
            .cloned()
            .collect())
    }

    async fn list_questions(&self, quiz: QuizId) -> Result<Vec<Question>, BackendError> {
        let guard = self.questions.lock().map_err(|e| poisoned(&e))?;
        let mut questions: Vec<Question> = guard
            .iter()
            .filter(|question| question.quiz_id() == quiz)
            .cloned()
            .collect();
        questions.sort_by_key(Question::position);
        Ok(questions)
    }
}

#[async_trait]
impl ProgressRepository for InMemoryBackend {
    async fn get_progress(
        &self,
        student: UserId,
        lesson: LessonId,
    ) -> Result<Option<ProgressRecord>, BackendError> {
        let guard = self.progress.lock().map_err(|e| poisoned(&e))?;
        Ok(guard.get(&(student, lesson)).cloned())
    }

    async fn list_progress_for_student(
        &self,
        student: UserId,
    ) -> Result<Vec<ProgressRecord>, BackendError> {
        let guard = self.progress.lock().map_err(|e| poisoned(&e))?;
        Ok(guard
            .values()
            .filter(|record| record.student_id() == student)
            .cloned()
            .collect())
    }

    async fn ensure_started(
        &self,
        student: UserId,
        lesson: LessonId,
        at: DateTime<Utc>,
    ) -> Result<ProgressRecord, BackendError> {
        // One lock guards check-and-insert, so concurrent callers for the
        // same pair converge on a single row.
        let mut guard = self.progress.lock().map_err(|e| poisoned(&e))?;
        let record = guard
            .entry((student, lesson))
            .and_modify(|record| record.touch(at))
            .or_insert_with(|| ProgressRecord::started(ProgressId::random(), student, lesson, at));
        Ok(record.clone())
    }

    async fn mark_completed(
        &self,
        student: UserId,
        lesson: LessonId,
        at: DateTime<Utc>,
    ) -> Result<(), BackendError> {
        let mut guard = self.progress.lock().map_err(|e| poisoned(&e))?;
        // An equality-filtered update that matches no row is a no-op, like
        // the hosted interface.
        if let Some(record) = guard.get_mut(&(student, lesson)) {
            record.complete(at);
        }
        Ok(())
    }
}

#[async_trait]
impl AssessmentRepository for InMemoryBackend {
    async fn insert_assessment(&self, assessment: &Assessment) -> Result<(), BackendError> {
        let mut guard = self.assessments.lock().map_err(|e| poisoned(&e))?;
        guard.push(assessment.clone());
        Ok(())
    }

    async fn list_percentages_for_student(
        &self,
        student: UserId,
    ) -> Result<Vec<f64>, BackendError> {
        let guard = self.assessments.lock().map_err(|e| poisoned(&e))?;
        Ok(guard
            .iter()
            .filter(|assessment| assessment.student_id() == student)
            .map(Assessment::percentage)
            .collect())
    }

    async fn list_for_lessons(
        &self,
        lessons: &[LessonId],
    ) -> Result<Vec<AssessmentSummaryRow>, BackendError> {
        let guard = self.assessments.lock().map_err(|e| poisoned(&e))?;
        Ok(guard
            .iter()
            .filter(|assessment| lessons.contains(&assessment.lesson_id()))
            .map(|assessment| AssessmentSummaryRow {
                student_id: assessment.student_id(),
                percentage: assessment.percentage(),
            })
            .collect())
    }
}
