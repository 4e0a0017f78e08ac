//! Identity gating over the hosted auth capability.
//!
//! The service is constructed explicitly and injected wherever a view needs
//! the current identity, so tests can substitute the backend freely. There
//! is no process-wide auth client.

use std::sync::Arc;
use tracing::warn;

use backend::{AuthEvents, AuthProvider, BackendError, IdentityRepository};
use portal_core::model::{Identity, Role, UserId};

use crate::error::SessionError;

/// What a registration form submits.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
    pub school: String,
}

/// Wraps the provider session and the profile-row table. Exposes the current
/// identity and a change-notification subscription.
pub struct SessionService {
    auth: Arc<dyn AuthProvider>,
    identities: Arc<dyn IdentityRepository>,
}

impl SessionService {
    #[must_use]
    pub fn new(auth: Arc<dyn AuthProvider>, identities: Arc<dyn IdentityRepository>) -> Self {
        Self { auth, identities }
    }

    /// Resolve the identity behind the provider's current session, if any.
    ///
    /// Every failure path degrades to `None`: callers must treat the result
    /// as "unauthenticated", not "definitely signed out". The degraded reads
    /// are logged so the gap stays observable.
    pub async fn resolve_current(&self) -> Option<Identity> {
        let session = match self.auth.current_session().await {
            Ok(session) => session?,
            Err(err) => {
                warn!(%err, "session lookup failed; treating as unauthenticated");
                return None;
            }
        };

        match self.identities.get_identity(session.id).await {
            Ok(Some(identity)) => Some(identity),
            Ok(None) => {
                warn!(user = %session.id, "signed-in account has no profile row");
                None
            }
            Err(err) => {
                warn!(%err, "identity resolution failed; treating as unauthenticated");
                None
            }
        }
    }

    /// Sign in and resolve the profile row.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidCredentials` for rejected credentials,
    /// `SessionError::MissingProfile` when the account has no profile row,
    /// and `SessionError::Backend` for transport failures.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, SessionError> {
        let user = self
            .auth
            .sign_in(email, password)
            .await
            .map_err(|err| match err {
                BackendError::InvalidCredentials => SessionError::InvalidCredentials,
                other => SessionError::Backend(other),
            })?;

        self.identities
            .get_identity(user.id)
            .await?
            .ok_or(SessionError::MissingProfile)
    }

    /// Register an account and create its profile row with the default
    /// language preference.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmailTaken` for a duplicate registration and
    /// `SessionError::Backend` for transport failures.
    pub async fn register(&self, registration: Registration) -> Result<Identity, SessionError> {
        let user = self
            .auth
            .sign_up(&registration.email, &registration.password)
            .await
            .map_err(|err| match err {
                BackendError::EmailTaken => SessionError::EmailTaken,
                other => SessionError::Backend(other),
            })?;

        let identity = Identity::new(
            user.id,
            registration.email,
            registration.full_name,
            registration.role,
            registration.school,
            "en",
        )?;
        self.identities.insert_identity(&identity).await?;
        Ok(identity)
    }

    /// Invalidate the provider session and clear the local identity.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Backend` if the provider rejects the request;
    /// the local session is cleared regardless.
    pub async fn logout(&self) -> Result<(), SessionError> {
        self.auth.sign_out().await.map_err(SessionError::Backend)
    }

    /// Register for sign-in/sign-out notifications. The returned handle is
    /// the subscription: dropping it releases the registration, so holding
    /// it for the lifetime of a view gives scoped acquisition with
    /// guaranteed teardown on every exit path.
    #[must_use]
    pub fn subscribe(&self) -> AuthEvents {
        self.auth.subscribe()
    }

    /// Convenience for call sites that only need the id.
    pub async fn current_user_id(&self) -> Option<UserId> {
        self.resolve_current().await.map(|identity| identity.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend::InMemoryBackend;

    fn student_identity(id: UserId) -> Identity {
        Identity::new(
            id,
            "ria@example.com",
            "Ria Sharma",
            Role::Student,
            "Hill Valley School",
            "en",
        )
        .unwrap()
    }

    fn service(mem: &InMemoryBackend) -> SessionService {
        let backend = mem.backend();
        SessionService::new(backend.auth, backend.identities)
    }

    #[tokio::test]
    async fn login_resolves_the_profile_row() {
        let mem = InMemoryBackend::new();
        let id = UserId::random();
        mem.seed_account("ria@example.com", "password123", student_identity(id));

        let service = service(&mem);
        let identity = service.login("ria@example.com", "password123").await.unwrap();
        assert_eq!(identity.id(), id);
        assert_eq!(service.resolve_current().await.map(|i| i.id()), Some(id));
    }

    #[tokio::test]
    async fn login_with_bad_password_is_invalid_credentials() {
        let mem = InMemoryBackend::new();
        mem.seed_account(
            "ria@example.com",
            "password123",
            student_identity(UserId::random()),
        );

        let err = service(&mem)
            .login("ria@example.com", "nope")
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidCredentials));
    }

    #[tokio::test]
    async fn register_creates_account_and_profile() {
        let mem = InMemoryBackend::new();
        let service = service(&mem);

        let identity = service
            .register(Registration {
                email: "new@example.com".into(),
                password: "password123".into(),
                full_name: "New Student".into(),
                role: Role::Student,
                school: "Hill Valley School".into(),
            })
            .await
            .unwrap();

        assert_eq!(identity.language_preference(), "en");
        // Sign-up leaves the account signed in, so the session resolves.
        assert_eq!(
            service.resolve_current().await.map(|i| i.id()),
            Some(identity.id())
        );
    }

    #[tokio::test]
    async fn duplicate_registration_is_email_taken() {
        let mem = InMemoryBackend::new();
        let service = service(&mem);
        let registration = Registration {
            email: "new@example.com".into(),
            password: "password123".into(),
            full_name: "New Student".into(),
            role: Role::Student,
            school: "Hill Valley School".into(),
        };

        service.register(registration.clone()).await.unwrap();
        let err = service.register(registration).await.unwrap_err();
        assert!(matches!(err, SessionError::EmailTaken));
    }

    #[tokio::test]
    async fn missing_profile_degrades_to_unauthenticated() {
        let mem = InMemoryBackend::new();
        // Account exists but no profile row was ever inserted.
        mem.backend()
            .auth
            .sign_up("ghost@example.com", "password123")
            .await
            .unwrap();

        assert!(service(&mem).resolve_current().await.is_none());
    }

    #[tokio::test]
    async fn logout_fires_the_subscription_and_clears_identity() {
        let mem = InMemoryBackend::new();
        let id = UserId::random();
        mem.seed_account("ria@example.com", "password123", student_identity(id));
        let service = service(&mem);
        service.login("ria@example.com", "password123").await.unwrap();

        let mut events = service.subscribe();
        service.logout().await.unwrap();
        assert!(events.changed().await);
        assert!(service.resolve_current().await.is_none());
    }
}
