use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use super::query::{decode, transport};
use super::{HostedClient, SessionState};
use crate::repository::{AuthEvents, AuthProvider, AuthUser, BackendError};
use portal_core::model::UserId;

#[derive(Debug, Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthUserBody {
    id: Uuid,
    email: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUserBody,
}

#[derive(Debug, Deserialize)]
struct SignupResponse {
    #[serde(default)]
    access_token: Option<String>,
    user: AuthUserBody,
}

impl HostedClient {
    fn set_session(&self, state: Option<SessionState>) -> Result<(), BackendError> {
        *self
            .session
            .lock()
            .map_err(|e| BackendError::Connection(e.to_string()))? = state;
        // Receivers may all be gone; that is fine.
        let _ = self.notify.send(());
        Ok(())
    }
}

#[async_trait]
impl AuthProvider for HostedClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, BackendError> {
        debug!("sign up");
        let response = self
            .http
            .post(self.auth_url("signup"))
            .header("apikey", &self.config.api_key)
            .json(&CredentialsBody { email, password })
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if matches!(
            status,
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY
        ) {
            return Err(BackendError::EmailTaken);
        }
        if !status.is_success() {
            warn!(%status, "sign up failed");
            return Err(BackendError::Connection(format!(
                "unexpected status {status}"
            )));
        }

        let body: SignupResponse = response.json().await.map_err(decode)?;
        let user = AuthUser {
            id: UserId::new(body.user.id),
            email: body.user.email,
        };
        // The provider signs the fresh account in when it hands a token back.
        if let Some(access_token) = body.access_token {
            self.set_session(Some(SessionState {
                access_token,
                user: user.clone(),
            }))?;
        }
        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, BackendError> {
        debug!("sign in");
        let response = self
            .http
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.config.api_key)
            .json(&CredentialsBody { email, password })
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if matches!(
            status,
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Err(BackendError::InvalidCredentials);
        }
        if !status.is_success() {
            warn!(%status, "sign in failed");
            return Err(BackendError::Connection(format!(
                "unexpected status {status}"
            )));
        }

        let body: TokenResponse = response.json().await.map_err(decode)?;
        let user = AuthUser {
            id: UserId::new(body.user.id),
            email: body.user.email,
        };
        self.set_session(Some(SessionState {
            access_token: body.access_token,
            user: user.clone(),
        }))?;
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        debug!("sign out");
        let request = self
            .http
            .post(self.auth_url("logout"))
            .header("apikey", &self.config.api_key)
            .bearer_auth(self.bearer()?)
            .send()
            .await;

        // The local session is cleared either way so the UI cannot get stuck
        // signed in; a failed remote invalidation still surfaces.
        self.set_session(None)?;

        let response = request.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "sign out failed");
            return Err(BackendError::Connection(format!(
                "unexpected status {status}"
            )));
        }
        Ok(())
    }

    async fn current_session(&self) -> Result<Option<AuthUser>, BackendError> {
        let guard = self
            .session
            .lock()
            .map_err(|e| BackendError::Connection(e.to_string()))?;
        Ok(guard.as_ref().map(|state| state.user.clone()))
    }

    fn subscribe(&self) -> AuthEvents {
        AuthEvents::new(self.notify.subscribe())
    }
}
