//! Adapters for the hosted auth + relational REST interface.
//!
//! The relational side speaks the PostgREST dialect: equality filters as
//! `col=eq.value` query parameters, `order=` for sorting, `Prefer` headers
//! for insert/upsert behavior. The auth side is the companion token API.

use std::env;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::watch;
use url::Url;

use crate::repository::{AuthUser, Backend};

mod assessments;
mod auth;
mod identities;
mod lessons;
mod progress;
mod query;
mod quizzes;
mod rows;

/// Service endpoint and public API key, read once at startup.
#[derive(Clone, Debug)]
pub struct HostedConfig {
    pub base_url: Url,
    pub api_key: String,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HostedInitError {
    #[error("{0} is not set")]
    MissingEnv(&'static str),

    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
}

pub const ENV_BACKEND_URL: &str = "PORTAL_BACKEND_URL";
pub const ENV_API_KEY: &str = "PORTAL_API_KEY";

impl HostedConfig {
    /// Build a config from an endpoint string and key.
    ///
    /// # Errors
    ///
    /// Returns `HostedInitError::InvalidUrl` if the endpoint does not parse.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, HostedInitError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|_| HostedInitError::InvalidUrl(base_url.to_string()))?;
        Ok(Self {
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Read `PORTAL_BACKEND_URL` and `PORTAL_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns `HostedInitError` when either variable is absent or the URL
    /// does not parse.
    pub fn from_env() -> Result<Self, HostedInitError> {
        let base_url = env::var(ENV_BACKEND_URL)
            .map_err(|_| HostedInitError::MissingEnv(ENV_BACKEND_URL))?;
        let api_key =
            env::var(ENV_API_KEY).map_err(|_| HostedInitError::MissingEnv(ENV_API_KEY))?;
        Self::new(&base_url, api_key)
    }
}

#[derive(Clone, Debug)]
struct SessionState {
    access_token: String,
    user: AuthUser,
}

/// One HTTP client for both capabilities. Session state (current access
/// token and user) lives here; every sign-in and sign-out publishes to the
/// change-notification channel.
#[derive(Clone)]
pub struct HostedClient {
    http: reqwest::Client,
    config: HostedConfig,
    session: Arc<Mutex<Option<SessionState>>>,
    notify: Arc<watch::Sender<()>>,
}

impl HostedClient {
    #[must_use]
    pub fn new(config: HostedConfig) -> Self {
        let (notify, _) = watch::channel(());
        Self {
            http: reqwest::Client::new(),
            config,
            session: Arc::new(Mutex::new(None)),
            notify: Arc::new(notify),
        }
    }

    #[must_use]
    pub fn config(&self) -> &HostedConfig {
        &self.config
    }
}

impl Backend {
    /// Build a `Backend` over the hosted service.
    #[must_use]
    pub fn hosted(config: HostedConfig) -> Self {
        let client = HostedClient::new(config);
        Self {
            auth: Arc::new(client.clone()),
            identities: Arc::new(client.clone()),
            lessons: Arc::new(client.clone()),
            quizzes: Arc::new(client.clone()),
            progress: Arc::new(client.clone()),
            assessments: Arc::new(client),
        }
    }
}
