//! Thin request layer over the relational REST dialect. No logic beyond
//! parameter binding and status mapping.

use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::HostedClient;
use crate::repository::BackendError;

impl HostedClient {
    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!(
            "{}/rest/v1/{table}",
            self.config.base_url.as_str().trim_end_matches('/')
        )
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!(
            "{}/auth/v1/{path}",
            self.config.base_url.as_str().trim_end_matches('/')
        )
    }

    /// The bearer the next request should carry: the session's access token
    /// when signed in, the public key otherwise.
    pub(crate) fn bearer(&self) -> Result<String, BackendError> {
        let guard = self
            .session
            .lock()
            .map_err(|e| BackendError::Connection(e.to_string()))?;
        Ok(guard
            .as_ref()
            .map_or_else(|| self.config.api_key.clone(), |s| s.access_token.clone()))
    }

    pub(crate) fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder, BackendError> {
        Ok(builder
            .header("apikey", &self.config.api_key)
            .bearer_auth(self.bearer()?))
    }

    /// Equality-filtered select, optionally ordered.
    pub(crate) async fn select_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
        order: Option<&str>,
    ) -> Result<Vec<T>, BackendError> {
        let mut builder = self.http.get(self.rest_url(table)).query(&[("select", "*")]);
        for (column, value) in filters {
            builder = builder.query(&[(*column, value.as_str())]);
        }
        if let Some(order) = order {
            builder = builder.query(&[("order", order)]);
        }

        debug!(table, "select");
        let response = self.authorized(builder)?.send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            warn!(table, %status, "select failed");
            return Err(status_error(status));
        }
        response.json().await.map_err(decode)
    }

    /// Single-row select. Absent rows are `Ok(None)`, which the relational
    /// dialect signals with 406 in object mode.
    pub(crate) async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Option<T>, BackendError> {
        let mut builder = self
            .http
            .get(self.rest_url(table))
            .query(&[("select", "*")])
            .header("Accept", "application/vnd.pgrst.object+json");
        for (column, value) in filters {
            builder = builder.query(&[(*column, value.as_str())]);
        }

        debug!(table, "select one");
        let response = self.authorized(builder)?.send().await.map_err(transport)?;
        let status = response.status();
        if status == StatusCode::NOT_ACCEPTABLE || status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            warn!(table, %status, "select one failed");
            return Err(status_error(status));
        }
        response.json().await.map(Some).map_err(decode)
    }

    /// Plain insert; the caller does not need the stored representation.
    pub(crate) async fn insert_row<B: Serialize>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<(), BackendError> {
        let builder = self
            .http
            .post(self.rest_url(table))
            .header("Prefer", "return=minimal")
            .json(body);

        debug!(table, "insert");
        let response = self.authorized(builder)?.send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            warn!(table, %status, "insert failed");
            return Err(status_error(status));
        }
        Ok(())
    }

    /// Insert that ignores a natural-key conflict. Returns the stored row
    /// when this call created it, `None` when a row already existed (the
    /// representation of an ignored duplicate is an empty array).
    pub(crate) async fn insert_ignore_duplicates<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        on_conflict: &str,
        body: &B,
    ) -> Result<Option<T>, BackendError> {
        let builder = self
            .http
            .post(self.rest_url(table))
            .query(&[("on_conflict", on_conflict)])
            .header("Prefer", "resolution=ignore-duplicates,return=representation")
            .json(body);

        debug!(table, on_conflict, "upsert");
        let response = self.authorized(builder)?.send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            warn!(table, %status, "upsert failed");
            return Err(status_error(status));
        }
        let mut rows: Vec<T> = response.json().await.map_err(decode)?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }

    /// Equality-filtered update.
    pub(crate) async fn update_rows<B: Serialize>(
        &self,
        table: &str,
        filters: &[(&str, String)],
        body: &B,
    ) -> Result<(), BackendError> {
        let mut builder = self
            .http
            .patch(self.rest_url(table))
            .header("Prefer", "return=minimal")
            .json(body);
        for (column, value) in filters {
            builder = builder.query(&[(*column, value.as_str())]);
        }

        debug!(table, "update");
        let response = self.authorized(builder)?.send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            warn!(table, %status, "update failed");
            return Err(status_error(status));
        }
        Ok(())
    }
}

pub(crate) fn transport(err: reqwest::Error) -> BackendError {
    BackendError::Connection(err.to_string())
}

pub(crate) fn decode(err: reqwest::Error) -> BackendError {
    BackendError::Serialization(err.to_string())
}

pub(crate) fn status_error(status: StatusCode) -> BackendError {
    match status {
        StatusCode::CONFLICT => BackendError::Conflict,
        StatusCode::NOT_FOUND => BackendError::NotFound,
        other => BackendError::Connection(format!("unexpected status {other}")),
    }
}

/// Equality filter value in the `col=eq.value` dialect.
pub(crate) fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

/// Membership filter value in the `col=in.(a,b)` dialect.
pub(crate) fn any_of<I: IntoIterator<Item = D>, D: std::fmt::Display>(values: I) -> String {
    let joined = values
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("in.({joined})")
}
