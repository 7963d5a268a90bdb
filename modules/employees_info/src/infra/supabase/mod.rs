//! HTTP adapters for the hosted backend: PostgREST for tables, GoTrue for
//! sign-up. All of them share one [`SupabaseClient`].

pub mod auth;
pub mod rest;

pub use auth::GoTrueIdentityProvider;
pub use rest::{PostgrestEmployeesRepository, PostgrestRoleStore};

use std::time::Duration;

use anyhow::Context;
use reqwest::{Method, RequestBuilder, Response};
use serde_json::Value;
use tracing::warn;
use url::Url;

/// Base URL, keys and a pooled HTTP client.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base: Url,
    anon_key: String,
    service_role_key: Option<String>,
}

impl SupabaseClient {
    /// `timeout` bounds every request at the transport level.
    pub fn new(
        base: Url,
        anon_key: impl Into<String>,
        service_role_key: Option<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        if base.cannot_be_a_base() {
            anyhow::bail!("backend url {base} cannot be used as a base URL");
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            http,
            base,
            anon_key: anon_key.into(),
            service_role_key: service_role_key.filter(|k| !k.is_empty()),
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn has_service_role(&self) -> bool {
        self.service_role_key.is_some()
    }

    /// `base` joined with `segments`, each one percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> anyhow::Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("invalid backend base URL"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Request authorized as the public (anon) client.
    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    /// Request authorized with the service-role key, for admin endpoints.
    pub(crate) fn admin_request(&self, method: Method, url: Url) -> anyhow::Result<RequestBuilder> {
        let key = self
            .service_role_key
            .as_deref()
            .context("backend.service_role_key is required for admin calls")?;
        Ok(self
            .http
            .request(method, url)
            .header("apikey", key)
            .bearer_auth(key))
    }
}

/// Pass successful responses through; turn failures into an error whose
/// message is the backend's own.
pub(crate) async fn check(response: Response, what: &str) -> anyhow::Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| format!("HTTP {status}"));
    warn!(%status, %message, "{what} rejected by backend");
    Err(anyhow::anyhow!(message))
}

/// Backend error bodies use `message` (PostgREST), `msg` or
/// `error_description` (GoTrue), or a bare `error`.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "msg", "error_description", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
