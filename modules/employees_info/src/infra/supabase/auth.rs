use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use super::{check, SupabaseClient};
use crate::domain::ports::{IdentityId, IdentityProvider};

/// Sign-up and admin user management over the GoTrue API.
pub struct GoTrueIdentityProvider {
    client: Arc<SupabaseClient>,
}

impl GoTrueIdentityProvider {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

/// The user object is nested under `user` when a session is returned and
/// sits at the top level when email confirmation is pending.
fn user_id(body: &Value) -> Option<&str> {
    body.get("user")
        .and_then(|u| u.get("id"))
        .or_else(|| body.get("id"))
        .and_then(Value::as_str)
}

#[async_trait]
impl IdentityProvider for GoTrueIdentityProvider {
    #[instrument(name = "employees_info.supabase.auth.signup", skip_all, fields(email = %email))]
    async fn create_identity(&self, email: &str, password: &str) -> anyhow::Result<IdentityId> {
        let url = self.client.endpoint(&["auth", "v1", "signup"])?;
        let body = json!({
            "email": email,
            "password": password,
            "data": { "employee_id": null },
        });

        let response = self
            .client
            .request(Method::POST, url)
            .json(&body)
            .send()
            .await
            .context("POST /auth/v1/signup")?;
        let created: Value = check(response, "sign-up")
            .await?
            .json()
            .await
            .context("decoding sign-up response")?;

        let id = user_id(&created).context("sign-up response carried no user id")?;
        debug!(user_id = %id, "login identity created");
        Ok(IdentityId(id.to_string()))
    }

    #[instrument(name = "employees_info.supabase.auth.delete_user", skip_all, fields(user_id = %id))]
    async fn delete_identity(&self, id: &IdentityId) -> anyhow::Result<()> {
        let url = self
            .client
            .endpoint(&["auth", "v1", "admin", "users", &id.0])?;
        let response = self
            .client
            .admin_request(Method::DELETE, url)?
            .send()
            .await
            .with_context(|| format!("DELETE /auth/v1/admin/users/{id}"))?;
        check(response, "identity delete").await?;
        Ok(())
    }
}
