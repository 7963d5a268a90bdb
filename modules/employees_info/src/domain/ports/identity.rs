use std::fmt;

use async_trait::async_trait;

/// Identifier of an authentication principal, assigned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityId(pub String);

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Transport-agnostic port for the authentication provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a login identity. Errors carry the provider's message
    /// (duplicate email, weak password, ...).
    async fn create_identity(&self, email: &str, password: &str) -> anyhow::Result<IdentityId>;

    /// Remove an identity; used only to compensate a failed provisioning run.
    async fn delete_identity(&self, id: &IdentityId) -> anyhow::Result<()>;
}
