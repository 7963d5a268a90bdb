use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{IdentityId, IdentityProvider};

const MIN_PASSWORD_LEN: usize = 6;

/// Login identities keyed by email.
#[derive(Debug, Default)]
pub struct InMemoryIdentityProvider {
    by_email: DashMap<String, IdentityId>,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_email(&self, email: &str) -> bool {
        self.by_email.contains_key(&email.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.by_email.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_email.is_empty()
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn create_identity(&self, email: &str, password: &str) -> anyhow::Result<IdentityId> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            anyhow::bail!("Password should be at least {MIN_PASSWORD_LEN} characters.");
        }
        match self.by_email.entry(email.to_lowercase()) {
            Entry::Occupied(_) => anyhow::bail!("User already registered"),
            Entry::Vacant(slot) => {
                let id = IdentityId(Uuid::new_v4().to_string());
                debug!(%id, "identity registered");
                slot.insert(id.clone());
                Ok(id)
            }
        }
    }

    async fn delete_identity(&self, id: &IdentityId) -> anyhow::Result<()> {
        let before = self.by_email.len();
        self.by_email.retain(|_, v| v != id);
        if self.by_email.len() == before {
            anyhow::bail!("User not found");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_email_is_rejected_case_insensitively() {
        let idp = InMemoryIdentityProvider::new();
        idp.create_identity("ada@example.com", "secret1").await.unwrap();
        let err = idp
            .create_identity("ADA@example.com", "secret1")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "User already registered");
        assert_eq!(idp.len(), 1);
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let idp = InMemoryIdentityProvider::new();
        assert!(idp.create_identity("a@example.com", "12345").await.is_err());
        assert!(idp.is_empty());
    }

    #[tokio::test]
    async fn delete_removes_the_identity() {
        let idp = InMemoryIdentityProvider::new();
        let id = idp.create_identity("a@example.com", "secret1").await.unwrap();
        idp.delete_identity(&id).await.unwrap();
        assert!(!idp.contains_email("a@example.com"));
        assert!(idp.delete_identity(&id).await.is_err());
    }
}
