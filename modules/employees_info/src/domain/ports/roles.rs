use async_trait::async_trait;

use super::identity::IdentityId;

#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn assign_role(&self, user_id: &IdentityId, role: &str) -> anyhow::Result<()>;
}
