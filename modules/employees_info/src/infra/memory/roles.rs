use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::ports::{IdentityId, RoleStore};

/// `user_roles` rows keyed by user id.
#[derive(Debug, Default)]
pub struct InMemoryRoleStore {
    roles: DashMap<IdentityId, String>,
}

impl InMemoryRoleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role_of(&self, user_id: &IdentityId) -> Option<String> {
        self.roles.get(user_id).map(|r| r.value().clone())
    }
}

#[async_trait]
impl RoleStore for InMemoryRoleStore {
    async fn assign_role(&self, user_id: &IdentityId, role: &str) -> anyhow::Result<()> {
        if role.trim().is_empty() {
            anyhow::bail!("role must not be empty");
        }
        match self.roles.entry(user_id.clone()) {
            Entry::Occupied(_) => {
                anyhow::bail!("duplicate key value violates unique constraint \"user_roles_user_id_key\"")
            }
            Entry::Vacant(slot) => {
                slot.insert(role.to_string());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn one_role_per_user() {
        let store = InMemoryRoleStore::new();
        let user = IdentityId("u1".into());
        store.assign_role(&user, "employee").await.unwrap();
        assert_eq!(store.role_of(&user).as_deref(), Some("employee"));
        assert!(store.assign_role(&user, "admin").await.is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_assignments_keep_one_role() {
        let store = std::sync::Arc::new(InMemoryRoleStore::new());
        let user = IdentityId("u1".into());

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                let user = user.clone();
                tokio::spawn(async move { store.assign_role(&user, &format!("role-{i}")).await })
            })
            .collect();

        let mut granted = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                granted += 1;
            }
        }
        assert_eq!(granted, 1);
        assert!(store.role_of(&user).is_some());
    }
}
