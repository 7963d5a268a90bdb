use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use tracing::{debug, info};
use url::Url;

use crate::config::EmployeesInfoConfig;
use crate::contract::client::EmployeesInfoApi;
use crate::domain::ports::{IdentityProvider, NotificationSink, RoleStore};
use crate::domain::provisioning::ProvisioningWorkflow;
use crate::domain::repo::EmployeesRepository;
use crate::domain::service::DirectoryService;
use crate::gateways::local::EmployeesInfoLocalClient;
use crate::infra::memory::{InMemoryIdentityProvider, InMemoryRoleStore};
use crate::infra::notify::TracingNotificationSink;
use crate::infra::storage::memory_repo::InMemoryEmployeesRepository;
use crate::infra::supabase::{
    GoTrueIdentityProvider, PostgrestEmployeesRepository, PostgrestRoleStore, SupabaseClient,
};

/// Connection settings for the hosted backend.
#[derive(Debug, Clone)]
pub struct SupabaseSettings {
    pub url: Url,
    pub anon_key: String,
    /// Only needed to compensate orphaned identities.
    pub service_role_key: Option<String>,
    pub timeout: Duration,
}

/// The outbound ports the service is wired to.
#[derive(Clone)]
pub struct Adapters {
    pub repo: Arc<dyn EmployeesRepository>,
    pub identity: Arc<dyn IdentityProvider>,
    pub roles: Arc<dyn RoleStore>,
    pub notifier: Arc<dyn NotificationSink>,
}

impl Adapters {
    /// HTTP adapters sharing one client. Notifications go to the log until
    /// replaced with [`Adapters::with_notifier`].
    pub fn supabase(settings: &SupabaseSettings) -> anyhow::Result<Self> {
        let client = Arc::new(SupabaseClient::new(
            settings.url.clone(),
            settings.anon_key.clone(),
            settings.service_role_key.clone(),
            settings.timeout,
        )?);
        Ok(Self {
            repo: Arc::new(PostgrestEmployeesRepository::new(client.clone())),
            identity: Arc::new(GoTrueIdentityProvider::new(client.clone())),
            roles: Arc::new(PostgrestRoleStore::new(client)),
            notifier: Arc::new(TracingNotificationSink),
        })
    }

    /// Process-local adapters seeded with a demo directory.
    pub fn in_memory_demo() -> Self {
        Self {
            repo: Arc::new(InMemoryEmployeesRepository::demo()),
            identity: Arc::new(InMemoryIdentityProvider::new()),
            roles: Arc::new(InMemoryRoleStore::new()),
            notifier: Arc::new(TracingNotificationSink),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }
}

/// Module entry point: owns the directory service once initialized.
#[derive(Default)]
pub struct EmployeesInfo {
    // Read-mostly after init.
    service: ArcSwapOption<DirectoryService>,
}

impl EmployeesInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the service from config and adapters. Calling again replaces it.
    pub fn init(&self, cfg: &EmployeesInfoConfig, adapters: Adapters) -> anyhow::Result<()> {
        info!("Initializing employees_info module");
        debug!(
            "Loaded employees_info config: page_size={}, request_timeout={:?}, create_identity={}, assign_role={}, orphan_policy={:?}",
            cfg.page_size, cfg.request_timeout, cfg.create_identity, cfg.assign_role, cfg.orphan_policy
        );
        if cfg.default_password.chars().count() < 6 {
            anyhow::bail!("employees_info.default_password must be at least 6 characters");
        }

        let provisioning = ProvisioningWorkflow::new(
            adapters.repo.clone(),
            adapters.identity,
            adapters.roles,
            cfg.provisioning_options(),
            cfg.request_timeout,
        );
        let service = DirectoryService::new(
            adapters.repo,
            provisioning,
            adapters.notifier,
            cfg.service_config(),
        );
        self.service.store(Some(Arc::new(service)));
        Ok(())
    }

    pub fn service(&self) -> anyhow::Result<Arc<DirectoryService>> {
        self.service
            .load_full()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }

    /// In-process client over the initialized service.
    pub fn client(&self) -> anyhow::Result<Arc<dyn EmployeesInfoApi>> {
        let api: Arc<dyn EmployeesInfoApi> = Arc::new(EmployeesInfoLocalClient::new(self.service()?));
        Ok(api)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::error::EmployeesInfoError;
    use tracing_test::traced_test;

    #[test]
    fn client_requires_init() {
        let module = EmployeesInfo::new();
        assert!(module.client().is_err());

        module
            .init(&EmployeesInfoConfig::default(), Adapters::in_memory_demo())
            .unwrap();
        assert!(module.client().is_ok());
    }

    #[test]
    fn short_default_password_is_refused() {
        let cfg = EmployeesInfoConfig {
            default_password: "12345".into(),
            ..Default::default()
        };
        assert!(EmployeesInfo::new()
            .init(&cfg, Adapters::in_memory_demo())
            .is_err());
    }

    #[test]
    fn supabase_adapters_reject_opaque_urls() {
        let settings = SupabaseSettings {
            url: Url::parse("mailto:ops@example.com").unwrap(),
            anon_key: "anon".into(),
            service_role_key: None,
            timeout: Duration::from_secs(1),
        };
        assert!(Adapters::supabase(&settings).is_err());
    }

    #[tokio::test]
    #[traced_test]
    async fn demo_module_logs_inside_service_spans() {
        let module = EmployeesInfo::new();
        module
            .init(&EmployeesInfoConfig::default(), Adapters::in_memory_demo())
            .unwrap();
        let client = module.client().unwrap();

        assert_eq!(client.reload().await.unwrap(), 5);
        let updated = client.toggle_status("1").await.unwrap();
        assert_eq!(updated.status.as_str(), "inactive");

        assert!(logs_contain("directory loaded"));
        assert!(logs_contain("employees_info.service.toggle_status"));
        assert!(logs_contain("status changed"));
    }

    #[tokio::test]
    #[traced_test]
    async fn rejected_input_is_logged_as_a_warning() {
        let module = EmployeesInfo::new();
        module
            .init(&EmployeesInfoConfig::default(), Adapters::in_memory_demo())
            .unwrap();
        let client = module.client().unwrap();

        let err = client
            .provision(crate::contract::model::NewEmployee::new("", "ada@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, EmployeesInfoError::Validation { .. }));

        assert!(logs_contain("WARN"));
        assert!(logs_contain("submission rejected"));
        assert!(logs_contain("operation failed"));
        assert!(logs_contain("employees_info.service.provision"));
    }
}
