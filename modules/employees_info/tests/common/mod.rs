#![allow(dead_code)]

//! Recording and failure-injecting test doubles for the outbound ports.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use employees_info::contract::model::{Employee, EmployeeStatus, NewEmployee};
use employees_info::domain::ports::{
    IdentityId, IdentityProvider, Notification, NotificationSink, RoleStore,
};
use employees_info::domain::provisioning::{ProvisioningOptions, ProvisioningWorkflow};
use employees_info::domain::repo::EmployeesRepository;
use employees_info::domain::service::{DirectoryService, ServiceConfig};
use employees_info::infra::memory::{InMemoryIdentityProvider, InMemoryRoleStore};
use employees_info::infra::storage::memory_repo::InMemoryEmployeesRepository;

/// Ordered log of every remote call made during a test.
#[derive(Default, Clone)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().clone()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.seen.lock().last().cloned()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().push(notification);
    }
}

/// Failure switches for [`FakeRepo`]. `None` means succeed.
#[derive(Default)]
pub struct RepoFaults {
    pub list: Option<String>,
    pub insert: Option<String>,
    pub update: Option<String>,
    /// When set, fetches wait until notified.
    pub list_gate: Option<Arc<Notify>>,
    /// Delay before every update; used with paused time.
    pub update_delay: Option<Duration>,
    /// When set, updates wait until notified.
    pub update_gate: Option<Arc<Notify>>,
}

/// In-memory repository with injectable failures and a call journal.
pub struct FakeRepo {
    inner: InMemoryEmployeesRepository,
    pub faults: Mutex<RepoFaults>,
    journal: Journal,
}

impl FakeRepo {
    pub fn demo(journal: Journal) -> Self {
        Self {
            inner: InMemoryEmployeesRepository::demo(),
            faults: Mutex::new(RepoFaults::default()),
            journal,
        }
    }
}

#[async_trait]
impl EmployeesRepository for FakeRepo {
    async fn list_all(&self) -> anyhow::Result<Vec<Employee>> {
        self.journal.push("repo:list");
        let (fail, gate) = {
            let f = self.faults.lock();
            (f.list.clone(), f.list_gate.clone())
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if let Some(msg) = fail {
            anyhow::bail!(msg);
        }
        self.inner.list_all().await
    }

    async fn insert(&self, new_employee: &NewEmployee) -> anyhow::Result<Employee> {
        self.journal.push("repo:insert");
        if let Some(msg) = self.faults.lock().insert.clone() {
            anyhow::bail!(msg);
        }
        self.inner.insert(new_employee).await
    }

    async fn update_status(&self, id: &str, status: EmployeeStatus) -> anyhow::Result<()> {
        self.journal.push(format!("repo:update:{id}:{status}"));
        let (fail, delay, gate) = {
            let f = self.faults.lock();
            (f.update.clone(), f.update_delay, f.update_gate.clone())
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(msg) = fail {
            anyhow::bail!(msg);
        }
        self.inner.update_status(id, status).await
    }
}

pub struct FakeIdentity {
    inner: InMemoryIdentityProvider,
    pub fail_create: Mutex<Option<String>>,
    pub fail_delete: Mutex<Option<String>>,
    pub last_password: Mutex<Option<String>>,
    journal: Journal,
}

impl FakeIdentity {
    pub fn new(journal: Journal) -> Self {
        Self {
            inner: InMemoryIdentityProvider::new(),
            fail_create: Mutex::new(None),
            fail_delete: Mutex::new(None),
            last_password: Mutex::new(None),
            journal,
        }
    }

    pub fn contains_email(&self, email: &str) -> bool {
        self.inner.contains_email(email)
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn create_identity(&self, email: &str, password: &str) -> anyhow::Result<IdentityId> {
        self.journal.push("identity:create");
        *self.last_password.lock() = Some(password.to_string());
        if let Some(msg) = self.fail_create.lock().clone() {
            anyhow::bail!(msg);
        }
        self.inner.create_identity(email, password).await
    }

    async fn delete_identity(&self, id: &IdentityId) -> anyhow::Result<()> {
        self.journal.push("identity:delete");
        if let Some(msg) = self.fail_delete.lock().clone() {
            anyhow::bail!(msg);
        }
        self.inner.delete_identity(id).await
    }
}

pub struct FakeRoles {
    inner: InMemoryRoleStore,
    pub fail: Mutex<Option<String>>,
    journal: Journal,
}

impl FakeRoles {
    pub fn new(journal: Journal) -> Self {
        Self {
            inner: InMemoryRoleStore::new(),
            fail: Mutex::new(None),
            journal,
        }
    }

    pub fn role_of(&self, user: &str) -> Option<String> {
        self.inner.role_of(&IdentityId(user.to_string()))
    }
}

#[async_trait]
impl RoleStore for FakeRoles {
    async fn assign_role(&self, user_id: &IdentityId, role: &str) -> anyhow::Result<()> {
        self.journal.push(format!("roles:assign:{role}"));
        if let Some(msg) = self.fail.lock().clone() {
            anyhow::bail!(msg);
        }
        self.inner.assign_role(user_id, role).await
    }
}

/// A fully wired service over the fakes, plus handles to inspect them.
pub struct Harness {
    pub service: Arc<DirectoryService>,
    pub repo: Arc<FakeRepo>,
    pub identity: Arc<FakeIdentity>,
    pub roles: Arc<FakeRoles>,
    pub notifier: Arc<RecordingNotifier>,
    pub journal: Journal,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(ProvisioningOptions::default(), ServiceConfig::default())
    }

    pub fn with(options: ProvisioningOptions, config: ServiceConfig) -> Self {
        Self::with_faults(options, config, RepoFaults::default())
    }

    pub fn with_faults(
        options: ProvisioningOptions,
        config: ServiceConfig,
        faults: RepoFaults,
    ) -> Self {
        let journal = Journal::default();
        let repo = Arc::new(FakeRepo::demo(journal.clone()));
        *repo.faults.lock() = faults;
        let identity = Arc::new(FakeIdentity::new(journal.clone()));
        let roles = Arc::new(FakeRoles::new(journal.clone()));
        let notifier = Arc::new(RecordingNotifier::default());

        let workflow = ProvisioningWorkflow::new(
            repo.clone(),
            identity.clone(),
            roles.clone(),
            options,
            config.request_timeout,
        );
        let service = Arc::new(DirectoryService::new(
            repo.clone(),
            workflow,
            notifier.clone(),
            config,
        ));

        Self {
            service,
            repo,
            identity,
            roles,
            notifier,
            journal,
        }
    }

    /// Harness with the demo directory already loaded and the journal cleared.
    pub async fn loaded() -> Self {
        let h = Self::new();
        h.service.load().await.expect("demo load");
        h.journal.0.lock().clear();
        h
    }
}

pub fn new_hire(name: &str, email: &str) -> NewEmployee {
    let mut e = NewEmployee::new(name, email);
    e.position = "Engineer".into();
    e.department = "Engineering".into();
    e.salary = "70000".into();
    e
}
