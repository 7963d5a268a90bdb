use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{debug, error, info, instrument, warn};

use crate::contract::model::{
    Employee, EmployeeStatus, NewEmployee, PageView, ProvisioningOutcome,
};
use crate::domain::directory::DirectoryStore;
use crate::domain::error::DomainError;
use crate::domain::ports::{Notification, NotificationSink};
use crate::domain::provisioning::ProvisioningWorkflow;
use crate::domain::query::{self, QueryState, DEFAULT_PAGE_SIZE};
use crate::domain::repo::EmployeesRepository;
use crate::domain::status::{self, BusyRows};
use crate::domain::{describe, with_deadline};

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub page_size: usize,
    pub request_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: Duration::from_secs(15),
        }
    }
}

/// State and operations for one directory view.
///
/// Owns the directory store and the search/page state for the view's
/// lifetime. Directory mutations happen only after the remote call they
/// mirror has succeeded. Every failure is caught here, logged and sent
/// to the notification sink as destructive.
pub struct DirectoryService {
    repo: Arc<dyn EmployeesRepository>,
    provisioning: ProvisioningWorkflow,
    notifier: Arc<dyn NotificationSink>,
    config: ServiceConfig,
    store: RwLock<DirectoryStore>,
    query: RwLock<QueryState>,
    busy: BusyRows,
    // Outstanding loads.
    loading: AtomicUsize,
}

impl DirectoryService {
    /// Create a service with dependencies. The directory starts empty; call
    /// [`DirectoryService::load`] to populate it.
    pub fn new(
        repo: Arc<dyn EmployeesRepository>,
        provisioning: ProvisioningWorkflow,
        notifier: Arc<dyn NotificationSink>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            provisioning,
            notifier,
            config,
            store: RwLock::new(DirectoryStore::new()),
            query: RwLock::new(QueryState::new()),
            busy: BusyRows::new(),
            loading: AtomicUsize::new(0),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire) > 0
    }

    /// True while a status request for `id` is outstanding.
    pub fn is_busy(&self, id: &str) -> bool {
        self.busy.is_busy(id)
    }

    /// Snapshot of the whole directory, most recent first.
    pub fn employees(&self) -> Vec<Employee> {
        self.store.read().all().to_vec()
    }

    // --- directory store ---

    /// Replace the directory with a fresh fetch. On failure the directory
    /// is emptied and the error returned.
    #[instrument(name = "employees_info.service.load", skip(self))]
    pub async fn load(&self) -> Result<usize, DomainError> {
        let _loading = LoadingGuard::enter(&self.loading);
        let fetched = match with_deadline(
            "directory fetch",
            self.config.request_timeout,
            self.repo.list_all(),
        )
        .await
        {
            Ok(Ok(rows)) => Ok(rows),
            Ok(Err(e)) => Err(DomainError::fetch(describe(&e))),
            Err(timeout) => Err(timeout),
        };

        let result = self.store.write().reset_from(fetched);
        self.clamp_page();

        match result {
            Ok(n) => {
                info!(count = n, "directory loaded");
                Ok(n)
            }
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }

    // --- query view ---

    /// Current visible page.
    pub fn page(&self) -> PageView {
        let store = self.store.read();
        let state = self.query.read();
        query::render(store.all(), &state, self.config.page_size)
    }

    pub fn set_search_query(&self, search: &str) -> PageView {
        self.query.write().set_search_query(search);
        self.page()
    }

    pub fn go_to_page(&self, page: u32) -> PageView {
        let total = self.total_pages();
        self.query.write().go_to_page(page, total);
        self.page()
    }

    pub fn next_page(&self) -> PageView {
        let total = self.total_pages();
        self.query.write().next_page(total);
        self.page()
    }

    pub fn previous_page(&self) -> PageView {
        let total = self.total_pages();
        self.query.write().previous_page(total);
        self.page()
    }

    fn total_pages(&self) -> u32 {
        let store = self.store.read();
        let search = self.query.read().search_query().to_string();
        query::total_pages(
            query::filter(store.all(), &search).len(),
            self.config.page_size,
        )
    }

    fn clamp_page(&self) {
        let total = self.total_pages();
        let mut state = self.query.write();
        let current = state.current_page();
        state.go_to_page(current, total);
    }

    // --- provisioning ---

    /// Provision a new employee and, only on full success, prepend it to the directory.
    #[instrument(
        name = "employees_info.service.provision",
        skip(self, new_employee),
        fields(email = %new_employee.email, name = %new_employee.name)
    )]
    pub async fn provision(
        &self,
        new_employee: NewEmployee,
    ) -> Result<ProvisioningOutcome, DomainError> {
        let with_identity = self.provisioning.options().create_identity;
        match self.provisioning.run(new_employee).await {
            Ok(outcome) => {
                self.store.write().append(outcome.employee.clone());
                let description = if with_identity {
                    "Employee account created! They can now log in with their email and the default password."
                } else {
                    "Employee record created."
                };
                self.notifier
                    .notify(Notification::success("Success", description));
                Ok(outcome)
            }
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }

    // --- status transition control ---

    /// Flip `id` between active and inactive.
    ///
    /// Fails fast with `Busy` while another toggle for the same id is
    /// outstanding. Local state changes only after the remote update succeeds.
    #[instrument(name = "employees_info.service.toggle_status", skip(self), fields(employee_id = %id))]
    pub async fn toggle_status(&self, id: &str) -> Result<Employee, DomainError> {
        let result = self.try_toggle(id).await;
        if let Err(e) = &result {
            self.report(e);
        }
        result
    }

    async fn try_toggle(&self, id: &str) -> Result<Employee, DomainError> {
        let Some(_guard) = self.busy.try_acquire(id) else {
            debug!("toggle rejected: request already in flight");
            return Err(DomainError::busy(id));
        };

        let current = self
            .store
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::employee_not_found(id))?;
        let next = status::toggled(current.status)?;

        match with_deadline(
            "status update",
            self.config.request_timeout,
            self.repo.update_status(id, next),
        )
        .await?
        {
            Ok(()) => {}
            Err(e) => {
                warn!(error = %describe(&e), "status update rejected");
                return Err(DomainError::update(id, describe(&e)));
            }
        }

        if !self.store.write().patch_status(id, next) {
            // Reloaded away while the request was in flight.
            debug!("employee vanished from directory before patch");
        }
        info!(from = %current.status, to = %next, "status changed");

        let verb = if next == EmployeeStatus::Active {
            "Activated"
        } else {
            "Inactivated"
        };
        self.notifier.notify(Notification::success(
            format!("Employee {verb}"),
            format!("{} is now {}.", current.name, next),
        ));

        Ok(Employee {
            status: next,
            ..current
        })
    }

    fn report(&self, err: &DomainError) {
        if err.is_partial() {
            error!(error = %err, "operation left remote state incomplete");
        } else {
            warn!(error = %err, retryable = err.is_retryable(), "operation failed");
        }
        self.notifier.notify(failure_notice(err));
    }
}

/// Counts a load as outstanding until dropped, including when the load
/// future is cancelled.
struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self(counter)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Destructive notification for a failed operation, carrying the provider message.
pub fn failure_notice(err: &DomainError) -> Notification {
    use DomainError::*;
    match err {
        Validation { .. } => Notification::failure("Name and Email are required.", None),
        IdentityCreation { message } => {
            Notification::failure("Failed to create user account", Some(message.clone()))
        }
        RecordInsertion {
            message,
            orphaned_identity: None,
        } => Notification::failure("Error creating employee", Some(message.clone())),
        RecordInsertion {
            message,
            orphaned_identity: Some(identity),
        } => Notification::failure(
            "Error creating employee",
            Some(format!(
                "{message}. Login account {identity} was created without an employee record and needs manual cleanup."
            )),
        ),
        RoleAssignment {
            message, employee, ..
        } => Notification::failure(
            "Employee created without role",
            Some(format!(
                "{} was added but the role could not be assigned: {message}",
                employee.name
            )),
        ),
        Fetch { message } => {
            Notification::failure("Error fetching employees", Some(message.clone()))
        }
        Update { message, .. } => {
            Notification::failure("Status Update Failed", Some(message.clone()))
        }
        Timeout { .. } => Notification::failure(
            "Request timed out",
            Some(format!("{err}. Please try again.")),
        ),
        UnsupportedTransition { status } => Notification::failure(
            "Status Update Failed",
            Some(format!("An employee who is {status} cannot be toggled.")),
        ),
        Busy { .. } => Notification::failure(
            "Status Update Failed",
            Some("An update for this employee is already in progress.".to_string()),
        ),
        EmployeeNotFound { id } => Notification::failure(
            "Status Update Failed",
            Some(format!("Employee {id} is not in the directory.")),
        ),
    }
}
