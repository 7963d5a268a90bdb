//! Provisioning workflow: identity → record → role, strictly in that order.
//!
//! One state machine covers both the full three-step flow and the
//! record-only flow; the identity and role steps are switched by options.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use crate::contract::model::{Employee, NewEmployee, ProvisioningOutcome};
use crate::domain::error::DomainError;
use crate::domain::ports::{IdentityId, IdentityProvider, RoleStore};
use crate::domain::repo::EmployeesRepository;
use crate::domain::{describe, with_deadline};

/// What to do with a login identity whose employee record could not be inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanPolicy {
    /// Leave it and report it for manual cleanup.
    #[default]
    Report,
    /// Try to delete it; report it only if deletion fails.
    Compensate,
}

#[derive(Debug, Clone)]
pub struct ProvisioningOptions {
    pub create_identity: bool,
    /// Ignored when no identity is created.
    pub assign_role: bool,
    pub default_password: String,
    pub default_role: String,
    pub orphan_policy: OrphanPolicy,
}

impl Default for ProvisioningOptions {
    fn default() -> Self {
        Self {
            create_identity: true,
            assign_role: true,
            default_password: "defaultPassword123".to_string(),
            default_role: "employee".to_string(),
            orphan_policy: OrphanPolicy::Report,
        }
    }
}

#[derive(Clone)]
pub struct ProvisioningWorkflow {
    repo: Arc<dyn EmployeesRepository>,
    identity: Arc<dyn IdentityProvider>,
    roles: Arc<dyn RoleStore>,
    options: ProvisioningOptions,
    request_timeout: Duration,
}

impl ProvisioningWorkflow {
    pub fn new(
        repo: Arc<dyn EmployeesRepository>,
        identity: Arc<dyn IdentityProvider>,
        roles: Arc<dyn RoleStore>,
        options: ProvisioningOptions,
        request_timeout: Duration,
    ) -> Self {
        Self {
            repo,
            identity,
            roles,
            options,
            request_timeout,
        }
    }

    pub fn options(&self) -> &ProvisioningOptions {
        &self.options
    }

    /// Run the workflow. Nothing is attempted after the first failing step.
    #[instrument(
        name = "employees_info.provisioning.run",
        skip(self, new_employee),
        fields(email = %new_employee.email)
    )]
    pub async fn run(&self, new_employee: NewEmployee) -> Result<ProvisioningOutcome, DomainError> {
        if let Err(e) = validate(&new_employee) {
            warn!(error = %e, "submission rejected");
            return Err(e);
        }

        let identity = if self.options.create_identity {
            Some(self.create_identity(&new_employee).await?)
        } else {
            None
        };

        let employee = match self.insert_record(&new_employee).await {
            Ok(employee) => employee,
            Err(message) => return Err(self.record_failure(message, identity).await),
        };

        let role_assigned = match &identity {
            Some(user_id) if self.options.assign_role => {
                self.assign_role(user_id, &employee).await?;
                true
            }
            _ => false,
        };

        info!(employee_id = %employee.id, role_assigned, "employee provisioned");
        Ok(ProvisioningOutcome {
            employee,
            identity_id: identity.map(|id| id.0),
            role_assigned,
        })
    }

    async fn create_identity(&self, new_employee: &NewEmployee) -> Result<IdentityId, DomainError> {
        let password = new_employee
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(&self.options.default_password);

        let created = with_deadline(
            "identity creation",
            self.request_timeout,
            self.identity.create_identity(&new_employee.email, password),
        )
        .await?;

        created.map_err(|e| {
            warn!(error = %describe(&e), "identity provider rejected new account");
            DomainError::identity_creation(describe(&e))
        })
    }

    async fn insert_record(&self, new_employee: &NewEmployee) -> Result<Employee, String> {
        match with_deadline(
            "record insertion",
            self.request_timeout,
            self.repo.insert(new_employee),
        )
        .await
        {
            Ok(Ok(employee)) => Ok(employee),
            Ok(Err(e)) => Err(describe(&e)),
            Err(timeout) => Err(timeout.to_string()),
        }
    }

    async fn assign_role(&self, user_id: &IdentityId, employee: &Employee) -> Result<(), DomainError> {
        let outcome = with_deadline(
            "role assignment",
            self.request_timeout,
            self.roles.assign_role(user_id, &self.options.default_role),
        )
        .await;

        let message = match outcome {
            Ok(Ok(())) => return Ok(()),
            Ok(Err(e)) => describe(&e),
            Err(timeout) => timeout.to_string(),
        };
        warn!(%user_id, employee_id = %employee.id, %message, "role assignment failed");
        Err(DomainError::role_assignment(
            message,
            employee.clone(),
            user_id.0.clone(),
        ))
    }

    /// Build the insertion error, applying the orphan policy to an identity
    /// created in step 1.
    async fn record_failure(&self, message: String, identity: Option<IdentityId>) -> DomainError {
        let Some(identity) = identity else {
            warn!(%message, "employee record insertion failed");
            return DomainError::record_insertion(message, None);
        };

        if self.options.orphan_policy == OrphanPolicy::Compensate {
            let removed = with_deadline(
                "identity compensation",
                self.request_timeout,
                self.identity.delete_identity(&identity),
            )
            .await;
            match removed {
                Ok(Ok(())) => {
                    warn!(%identity, %message, "record insertion failed; login account removed");
                    return DomainError::record_insertion(
                        format!("{message} (login account removed)"),
                        None,
                    );
                }
                Ok(Err(e)) => {
                    error!(%identity, error = %describe(&e), "compensating identity delete failed")
                }
                Err(e) => error!(%identity, error = %e, "compensating identity delete failed"),
            }
        }

        error!(
            %identity,
            %message,
            "record insertion failed after identity creation; orphaned login account needs cleanup"
        );
        DomainError::record_insertion(message, Some(identity.0))
    }
}

/// Precondition check performed before any remote call.
pub fn validate(new_employee: &NewEmployee) -> Result<(), DomainError> {
    if new_employee.name.trim().is_empty() {
        return Err(DomainError::validation("name", "Name is required"));
    }
    if new_employee.email.trim().is_empty() {
        return Err(DomainError::validation("email", "Email is required"));
    }
    Ok(())
}
