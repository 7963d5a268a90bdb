use std::time::Duration;

use thiserror::Error;

use crate::contract::model::{Employee, EmployeeStatus};

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// Missing or malformed input, detected before any remote call.
    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Identity creation failed: {message}")]
    IdentityCreation { message: String },

    /// `orphaned_identity` is set when a login account was created first
    /// and still exists without an employee record.
    #[error("Record insertion failed: {message}")]
    RecordInsertion {
        message: String,
        orphaned_identity: Option<String>,
    },

    /// Identity and record exist; only the role is missing.
    #[error("Role assignment failed for user {user_id}: {message}")]
    RoleAssignment {
        message: String,
        employee_id: String,
        user_id: String,
        employee: Box<Employee>,
    },

    #[error("Directory fetch failed: {message}")]
    Fetch { message: String },

    #[error("Status update failed for {id}: {message}")]
    Update { id: String, message: String },

    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("Status '{status}' has no toggle transition")]
    UnsupportedTransition { status: EmployeeStatus },

    #[error("Employee {id} already has a request in flight")]
    Busy { id: String },

    #[error("Employee not found: {id}")]
    EmployeeNotFound { id: String },
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn identity_creation(message: impl Into<String>) -> Self {
        Self::IdentityCreation {
            message: message.into(),
        }
    }

    pub fn record_insertion(message: impl Into<String>, orphaned_identity: Option<String>) -> Self {
        Self::RecordInsertion {
            message: message.into(),
            orphaned_identity,
        }
    }

    pub fn role_assignment(
        message: impl Into<String>,
        employee: Employee,
        user_id: impl Into<String>,
    ) -> Self {
        Self::RoleAssignment {
            message: message.into(),
            employee_id: employee.id.clone(),
            user_id: user_id.into(),
            employee: Box::new(employee),
        }
    }

    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    pub fn update(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Update {
            id: id.into(),
            message: message.into(),
        }
    }

    pub fn timeout(operation: &'static str, after: Duration) -> Self {
        Self::Timeout { operation, after }
    }

    pub fn unsupported_transition(status: EmployeeStatus) -> Self {
        Self::UnsupportedTransition { status }
    }

    pub fn busy(id: impl Into<String>) -> Self {
        Self::Busy { id: id.into() }
    }

    pub fn employee_not_found(id: impl Into<String>) -> Self {
        Self::EmployeeNotFound { id: id.into() }
    }

    /// Transient failures that leave no remote side effects behind.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Fetch { .. } | Self::Update { .. }
        )
    }

    /// A remote side effect survived the failure.
    pub fn is_partial(&self) -> bool {
        matches!(
            self,
            Self::RecordInsertion {
                orphaned_identity: Some(_),
                ..
            } | Self::RoleAssignment { .. }
        )
    }
}
