use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmployeesInfoError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The backend refused the write, e.g. an already registered email.
    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Employee not found: {id}")]
    NotFound { id: String },

    #[error("Employee {id} has an update in progress")]
    Busy { id: String },

    /// Some remote side effects survived the failure and need attention.
    #[error("Partially completed: {message}")]
    PartialFailure { message: String },

    /// Transient; the operation may be retried.
    #[error("Backend unavailable: {message}")]
    Unavailable { message: String },

    #[error("Internal error")]
    Internal,
}

impl EmployeesInfoError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn busy(id: impl Into<String>) -> Self {
        Self::Busy { id: id.into() }
    }

    pub fn partial(message: impl Into<String>) -> Self {
        Self::PartialFailure {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for EmployeesInfoError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            Validation { field, message } => Self::validation(format!("{field}: {message}")),
            UnsupportedTransition { status } => {
                Self::validation(format!("status '{status}' cannot be toggled"))
            }
            IdentityCreation { message } => Self::conflict(message),
            RecordInsertion {
                message,
                orphaned_identity: None,
            } => Self::conflict(message),
            RecordInsertion {
                message,
                orphaned_identity: Some(identity),
            } => Self::partial(format!(
                "{message} (login account {identity} has no employee record)"
            )),
            RoleAssignment {
                message,
                employee_id,
                ..
            } => Self::partial(format!(
                "employee {employee_id} created without role: {message}"
            )),
            EmployeeNotFound { id } => Self::not_found(id),
            Busy { id } => Self::busy(id),
            Fetch { message } => Self::unavailable(message),
            Update { message, .. } => Self::unavailable(message),
            Timeout { operation, after } => {
                Self::unavailable(format!("{operation} timed out after {after:?}"))
            }
        }
    }
}
