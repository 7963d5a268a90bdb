use async_trait::async_trait;

use crate::contract::model::{Employee, EmployeeStatus, NewEmployee};

/// Port for the domain layer: the directory's backing collection.
/// Object-safe and async-friendly via `async_trait`.
///
/// Implementations own the persisted shape and translate through the
/// record mapper; the domain only ever sees `Employee`.
#[async_trait]
pub trait EmployeesRepository: Send + Sync {
    /// Fetch every employee record.
    async fn list_all(&self) -> anyhow::Result<Vec<Employee>>;
    /// Insert one record and return it as stored (with its assigned id).
    async fn insert(&self, new_employee: &NewEmployee) -> anyhow::Result<Employee>;
    /// Single-field update keyed by id. Matching zero rows is not an error.
    async fn update_status(&self, id: &str, status: EmployeeStatus) -> anyhow::Result<()>;
}
