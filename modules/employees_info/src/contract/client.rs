use async_trait::async_trait;

use crate::contract::{
    error::EmployeesInfoError,
    model::{Employee, NewEmployee, PageView, ProvisioningOutcome},
};

/// Public API trait for the employees_info module that other modules can use
#[async_trait]
pub trait EmployeesInfoApi: Send + Sync {
    /// Refetch the whole directory; returns the number of employees loaded.
    async fn reload(&self) -> Result<usize, EmployeesInfoError>;

    /// Current visible page.
    async fn page(&self) -> PageView;

    /// Change the search text; the page resets to 1 when it differs.
    async fn search(&self, query: &str) -> PageView;

    /// Jump to a page, clamped to the available range.
    async fn go_to_page(&self, page: u32) -> PageView;

    async fn next_page(&self) -> PageView;

    async fn previous_page(&self) -> PageView;

    /// Create login identity, employee record and role for a new hire.
    async fn provision(
        &self,
        new_employee: NewEmployee,
    ) -> Result<ProvisioningOutcome, EmployeesInfoError>;

    /// Flip an employee between active and inactive.
    async fn toggle_status(&self, id: &str) -> Result<Employee, EmployeesInfoError>;
}
