use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::EmployeesInfoApi,
    error::EmployeesInfoError,
    model::{Employee, NewEmployee, PageView, ProvisioningOutcome},
};
use crate::domain::service::DirectoryService;

/// Local implementation of the EmployeesInfoApi trait that delegates to the domain service
pub struct EmployeesInfoLocalClient {
    service: Arc<DirectoryService>,
}

impl EmployeesInfoLocalClient {
    pub fn new(service: Arc<DirectoryService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl EmployeesInfoApi for EmployeesInfoLocalClient {
    async fn reload(&self) -> Result<usize, EmployeesInfoError> {
        self.service.load().await.map_err(Into::into)
    }

    async fn page(&self) -> PageView {
        self.service.page()
    }

    async fn search(&self, query: &str) -> PageView {
        self.service.set_search_query(query)
    }

    async fn go_to_page(&self, page: u32) -> PageView {
        self.service.go_to_page(page)
    }

    async fn next_page(&self) -> PageView {
        self.service.next_page()
    }

    async fn previous_page(&self) -> PageView {
        self.service.previous_page()
    }

    async fn provision(
        &self,
        new_employee: NewEmployee,
    ) -> Result<ProvisioningOutcome, EmployeesInfoError> {
        self.service
            .provision(new_employee)
            .await
            .map_err(Into::into)
    }

    async fn toggle_status(&self, id: &str) -> Result<Employee, EmployeesInfoError> {
        self.service.toggle_status(id).await.map_err(Into::into)
    }
}
