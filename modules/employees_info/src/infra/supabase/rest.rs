use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use tracing::instrument;

use super::{check, SupabaseClient};
use crate::contract::model::{Employee, EmployeeStatus, NewEmployee};
use crate::domain::ports::{IdentityId, RoleStore};
use crate::domain::repo::EmployeesRepository;
use crate::infra::storage::mapper::{new_employee_to_row, row_to_employee};
use crate::infra::storage::record::{EmployeeRow, StatusPatch};

const EMPLOYEES: [&str; 3] = ["rest", "v1", "employees"];
const USER_ROLES: [&str; 3] = ["rest", "v1", "user_roles"];

/// `employees` table over PostgREST.
pub struct PostgrestEmployeesRepository {
    client: Arc<SupabaseClient>,
}

impl PostgrestEmployeesRepository {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EmployeesRepository for PostgrestEmployeesRepository {
    #[instrument(
        name = "employees_info.supabase.employees.list_all",
        skip_all,
        fields(base = %self.client.base())
    )]
    async fn list_all(&self) -> anyhow::Result<Vec<Employee>> {
        let mut url = self.client.endpoint(&EMPLOYEES)?;
        url.query_pairs_mut().append_pair("select", "*");

        let response = self
            .client
            .request(Method::GET, url)
            .send()
            .await
            .context("GET /rest/v1/employees")?;
        let rows: Vec<EmployeeRow> = check(response, "employee fetch")
            .await?
            .json()
            .await
            .context("decoding employees")?;

        Ok(rows.into_iter().map(|r| row_to_employee(r).value).collect())
    }

    #[instrument(
        name = "employees_info.supabase.employees.insert",
        skip_all,
        fields(email = %new_employee.email)
    )]
    async fn insert(&self, new_employee: &NewEmployee) -> anyhow::Result<Employee> {
        let url = self.client.endpoint(&EMPLOYEES)?;
        let payload = [new_employee_to_row(new_employee)];

        let response = self
            .client
            .request(Method::POST, url)
            .header("Prefer", "return=representation")
            .json(&payload)
            .send()
            .await
            .context("POST /rest/v1/employees")?;
        let rows: Vec<EmployeeRow> = check(response, "employee insert")
            .await?
            .json()
            .await
            .context("decoding inserted employee")?;

        rows.into_iter()
            .next()
            .map(|r| row_to_employee(r).value)
            .context("insert returned no rows")
    }

    #[instrument(
        name = "employees_info.supabase.employees.update_status",
        skip(self),
        fields(employee_id = %id)
    )]
    async fn update_status(&self, id: &str, status: EmployeeStatus) -> anyhow::Result<()> {
        let mut url = self.client.endpoint(&EMPLOYEES)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));

        let response = self
            .client
            .request(Method::PATCH, url)
            .json(&StatusPatch {
                status: status.as_str(),
            })
            .send()
            .await
            .with_context(|| format!("PATCH /rest/v1/employees?id=eq.{id}"))?;
        check(response, "status update").await?;
        Ok(())
    }
}

#[derive(Serialize)]
struct UserRoleRow<'a> {
    user_id: &'a str,
    role: &'a str,
}

/// `user_roles` table over PostgREST.
pub struct PostgrestRoleStore {
    client: Arc<SupabaseClient>,
}

impl PostgrestRoleStore {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RoleStore for PostgrestRoleStore {
    #[instrument(
        name = "employees_info.supabase.user_roles.assign",
        skip_all,
        fields(user_id = %user_id, role = %role)
    )]
    async fn assign_role(&self, user_id: &IdentityId, role: &str) -> anyhow::Result<()> {
        let url = self.client.endpoint(&USER_ROLES)?;
        let payload = [UserRoleRow {
            user_id: &user_id.0,
            role,
        }];

        let response = self
            .client
            .request(Method::POST, url)
            .json(&payload)
            .send()
            .await
            .context("POST /rest/v1/user_roles")?;
        check(response, "role assignment").await?;
        Ok(())
    }
}
