use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::contract::model::{Employee, EmployeeStatus, NewEmployee};
use crate::domain::repo::EmployeesRepository;
use crate::infra::storage::mapper::{new_employee_to_row, row_to_employee};
use crate::infra::storage::record::EmployeeRow;

/// Process-local employees table. Behaves like the hosted one where it
/// matters to callers: ids are assigned on insert, emails are unique
/// regardless of case and rows go through the same mapper.
#[derive(Debug, Default)]
pub struct InMemoryEmployeesRepository {
    rows: Mutex<Vec<EmployeeRow>>,
}

impl InMemoryEmployeesRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from raw rows, malformed ones included.
    pub fn with_rows(rows: Vec<EmployeeRow>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }

    /// Seeded with a small demo directory.
    pub fn demo() -> Self {
        Self::with_rows(demo_rows())
    }

    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.lock().is_empty()
    }
}

#[async_trait]
impl EmployeesRepository for InMemoryEmployeesRepository {
    #[instrument(name = "employees_info.memory_repo.list_all", skip(self))]
    async fn list_all(&self) -> anyhow::Result<Vec<Employee>> {
        let rows = self.rows.lock().clone();
        Ok(rows
            .into_iter()
            .map(|row| row_to_employee(row).value)
            .collect())
    }

    #[instrument(
        name = "employees_info.memory_repo.insert",
        skip(self, new_employee),
        fields(email = %new_employee.email)
    )]
    async fn insert(&self, new_employee: &NewEmployee) -> anyhow::Result<Employee> {
        let payload = new_employee_to_row(new_employee);
        let mut rows = self.rows.lock();
        if rows.iter().any(|r| {
            r.email_text()
                .is_some_and(|e| e.eq_ignore_ascii_case(&payload.email))
        }) {
            anyhow::bail!("duplicate key value violates unique constraint \"employees_email_key\"");
        }
        let row = payload.into_row(Uuid::new_v4().to_string());
        rows.push(row.clone());
        debug!(total = rows.len(), "row inserted");
        Ok(row_to_employee(row).value)
    }

    #[instrument(name = "employees_info.memory_repo.update_status", skip(self))]
    async fn update_status(&self, id: &str, status: EmployeeStatus) -> anyhow::Result<()> {
        let mut rows = self.rows.lock();
        let hit = rows
            .iter_mut()
            .find(|r| r.id_text().as_deref() == Some(id));
        match hit {
            Some(row) => row.status = Some(Value::from(status.as_str())),
            None => debug!("no row matched; nothing updated"),
        }
        Ok(())
    }
}

type DemoEntry = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    u8,
    &'static str,
    u32,
    &'static str,
);

const DEMO: [DemoEntry; 5] = [
    ("1", "John Smith", "Senior Developer", "Engineering", "(555) 123-4567", 1, "2022-01-15", 85_000, "active"),
    ("2", "Sarah Johnson", "Marketing Specialist", "Marketing", "(555) 234-5678", 5, "2021-10-03", 65_000, "active"),
    ("3", "Michael Chen", "Product Manager", "Product", "(555) 345-6789", 3, "2022-03-22", 95_000, "active"),
    ("4", "Emily Rodriguez", "HR Coordinator", "Human Resources", "(555) 456-7890", 9, "2023-01-08", 60_000, "on-leave"),
    ("5", "Robert Taylor", "Financial Analyst", "Finance", "(555) 567-8901", 12, "2022-09-15", 75_000, "active"),
];

pub fn demo_rows() -> Vec<EmployeeRow> {
    DEMO.iter()
        .map(
            |&(id, name, position, department, phone, img, joindate, salary, status)| EmployeeRow {
                id: Some(json!(id)),
                name: Some(json!(name)),
                position: Some(json!(position)),
                department: Some(json!(department)),
                email: Some(json!(format!(
                    "{}@company.com",
                    name.to_lowercase().replace(' ', ".")
                ))),
                phone: Some(json!(phone)),
                avatar: Some(json!(format!("https://i.pravatar.cc/150?img={img}"))),
                joindate: Some(json!(joindate)),
                salary: Some(json!(salary)),
                status: Some(json!(status)),
            },
        )
        .collect()
}
