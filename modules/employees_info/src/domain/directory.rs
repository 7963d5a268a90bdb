//! The authoritative in-memory collection for one directory view.
//!
//! Mutated only by a full reset, by prepending a freshly provisioned
//! employee, or by patching a status. Nothing is ever removed.

use tracing::{debug, warn};

use crate::contract::model::{Employee, EmployeeStatus};
use crate::domain::error::DomainError;

#[derive(Debug, Clone, Default)]
pub struct DirectoryStore {
    employees: Vec<Employee>,
}

impl DirectoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the collection with the outcome of a full fetch.
    ///
    /// On failure the collection is emptied rather than left stale, and the
    /// error is handed back to the caller. Duplicate ids keep their first row.
    pub fn reset_from(
        &mut self,
        fetched: Result<Vec<Employee>, DomainError>,
    ) -> Result<usize, DomainError> {
        match fetched {
            Ok(rows) => {
                let mut unique: Vec<Employee> = Vec::with_capacity(rows.len());
                for row in rows {
                    if unique.iter().any(|e| e.id == row.id) {
                        warn!(id = %row.id, "duplicate employee id in fetch; keeping first");
                        continue;
                    }
                    unique.push(row);
                }
                self.employees = unique;
                Ok(self.employees.len())
            }
            Err(e) => {
                self.employees.clear();
                Err(e)
            }
        }
    }

    /// Prepend a newly created employee (most recent first).
    ///
    /// Ids come from persistence so a clash means the store is out of sync;
    /// the stale entry is dropped to keep ids unique.
    pub fn append(&mut self, employee: Employee) {
        if let Some(pos) = self.employees.iter().position(|e| e.id == employee.id) {
            warn!(id = %employee.id, "appended employee already present; replacing");
            self.employees.remove(pos);
        }
        self.employees.insert(0, employee);
    }

    /// Set the status of the matching entry. Unknown ids are a benign no-op;
    /// returns whether an entry was patched.
    pub fn patch_status(&mut self, id: &str, status: EmployeeStatus) -> bool {
        match self.employees.iter_mut().find(|e| e.id == id) {
            Some(e) => {
                e.status = status;
                true
            }
            None => {
                debug!(%id, "patch_status for unknown id ignored");
                false
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn all(&self) -> &[Employee] {
        &self.employees
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}
