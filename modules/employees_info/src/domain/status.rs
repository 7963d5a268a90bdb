//! Status transition control: the active/inactive toggle and the per-row
//! busy flags that keep toggles on one employee from overlapping.

use dashmap::DashSet;

use crate::contract::model::EmployeeStatus;
use crate::domain::error::DomainError;

/// The only transitions this control produces: active ⇄ inactive.
/// `on-leave` is set by external data and has no toggle.
pub fn toggled(current: EmployeeStatus) -> Result<EmployeeStatus, DomainError> {
    match current {
        EmployeeStatus::Active => Ok(EmployeeStatus::Inactive),
        EmployeeStatus::Inactive => Ok(EmployeeStatus::Active),
        EmployeeStatus::OnLeave => Err(DomainError::unsupported_transition(current)),
    }
}

/// Set of employee ids with a request in flight.
#[derive(Debug, Default)]
pub struct BusyRows {
    ids: DashSet<String>,
}

impl BusyRows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id` busy. `None` when it already is.
    pub fn try_acquire(&self, id: &str) -> Option<BusyGuard<'_>> {
        self.ids.insert(id.to_string()).then(|| BusyGuard {
            rows: self,
            id: id.to_string(),
        })
    }

    pub fn is_busy(&self, id: &str) -> bool {
        self.ids.contains(id)
    }
}

/// Clears the busy flag when dropped, on every exit path.
#[derive(Debug)]
pub struct BusyGuard<'a> {
    rows: &'a BusyRows,
    id: String,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.rows.ids.remove(&self.id);
    }
}
