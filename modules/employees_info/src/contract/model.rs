use std::fmt;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Employment status. Closed set: anything else read from storage is
/// coerced to `Inactive` before it reaches this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmployeeStatus {
    Active,
    Inactive,
    OnLeave,
}

impl EmployeeStatus {
    pub const ALL: [EmployeeStatus; 3] = [Self::Active, Self::Inactive, Self::OnLeave];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::OnLeave => "on-leave",
        }
    }

    /// Exact, case-sensitive match against the persisted spelling.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }

    /// Input-side parsing for the creation form: unknown values fall back to `Active`.
    pub fn from_form(raw: &str) -> Self {
        Self::parse(raw.trim()).unwrap_or(Self::Active)
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pure employee model for inter-module communication (no serde)
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    /// Assigned by the persistence layer, never by the client.
    pub id: String,
    pub name: String,
    pub position: String,
    pub department: String,
    pub email: String,
    /// Empty string when absent.
    pub phone: String,
    /// Placeholder asset reference when absent.
    pub avatar: String,
    /// `None` when storage holds no parseable date.
    pub join_date: Option<NaiveDate>,
    /// Non-negative.
    pub salary: f64,
    pub status: EmployeeStatus,
}

/// Data for provisioning a new employee, as entered by an operator.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub name: String,
    pub position: String,
    pub department: String,
    pub email: String,
    pub phone: String,
    /// Empty means "use the placeholder".
    pub avatar: String,
    pub join_date: NaiveDate,
    /// Raw salary text; coerced to a non-negative number on write.
    pub salary: String,
    pub status: EmployeeStatus,
    /// Login password; `None` uses the configured default.
    pub password: Option<String>,
}

impl NewEmployee {
    /// Form defaults: joined today, active, everything else blank.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: String::new(),
            department: String::new(),
            email: email.into(),
            phone: String::new(),
            avatar: String::new(),
            join_date: Utc::now().date_naive(),
            salary: String::new(),
            status: EmployeeStatus::Active,
            password: None,
        }
    }
}

/// Result of a fully successful provisioning run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisioningOutcome {
    pub employee: Employee,
    /// `None` when identity creation is disabled.
    pub identity_id: Option<String>,
    pub role_assigned: bool,
}

/// Why a page has no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// The directory itself is empty.
    NoEmployees,
    /// The directory has entries but none match the search.
    NoMatches,
}

impl EmptyReason {
    pub fn hint(self) -> &'static str {
        match self {
            Self::NoEmployees => "Add employees to get started.",
            Self::NoMatches => "Try adjusting your search.",
        }
    }
}

/// The visible slice of the directory for the current search and page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub rows: Vec<Employee>,
    pub search_query: String,
    /// 1-based.
    pub current_page: u32,
    /// `ceil(filtered_count / page_size)`; zero when nothing matches.
    pub total_pages: u32,
    pub filtered_count: usize,
    pub directory_size: usize,
}

impl PageView {
    /// Zero pages are displayed as a single empty page.
    pub fn display_total_pages(&self) -> u32 {
        self.total_pages.max(1)
    }

    pub fn shows_pagination(&self) -> bool {
        self.total_pages > 1
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn empty_reason(&self) -> Option<EmptyReason> {
        if !self.rows.is_empty() {
            None
        } else if self.directory_size == 0 {
            Some(EmptyReason::NoEmployees)
        } else {
            Some(EmptyReason::NoMatches)
        }
    }
}
