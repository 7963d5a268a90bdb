//! Translation between persisted rows and the domain `Employee`.
//!
//! Every function here is total. Malformed values are replaced by a safe
//! default and the replacement is reported as a [`Degradation`] so callers
//! can tell a coerced value from a valid one.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use tracing::debug;

use crate::contract::model::{Employee, EmployeeStatus, NewEmployee};
use crate::infra::storage::record::{EmployeeRow, NewEmployeeRow};

/// Avatar reference used whenever a row has none.
pub const PLACEHOLDER_AVATAR: &str = "/placeholder.svg";

const JOIN_DATE_FORMAT: &str = "%Y-%m-%d";

/// A value that was replaced during mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum Degradation {
    UnknownStatus(String),
    MissingStatus,
    MissingAvatar,
    MissingPhone,
    MissingSalary,
    InvalidSalary(String),
    NegativeSalary,
    InvalidJoinDate(String),
    MissingJoinDate,
    /// A non-text value in a text column.
    WrongType { column: &'static str, raw: String },
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownStatus(raw) => write!(f, "unknown status {raw:?} read as inactive"),
            Self::MissingStatus => f.write_str("missing status read as inactive"),
            Self::MissingAvatar => f.write_str("missing avatar replaced by placeholder"),
            Self::MissingPhone => f.write_str("missing phone read as empty"),
            Self::MissingSalary => f.write_str("missing salary read as 0"),
            Self::InvalidSalary(raw) => write!(f, "invalid salary {raw:?} read as 0"),
            Self::NegativeSalary => f.write_str("negative salary read as 0"),
            Self::InvalidJoinDate(raw) => write!(f, "unparsable join date {raw:?} dropped"),
            Self::MissingJoinDate => f.write_str("missing join date"),
            Self::WrongType { column, raw } => write!(f, "{column} held non-text value {raw}"),
        }
    }
}

/// One coerced field.
#[derive(Debug, Clone, PartialEq)]
pub struct Coerced<T> {
    pub value: T,
    pub degradation: Option<Degradation>,
}

impl<T> Coerced<T> {
    fn valid(value: T) -> Self {
        Self {
            value,
            degradation: None,
        }
    }

    fn degraded(value: T, degradation: Degradation) -> Self {
        Self {
            value,
            degradation: Some(degradation),
        }
    }

    /// Move the value out, recording any degradation in `sink`.
    fn collect(self, sink: &mut Vec<Degradation>) -> T {
        sink.extend(self.degradation);
        self.value
    }
}

/// A whole mapped record with every degradation applied to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Mapped<T> {
    pub value: T,
    pub degradations: Vec<Degradation>,
}

impl<T> Mapped<T> {
    pub fn is_clean(&self) -> bool {
        self.degradations.is_empty()
    }
}

/// Text content of a column; `Err` hands back a non-text value.
fn as_text(raw: Option<&Value>) -> Result<Option<&str>, &Value> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(other),
    }
}

fn wrong_type(column: &'static str, raw: &Value) -> Degradation {
    Degradation::WrongType {
        column,
        raw: raw.to_string(),
    }
}

/// Free-text column. Numbers and booleans are shown as written; structured
/// values are dropped.
fn coerce_text(column: &'static str, raw: Option<&Value>) -> Coerced<String> {
    match as_text(raw) {
        Ok(s) => Coerced::valid(s.unwrap_or_default().to_string()),
        Err(v) if v.is_number() || v.is_boolean() => {
            Coerced::degraded(v.to_string(), wrong_type(column, v))
        }
        Err(v) => Coerced::degraded(String::new(), wrong_type(column, v)),
    }
}

pub fn coerce_status(raw: Option<&Value>) -> Coerced<EmployeeStatus> {
    match as_text(raw) {
        Ok(None) => Coerced::degraded(EmployeeStatus::Inactive, Degradation::MissingStatus),
        Ok(Some(s)) => match EmployeeStatus::parse(s) {
            Some(status) => Coerced::valid(status),
            None => Coerced::degraded(
                EmployeeStatus::Inactive,
                Degradation::UnknownStatus(s.to_string()),
            ),
        },
        Err(v) => Coerced::degraded(EmployeeStatus::Inactive, wrong_type("status", v)),
    }
}

pub fn coerce_avatar(raw: Option<&Value>) -> Coerced<String> {
    match as_text(raw) {
        Ok(Some(s)) if !s.trim().is_empty() => Coerced::valid(s.trim().to_string()),
        Ok(_) => Coerced::degraded(PLACEHOLDER_AVATAR.to_string(), Degradation::MissingAvatar),
        Err(v) => Coerced::degraded(PLACEHOLDER_AVATAR.to_string(), wrong_type("avatar", v)),
    }
}

pub fn coerce_phone(raw: Option<&Value>) -> Coerced<String> {
    match as_text(raw) {
        Ok(None) => Coerced::degraded(String::new(), Degradation::MissingPhone),
        _ => coerce_text("phone", raw),
    }
}

/// Salary as stored: a JSON number, a numeric string, or nothing.
pub fn coerce_salary(raw: Option<&Value>) -> Coerced<f64> {
    match raw {
        None | Some(Value::Null) => Coerced::degraded(0.0, Degradation::MissingSalary),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) => checked_salary(v, || n.to_string()),
            None => Coerced::degraded(0.0, Degradation::InvalidSalary(n.to_string())),
        },
        Some(Value::String(s)) => coerce_salary_text(s),
        Some(other) => Coerced::degraded(0.0, Degradation::InvalidSalary(other.to_string())),
    }
}

/// Salary as typed into the creation form.
pub fn coerce_salary_text(raw: &str) -> Coerced<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Coerced::degraded(0.0, Degradation::MissingSalary);
    }
    match trimmed.parse::<f64>() {
        Ok(v) => checked_salary(v, || raw.to_string()),
        Err(_) => Coerced::degraded(0.0, Degradation::InvalidSalary(raw.to_string())),
    }
}

fn checked_salary(v: f64, raw: impl FnOnce() -> String) -> Coerced<f64> {
    if !v.is_finite() {
        Coerced::degraded(0.0, Degradation::InvalidSalary(raw()))
    } else if v < 0.0 {
        Coerced::degraded(0.0, Degradation::NegativeSalary)
    } else {
        // Normalizes -0.0.
        Coerced::valid(v + 0.0)
    }
}

/// Accepts `YYYY-MM-DD` and full RFC 3339 timestamps.
pub fn coerce_join_date(raw: Option<&Value>) -> Coerced<Option<NaiveDate>> {
    let text = match as_text(raw) {
        Ok(text) => text,
        Err(v) => return Coerced::degraded(None, wrong_type("joindate", v)),
    };
    let Some(s) = text.map(str::trim).filter(|s| !s.is_empty()) else {
        return Coerced::degraded(None, Degradation::MissingJoinDate);
    };
    if let Ok(date) = NaiveDate::parse_from_str(s, JOIN_DATE_FORMAT) {
        return Coerced::valid(Some(date));
    }
    match DateTime::parse_from_rfc3339(s) {
        Ok(ts) => Coerced::valid(Some(ts.date_naive())),
        Err(_) => Coerced::degraded(None, Degradation::InvalidJoinDate(s.to_string())),
    }
}

/// Convert a persisted row to the domain shape.
pub fn row_to_employee(row: EmployeeRow) -> Mapped<Employee> {
    let mut degradations = Vec::new();
    let id = row.id_text().unwrap_or_default();

    let name = coerce_text("name", row.name.as_ref()).collect(&mut degradations);
    let position = coerce_text("position", row.position.as_ref()).collect(&mut degradations);
    let department = coerce_text("department", row.department.as_ref()).collect(&mut degradations);
    let email = coerce_text("email", row.email.as_ref()).collect(&mut degradations);
    let status = coerce_status(row.status.as_ref()).collect(&mut degradations);
    let avatar = coerce_avatar(row.avatar.as_ref()).collect(&mut degradations);
    let phone = coerce_phone(row.phone.as_ref()).collect(&mut degradations);
    let salary = coerce_salary(row.salary.as_ref()).collect(&mut degradations);
    let join_date = coerce_join_date(row.joindate.as_ref()).collect(&mut degradations);

    for d in &degradations {
        debug!(employee_id = %id, degradation = %d, "coerced persisted value");
    }

    Mapped {
        value: Employee {
            id,
            name,
            position,
            department,
            email,
            phone,
            avatar,
            join_date,
            salary,
            status,
        },
        degradations,
    }
}

/// Build the insert payload for a form submission.
pub fn new_employee_to_row(new_employee: &NewEmployee) -> NewEmployeeRow {
    let salary = coerce_salary_text(&new_employee.salary);
    if let Some(d) = &salary.degradation {
        debug!(email = %new_employee.email, degradation = %d, "coerced salary input");
    }
    let phone = new_employee.phone.trim();

    NewEmployeeRow {
        name: new_employee.name.trim().to_string(),
        position: new_employee.position.clone(),
        department: new_employee.department.clone(),
        email: new_employee.email.trim().to_string(),
        phone: (!phone.is_empty()).then(|| phone.to_string()),
        salary: salary.value,
        avatar: match new_employee.avatar.trim() {
            "" => PLACEHOLDER_AVATAR.to_string(),
            avatar => avatar.to_string(),
        },
        joindate: new_employee.join_date.format(JOIN_DATE_FORMAT).to_string(),
        status: new_employee.status.as_str().to_string(),
    }
}
