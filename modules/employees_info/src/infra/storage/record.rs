//! Persisted shape of the `employees` collection.
//!
//! Column names follow the backing table, including the lower-cased
//! `joindate`. Every column is optional on read: the mapper decides what a
//! missing value means.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row as returned by `select *`.
///
/// Columns are kept as raw JSON so that a wrongly typed value in one row
/// cannot fail the decoding of a whole page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRow {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub position: Option<Value>,
    #[serde(default)]
    pub department: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub phone: Option<Value>,
    #[serde(default)]
    pub avatar: Option<Value>,
    #[serde(default)]
    pub joindate: Option<Value>,
    /// Numeric column, but older rows hold text.
    #[serde(default)]
    pub salary: Option<Value>,
    #[serde(default)]
    pub status: Option<Value>,
}

impl EmployeeRow {
    /// Row identifiers are text (uuid) in most deployments but numeric keys
    /// also occur; both are carried as strings past this point.
    pub fn id_text(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn email_text(&self) -> Option<&str> {
        self.email.as_ref().and_then(Value::as_str)
    }
}

/// Insert payload. `id` is never sent; the store assigns it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEmployeeRow {
    pub name: String,
    pub position: String,
    pub department: String,
    pub email: String,
    /// Serialized as `null` when the form left it blank.
    pub phone: Option<String>,
    pub salary: f64,
    pub avatar: String,
    pub joindate: String,
    pub status: String,
}

impl NewEmployeeRow {
    /// The row the store would hold after inserting this payload under `id`.
    pub fn into_row(self, id: String) -> EmployeeRow {
        EmployeeRow {
            id: Some(Value::String(id)),
            name: Some(Value::String(self.name)),
            position: Some(Value::String(self.position)),
            department: Some(Value::String(self.department)),
            email: Some(Value::String(self.email)),
            phone: self.phone.map(Value::String),
            avatar: Some(Value::String(self.avatar)),
            joindate: Some(Value::String(self.joindate)),
            salary: serde_json::Number::from_f64(self.salary).map(Value::Number),
            status: Some(Value::String(self.status)),
        }
    }
}

/// Body of the single-field status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusPatch {
    pub status: &'static str,
}
