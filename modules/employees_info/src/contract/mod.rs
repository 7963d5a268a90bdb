pub mod client;
pub mod error;
pub mod model;

pub use client::EmployeesInfoApi;
pub use error::EmployeesInfoError;
pub use model::{
    Employee, EmployeeStatus, EmptyReason, NewEmployee, PageView, ProvisioningOutcome,
};
