use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::provisioning::{OrphanPolicy, ProvisioningOptions};
use crate::domain::query::DEFAULT_PAGE_SIZE;
use crate::domain::service::ServiceConfig;

/// Configuration for the employees_info module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmployeesInfoConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_password")]
    pub default_password: String,
    #[serde(default = "default_role")]
    pub default_role: String,
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Register a login identity before inserting the record.
    #[serde(default = "default_true")]
    pub create_identity: bool,
    #[serde(default = "default_true")]
    pub assign_role: bool,
    #[serde(default)]
    pub orphan_policy: OrphanPolicy,
}

impl Default for EmployeesInfoConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            default_password: default_password(),
            default_role: default_role(),
            request_timeout: default_request_timeout(),
            create_identity: true,
            assign_role: true,
            orphan_policy: OrphanPolicy::default(),
        }
    }
}

impl EmployeesInfoConfig {
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            page_size: self.page_size.max(1),
            request_timeout: self.request_timeout,
        }
    }

    pub fn provisioning_options(&self) -> ProvisioningOptions {
        ProvisioningOptions {
            create_identity: self.create_identity,
            assign_role: self.assign_role,
            default_password: self.default_password.clone(),
            default_role: self.default_role.clone(),
            orphan_policy: self.orphan_policy,
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_password() -> String {
    "defaultPassword123".to_string()
}

fn default_role() -> String {
    "employee".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(15)
}

fn default_true() -> bool {
    true
}
