use tracing::{error, info};

use crate::domain::ports::{Notification, NotificationSink, Severity};

/// Routes notifications into the log when no interactive surface is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, n: Notification) {
        let description = n.description.as_deref().unwrap_or("");
        match n.severity {
            Severity::Default => info!(title = %n.title, %description, "notification"),
            Severity::Destructive => error!(title = %n.title, %description, "notification"),
        }
    }
}
