pub mod identity;
pub mod notifications;
pub mod roles;

pub use identity::{IdentityId, IdentityProvider};
pub use notifications::{Notification, NotificationSink, Severity};
pub use roles::RoleStore;
