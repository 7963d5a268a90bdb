//! Process-local stand-ins for the hosted identity and role services,
//! used by the `--mock` console mode and by tests.

pub mod identity;
pub mod roles;

pub use identity::InMemoryIdentityProvider;
pub use roles::InMemoryRoleStore;
