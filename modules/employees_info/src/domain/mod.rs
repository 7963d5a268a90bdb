pub mod directory;
pub mod error;
pub mod ports;
pub mod provisioning;
pub mod query;
pub mod repo;
pub mod service;
pub mod status;

use std::future::Future;
use std::time::Duration;

use error::DomainError;

/// Bound a remote call. Expiry maps to a retryable `DomainError::Timeout`;
/// the inner result is returned untouched so callers can classify it.
pub(crate) async fn with_deadline<T, F>(
    operation: &'static str,
    limit: Duration,
    call: F,
) -> Result<anyhow::Result<T>, DomainError>
where
    F: Future<Output = anyhow::Result<T>>,
{
    tokio::time::timeout(limit, call).await.map_err(|_| {
        tracing::warn!(operation, ?limit, "remote call timed out");
        DomainError::timeout(operation, limit)
    })
}

/// Provider messages are `anyhow` chains; surface the whole chain.
pub(crate) fn describe(err: &anyhow::Error) -> String {
    format!("{err:#}")
}
