use async_trait::async_trait;
use anyhow::Result;

use tokio_util::sync::CancellationToken;

/// Transaction boundary for one command invocation.
///
/// Repositories only stage changes. Nothing is durable until `commit`
/// succeeds, and a failed or cancelled commit leaves nothing behind.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Persist every staged change atomically, returning the number of
    /// affected rows.
    async fn commit(&self, cancellation: &CancellationToken) -> Result<u64>;
}
