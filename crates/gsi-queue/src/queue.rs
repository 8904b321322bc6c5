//! Queue port.

use async_trait::async_trait;

use crate::error::QueueResult;

/// FIFO of raw, still-serialized snapshots.
///
/// Implementations are shared between any number of producers and exactly
/// one consumer.
#[async_trait]
pub trait SnapshotQueue: Send + Sync {
    /// Append a raw snapshot at the tail.
    async fn push(&self, raw: Vec<u8>) -> QueueResult<()>;

    /// Remove and return the head, waiting indefinitely while the queue is empty.
    ///
    /// Fails with `QueueError::Transient` if the backend is unreachable.
    async fn pop(&self) -> QueueResult<Vec<u8>>;

    /// Backend name for logs.
    fn backend(&self) -> &'static str;
}
