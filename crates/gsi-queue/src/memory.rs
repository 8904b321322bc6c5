//! In-process queue implementation for tests and runs without Redis.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::error::QueueResult;
use crate::queue::SnapshotQueue;

/// Unbounded in-memory FIFO.
///
/// Not durable: queued snapshots are lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryQueue {
    items: Mutex<VecDeque<Vec<u8>>>,
    available: Notify,
}

impl InMemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued snapshots.
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

#[async_trait]
impl SnapshotQueue for InMemoryQueue {
    async fn push(&self, raw: Vec<u8>) -> QueueResult<()> {
        self.items.lock().push_back(raw);
        self.available.notify_one();
        Ok(())
    }

    async fn pop(&self) -> QueueResult<Vec<u8>> {
        loop {
            // Register interest before checking so a push between the check
            // and the await is not missed
            let notified = self.available.notified();
            if let Some(raw) = self.items.lock().pop_front() {
                return Ok(raw);
            }
            notified.await;
        }
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
