//! Snapshot queue for the game-state coaching pipeline.
//!
//! Decouples the ingestion endpoint from rule evaluation:
//! - `push` appends raw snapshot bytes and never waits on processing
//! - `pop` blocks the single consumer until an item is available
//! - Delivery order is FIFO
//!
//! Backends:
//! - `RedisQueue`: durable named list (LPUSH / BRPOP)
//! - `InMemoryQueue`: in-process, for tests and runs without Redis

pub mod config;
pub mod error;
pub mod memory;
pub mod queue;
pub mod redis_queue;

use std::sync::Arc;

pub use config::{QueueBackend, QueueConfig};
pub use error::{QueueError, QueueResult};
pub use memory::InMemoryQueue;
pub use queue::SnapshotQueue;
pub use redis_queue::RedisQueue;

/// Build the queue backend selected by configuration.
pub fn build_queue(config: &QueueConfig) -> QueueResult<Arc<dyn SnapshotQueue>> {
    config.validate()?;
    match config.backend {
        QueueBackend::Redis => Ok(Arc::new(RedisQueue::new(&config.url, &config.key)?)),
        QueueBackend::Memory => Ok(Arc::new(InMemoryQueue::new())),
    }
}
