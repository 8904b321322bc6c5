//! Redis-backed queue implementation.
//!
//! The FIFO is a single named list: producers LPUSH at the head, the consumer
//! BRPOPs from the tail with an infinite timeout.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{QueueError, QueueResult};
use crate::queue::SnapshotQueue;

/// Durable snapshot queue on a Redis list.
///
/// Connections are opened lazily and dropped on the first error, so the
/// process starts without Redis and recovers once it comes back. Push and
/// pop use separate connections: BRPOP parks its connection until an item
/// arrives.
pub struct RedisQueue {
    client: redis::Client,
    key: String,
    push_conn: Mutex<Option<MultiplexedConnection>>,
    /// Held for the whole BRPOP, which also keeps at most one pop in flight.
    pop_conn: Mutex<Option<MultiplexedConnection>>,
}

impl RedisQueue {
    /// Create a queue on `key`. Does not connect.
    pub fn new(url: &str, key: &str) -> QueueResult<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| QueueError::InvalidConfig(format!("invalid redis url: {e}")))?;
        Ok(Self {
            client,
            key: key.to_string(),
            push_conn: Mutex::new(None),
            pop_conn: Mutex::new(None),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    async fn connect(&self, role: &'static str) -> QueueResult<MultiplexedConnection> {
        let conn = self.client.get_multiplexed_tokio_connection().await?;
        info!(key = %self.key, role, "Connected to Redis queue");
        Ok(conn)
    }
}

#[async_trait]
impl SnapshotQueue for RedisQueue {
    async fn push(&self, raw: Vec<u8>) -> QueueResult<()> {
        let mut conn = {
            let mut slot = self.push_conn.lock().await;
            match slot.as_ref() {
                Some(conn) => conn.clone(),
                None => {
                    let conn = self.connect("push").await?;
                    *slot = Some(conn.clone());
                    conn
                }
            }
        };

        let result = redis::cmd("LPUSH")
            .arg(&self.key)
            .arg(raw)
            .query_async::<_, i64>(&mut conn)
            .await;

        match result {
            Ok(len) => {
                debug!(key = %self.key, len, "Snapshot queued");
                Ok(())
            }
            Err(e) => {
                *self.push_conn.lock().await = None;
                Err(e.into())
            }
        }
    }

    async fn pop(&self) -> QueueResult<Vec<u8>> {
        let mut slot = self.pop_conn.lock().await;
        if slot.is_none() {
            *slot = Some(self.connect("pop").await?);
        }

        loop {
            let Some(conn) = slot.as_mut() else {
                return Err(QueueError::Transient("pop connection lost".to_string()));
            };

            // Timeout 0 blocks until an item is available
            let result = redis::cmd("BRPOP")
                .arg(&self.key)
                .arg(0)
                .query_async::<_, Option<(String, Vec<u8>)>>(conn)
                .await;

            match result {
                Ok(Some((_key, raw))) => return Ok(raw),
                Ok(None) => continue,
                Err(e) => {
                    *slot = None;
                    return Err(e.into());
                }
            }
        }
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

impl std::fmt::Debug for RedisQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisQueue")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
