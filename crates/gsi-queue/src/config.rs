//! Queue configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{QueueError, QueueResult};

/// Which queue implementation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueBackend {
    /// Durable Redis list.
    #[default]
    Redis,
    /// In-process queue (lost on restart).
    Memory,
}

/// Queue configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    #[serde(default)]
    pub backend: QueueBackend,
    /// Redis connection URL.
    #[serde(default = "default_url")]
    pub url: String,
    /// Name of the Redis list used as the FIFO.
    #[serde(default = "default_key")]
    pub key: String,
    /// Consumer back-off after a transient queue error (ms).
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_url() -> String {
    "redis://127.0.0.1:6380".to_string()
}

fn default_key() -> String {
    "dota_live_queue".to_string()
}

fn default_retry_delay_ms() -> u64 {
    1000
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            backend: QueueBackend::default(),
            url: default_url(),
            key: default_key(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl QueueConfig {
    /// Get retry delay as Duration.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Validate queue configuration.
    pub fn validate(&self) -> QueueResult<()> {
        if self.backend != QueueBackend::Redis {
            return Ok(());
        }
        if self.key.is_empty() {
            return Err(QueueError::InvalidConfig("queue key is empty".to_string()));
        }
        if !self.url.starts_with("redis://") && !self.url.starts_with("rediss://") {
            return Err(QueueError::InvalidConfig(format!(
                "queue url must start with redis:// or rediss://, got {}",
                self.url
            )));
        }
        Ok(())
    }
}
