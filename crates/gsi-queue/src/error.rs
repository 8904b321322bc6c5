//! Queue error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueueError {
    /// Backend unreachable or connection dropped. Callers retry.
    #[error("Transient queue error: {0}")]
    Transient(String),

    #[error("Configuration error: {0}")]
    InvalidConfig(String),
}

impl From<redis::RedisError> for QueueError {
    fn from(err: redis::RedisError) -> Self {
        Self::Transient(err.to_string())
    }
}

pub type QueueResult<T> = Result<T, QueueError>;
