//! Dashboard error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),

    /// The dispatch loop is gone; no further states can be delivered.
    #[error("Dispatch intake closed")]
    IntakeClosed,

    #[error("Configuration error: {0}")]
    InvalidConfig(String),
}

pub type DashboardResult<T> = Result<T, DashboardError>;

/// Failure delivering one message to one subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    #[error("Subscriber closed")]
    Closed,

    #[error("Send timed out")]
    Timeout,

    #[error("Transport error: {0}")]
    Transport(String),
}
