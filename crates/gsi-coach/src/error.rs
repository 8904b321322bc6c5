//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Queue error: {0}")]
    Queue(#[from] gsi_queue::QueueError),

    #[error("Rules error: {0}")]
    Rules(#[from] gsi_rules::RulesError),

    #[error("Dashboard error: {0}")]
    Dashboard(#[from] gsi_dashboard::DashboardError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] gsi_telemetry::TelemetryError),
}

pub type AppResult<T> = Result<T, AppError>;
