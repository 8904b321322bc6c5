//! Live match coaching service.
//!
//! Orchestrates the pipeline:
//! - Ingestion endpoint enqueues raw game-state pushes
//! - Consumer loop pops one snapshot at a time and runs the rule engine
//! - Dispatch loop fans each derived state out to connected viewers

pub mod app;
pub mod config;
pub mod consumer;
pub mod error;

pub use app::Application;
pub use config::{AppConfig, TelemetryConfig};
pub use consumer::{process_snapshot, run_consumer_loop};
pub use error::{AppError, AppResult};
