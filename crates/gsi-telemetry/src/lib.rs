//! Prometheus metrics and structured logging for the coaching pipeline.
//!
//! - Structured logging with tracing (pretty for development, JSON in production)
//! - Prometheus counters for ingestion, evaluation and fan-out
//! - Text exposition for the `/metrics` endpoint

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use metrics::{encode_text, Metrics};
