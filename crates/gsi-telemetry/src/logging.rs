//! Structured logging initialization.

use crate::error::{TelemetryError, TelemetryResult};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured logging.
///
/// `RUST_LOG` overrides `level`. JSON output is used when `json` is set or
/// when `RUST_ENV=production`; otherwise the pretty development format.
pub fn init_logging(level: &str, json: bool) -> TelemetryResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    let is_production = std::env::var("RUST_ENV")
        .map(|v| v == "production")
        .unwrap_or(false);

    let result = if json || is_production {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty().with_target(true))
            .try_init()
    };

    result.map_err(|e| TelemetryError::LoggingInit(e.to_string()))
}

/// Filter directives for a configured level: our crates at `level`, at least
/// `info` for dependencies.
fn default_directives(level: &str) -> String {
    let level = level.trim().to_ascii_lowercase();
    let deps = match level.as_str() {
        "error" | "warn" => level.as_str(),
        _ => "info",
    };
    format!(
        "{deps},gsi_coach={level},gsi_dashboard={level},gsi_queue={level},gsi_rules={level}"
    )
}
