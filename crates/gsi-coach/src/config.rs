//! Application configuration.

use std::path::Path;

use gsi_dashboard::DashboardConfig;
use gsi_queue::QueueConfig;
use gsi_rules::RulesConfig;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Config file used when neither `--config` nor `GSI_CONFIG` is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "GSI_CONFIG";

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server (ingestion, subscription, health, metrics).
    #[serde(default)]
    pub server: DashboardConfig,
    /// Snapshot queue backend.
    #[serde(default)]
    pub queue: QueueConfig,
    /// Rule engine thresholds and strategy table.
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Resolve the config path: CLI argument > `GSI_CONFIG` > default.
    pub fn resolve_path(cli: Option<String>) -> String {
        cli.or_else(|| std::env::var(CONFIG_ENV_VAR).ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
    }

    /// Load from `path` if it exists. `Ok(None)` means the file is missing
    /// and the caller should fall back to defaults.
    pub fn load(path: &str) -> AppResult<Option<Self>> {
        if Path::new(path).exists() {
            Self::from_file(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config {path}: {e}")))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Validate every section.
    pub fn validate(&self) -> AppResult<()> {
        self.server.validate()?;
        self.queue.validate()?;
        self.rules.validate()?;
        Ok(())
    }
}

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level for this service's crates (`RUST_LOG` overrides).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit JSON log lines instead of the pretty format.
    #[serde(default)]
    pub json_logs: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}
