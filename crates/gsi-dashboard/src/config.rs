//! Dashboard server configuration.

use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

/// HTTP server configuration (`[server]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Address to bind.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum concurrent subscribers.
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
    /// A send to one subscriber taking longer than this counts as a failure.
    #[serde(default = "default_send_timeout_ms")]
    pub send_timeout_ms: u64,
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> usize {
    64
}

fn default_send_timeout_ms() -> u64 {
    5000
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            max_connections: default_max_connections(),
            send_timeout_ms: default_send_timeout_ms(),
        }
    }
}

impl DashboardConfig {
    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_ms)
    }

    /// Parse `bind_addr:port`.
    pub fn socket_addr(&self) -> DashboardResult<SocketAddr> {
        let ip = self
            .bind_addr
            .parse::<std::net::IpAddr>()
            .map_err(|e| {
                DashboardError::InvalidConfig(format!("bind_addr {:?}: {e}", self.bind_addr))
            })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Validate configuration values.
    pub fn validate(&self) -> DashboardResult<()> {
        self.socket_addr()?;
        if self.max_connections == 0 {
            return Err(DashboardError::InvalidConfig(
                "max_connections must be greater than 0".to_string(),
            ));
        }
        if self.send_timeout_ms == 0 {
            return Err(DashboardError::InvalidConfig(
                "send_timeout_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
