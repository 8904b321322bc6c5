//! gsi-coach - Entry Point
//!
//! Receives game-state pushes on `/` and streams coaching advice to viewers
//! connected on `/ws`.

use anyhow::Result;
use clap::Parser;
use gsi_coach::{AppConfig, Application};
use gsi_queue::QueueBackend;
use tracing::{info, warn};

/// Live match coaching service
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via GSI_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Override the HTTP port
    #[arg(short, long)]
    port: Option<u16>,

    /// Use the in-process queue instead of Redis
    #[arg(long)]
    memory_queue: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config first: it carries the log settings
    let config_path = AppConfig::resolve_path(args.config);
    let loaded = AppConfig::load(&config_path)?;
    let found = loaded.is_some();
    let mut config = loaded.unwrap_or_default();

    gsi_telemetry::init_logging(&config.telemetry.log_level, config.telemetry.json_logs)?;

    info!("Starting gsi-coach v{}", env!("CARGO_PKG_VERSION"));
    if found {
        info!(config_path = %config_path, "Configuration loaded");
    } else {
        warn!(config_path = %config_path, "Config file not found, using defaults");
    }

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.memory_queue {
        config.queue.backend = QueueBackend::Memory;
    }

    info!(
        bind_addr = %config.server.bind_addr,
        port = config.server.port,
        queue = ?config.queue.backend,
        "Effective configuration"
    );

    let app = Application::new(config)?;
    app.run().await?;

    Ok(())
}
