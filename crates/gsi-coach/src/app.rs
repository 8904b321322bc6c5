//! Application orchestration.

use std::future::Future;
use std::sync::Arc;

use gsi_dashboard::{run_dispatch_loop, AppState, DashboardError, Dispatcher, SubscriberRegistry};
use gsi_queue::{build_queue, SnapshotQueue};
use gsi_rules::RuleEngine;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::consumer::run_consumer_loop;
use crate::error::AppResult;

/// Wires the queue, rule engine, dispatch loop and HTTP server together.
pub struct Application {
    config: AppConfig,
    queue: Arc<dyn SnapshotQueue>,
    engine: RuleEngine,
    registry: Arc<SubscriberRegistry>,
}

impl Application {
    /// Create an application with the configured queue backend.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let queue = build_queue(&config.queue)?;
        Self::with_queue(config, queue)
    }

    /// Create an application on an existing queue.
    pub fn with_queue(config: AppConfig, queue: Arc<dyn SnapshotQueue>) -> AppResult<Self> {
        config.validate()?;
        let engine = RuleEngine::new(config.rules.clone())?;
        let registry = Arc::new(SubscriberRegistry::new(config.server.max_connections));

        info!(
            queue = queue.backend(),
            strategies = engine.strategies().len(),
            max_connections = config.server.max_connections,
            "Application initialized"
        );

        Ok(Self {
            config,
            queue,
            engine,
            registry,
        })
    }

    pub fn registry(&self) -> Arc<SubscriberRegistry> {
        self.registry.clone()
    }

    /// Run until ctrl-c.
    pub async fn run(self) -> AppResult<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Bind the configured address and run until `shutdown` resolves.
    pub async fn run_until(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> AppResult<()> {
        let addr = self.config.server.socket_addr()?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| DashboardError::Bind { addr, source })?;
        self.serve(listener, shutdown).await
    }

    /// Run the pipeline on a bound listener until `shutdown` resolves.
    ///
    /// In-flight work is abandoned on shutdown; the loops are aborted
    /// without draining.
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> AppResult<()> {
        let (dispatcher, intake) = Dispatcher::channel();

        let dispatch_handle = tokio::spawn(run_dispatch_loop(
            intake,
            self.registry.clone(),
            self.config.server.send_timeout(),
        ));

        let consumer_handle = tokio::spawn(run_consumer_loop(
            self.queue.clone(),
            self.engine,
            dispatcher,
            self.config.queue.retry_delay(),
        ));

        let state = AppState::new(self.queue, self.registry);
        let result = gsi_dashboard::serve(listener, state, shutdown).await;

        consumer_handle.abort();
        dispatch_handle.abort();
        info!("Shutdown complete");

        result.map_err(Into::into)
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!(error = %e, "Failed to listen for ctrl-c, running until killed");
            std::future::pending::<()>().await;
        }
    }
}
