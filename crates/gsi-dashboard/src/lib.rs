//! gsi-dashboard - live fan-out of derived dashboard states.
//!
//! # Architecture
//!
//! ```text
//! game client ──POST /──▶ SnapshotQueue ──▶ consumer (gsi-coach)
//!                                                │ Dispatcher::submit
//!                                                ▼
//!                                     run_dispatch_loop (single task)
//!                                                │ for_each_snapshot
//!                                                ▼
//!                 viewers ◀──/ws── SubscriberRegistry
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use gsi_dashboard::{run_dispatch_loop, run_server, AppState, Dispatcher, SubscriberRegistry};
//!
//! let registry = Arc::new(SubscriberRegistry::new(config.max_connections));
//! let (dispatcher, intake) = Dispatcher::channel();
//! tokio::spawn(run_dispatch_loop(intake, registry.clone(), config.send_timeout()));
//!
//! let state = AppState::new(queue, registry);
//! run_server(state, &config, shutdown_signal()).await?;
//! ```

mod config;
mod dispatch;
mod error;
mod registry;
mod server;

pub use config::DashboardConfig;
pub use dispatch::{run_dispatch_loop, Dispatcher};
pub use error::{DashboardError, DashboardResult, SendError};
pub use registry::{Subscriber, SubscriberId, SubscriberRegistry, SubscriberSink};
pub use server::{create_router, run_server, serve, AppState};
