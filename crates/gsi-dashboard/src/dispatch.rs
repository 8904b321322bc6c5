//! Dispatch loop: fans derived states out to subscribers.
//!
//! The consumer submits states into an unbounded intake; a single task
//! drains it in order and, for each state, serializes once and delivers to
//! a snapshot of the registry. One state is fully delivered (or its failed
//! subscribers removed) before the next is taken, so every subscriber sees
//! states in production order.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use gsi_core::DashboardState;
use gsi_telemetry::Metrics;

use crate::error::{DashboardError, DashboardResult, SendError};
use crate::registry::SubscriberRegistry;

/// Sending half of the dispatch intake.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<DashboardState>,
}

impl Dispatcher {
    /// Create a dispatcher and the receiver to hand to [`run_dispatch_loop`].
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<DashboardState>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queue a state for delivery. Never waits.
    pub fn submit(&self, state: DashboardState) -> DashboardResult<()> {
        self.tx
            .send(state)
            .map_err(|_| DashboardError::IntakeClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Drain the intake until every [`Dispatcher`] is dropped.
pub async fn run_dispatch_loop(
    mut rx: mpsc::UnboundedReceiver<DashboardState>,
    registry: Arc<SubscriberRegistry>,
    send_timeout: Duration,
) {
    info!(send_timeout_ms = send_timeout.as_millis() as u64, "Dispatch loop started");

    while let Some(state) = rx.recv().await {
        if registry.is_empty() {
            trace!(clock = state.clock_time, "No subscribers, state not sent");
            continue;
        }

        let payload = match serde_json::to_string(&state) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Failed to serialize dashboard state");
                continue;
            }
        };

        let started = Instant::now();
        let payload = payload.as_str();
        let removed = registry
            .for_each_snapshot(|subscriber| async move {
                let result = match tokio::time::timeout(send_timeout, subscriber.send(payload)).await
                {
                    Ok(result) => result,
                    Err(_) => Err(SendError::Timeout),
                };
                if result.is_err() {
                    Metrics::subscriber_send_failed();
                }
                result
            })
            .await;
        Metrics::dispatch_fanout(started.elapsed().as_secs_f64() * 1000.0);

        if removed > 0 {
            debug!(removed, remaining = registry.len(), "Dropped failed subscribers");
        }
        trace!(clock = state.clock_time, subscribers = registry.len(), "State dispatched");
    }

    info!("Dispatch intake closed, loop exiting");
}
