//! Consumer loop: queue → rule engine → dispatch intake.
//!
//! Strictly serial. One snapshot is popped, decoded and evaluated before the
//! next pop, so derived states leave in queue order.

use std::sync::Arc;
use std::time::Duration;

use gsi_core::{DashboardState, RawSnapshot};
use gsi_dashboard::Dispatcher;
use gsi_queue::SnapshotQueue;
use gsi_rules::RuleEngine;
use gsi_telemetry::Metrics;
use tracing::{debug, info, trace, warn};

/// Decode and evaluate one raw snapshot.
///
/// Returns `None` for a malformed payload (dropped) and for a tick with no
/// output (match still loading).
pub fn process_snapshot(engine: &RuleEngine, raw: &[u8]) -> Option<DashboardState> {
    let snapshot = match RawSnapshot::from_slice(raw) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            debug!(error = %e, bytes = raw.len(), "Dropping malformed snapshot");
            Metrics::snapshot_dropped("malformed");
            return None;
        }
    };

    match engine.evaluate(&snapshot) {
        Some(state) => {
            Metrics::state_derived();
            Some(state)
        }
        None => {
            Metrics::tick_skipped();
            None
        }
    }
}

/// Run until the dispatch intake closes.
///
/// Queue errors are never fatal: the loop backs off for `retry_delay` and
/// pops again.
pub async fn run_consumer_loop(
    queue: Arc<dyn SnapshotQueue>,
    engine: RuleEngine,
    dispatcher: Dispatcher,
    retry_delay: Duration,
) {
    info!(backend = queue.backend(), "Consumer loop started");

    loop {
        let raw = match queue.pop().await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    error = %e,
                    retry_delay_ms = retry_delay.as_millis() as u64,
                    "Queue pop failed, retrying"
                );
                Metrics::queue_error();
                tokio::time::sleep(retry_delay).await;
                continue;
            }
        };

        let Some(state) = process_snapshot(&engine, &raw) else {
            continue;
        };

        trace!(clock = state.clock_time, "Forwarding state to dispatch");
        if dispatcher.submit(state).is_err() {
            info!("Dispatch intake closed, consumer loop exiting");
            return;
        }
    }
}
