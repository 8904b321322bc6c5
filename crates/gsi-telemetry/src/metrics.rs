//! Prometheus metrics for the coaching pipeline.
//!
//! Covers the three stages of a tick:
//! - Ingestion (snapshots accepted, queue push failures)
//! - Evaluation (states derived, ticks skipped, payloads dropped, queue errors)
//! - Fan-out (subscriber count, send failures, per-tick fan-out latency)
//!
//! # Panics
//!
//! Metric registration uses `unwrap()`. A failure means a duplicate metric
//! name in this module and only happens during static initialization.

use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, register_int_gauge,
    Encoder, Histogram, IntCounter, IntCounterVec, IntGauge, TextEncoder,
};

use crate::error::{TelemetryError, TelemetryResult};

/// Snapshots accepted at the ingestion endpoint.
pub static SNAPSHOTS_INGESTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "gsi_snapshots_ingested_total",
        "Total snapshots accepted by the ingestion endpoint"
    )
    .unwrap()
});

/// Ingested snapshots whose queue push failed (swallowed after the response).
pub static INGEST_PUSH_FAILED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "gsi_ingest_push_failed_total",
        "Total ingested snapshots lost to a queue push failure"
    )
    .unwrap()
});

/// Snapshots dropped by the consumer.
/// Labels: reason (malformed)
pub static SNAPSHOTS_DROPPED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "gsi_snapshots_dropped_total",
        "Total snapshots dropped before evaluation",
        &["reason"]
    )
    .unwrap()
});

/// Ticks with no output (match not loaded yet).
pub static TICKS_SKIPPED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "gsi_ticks_skipped_total",
        "Total ticks evaluated without output"
    )
    .unwrap()
});

/// Dashboard states derived and handed to dispatch.
pub static STATES_DERIVED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "gsi_states_derived_total",
        "Total dashboard states derived"
    )
    .unwrap()
});

/// Transient queue errors seen by the consumer.
pub static QUEUE_ERRORS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "gsi_queue_errors_total",
        "Total transient queue errors in the consumer loop"
    )
    .unwrap()
});

/// Currently registered subscribers.
pub static SUBSCRIBERS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!("gsi_subscribers", "Currently registered subscribers").unwrap()
});

/// Subscribers removed after a failed send.
pub static SUBSCRIBER_SEND_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "gsi_subscriber_send_failures_total",
        "Total subscriber sends that failed or timed out"
    )
    .unwrap()
});

/// Time to fan one state out to every subscriber, in milliseconds.
pub static DISPATCH_FANOUT_MS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "gsi_dispatch_fanout_ms",
        "Time to deliver one dashboard state to all subscribers in milliseconds",
        vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 50.0, 100.0, 500.0, 1000.0, 5000.0]
    )
    .unwrap()
});

/// Metrics helper.
pub struct Metrics;

impl Metrics {
    pub fn snapshot_ingested() {
        SNAPSHOTS_INGESTED_TOTAL.inc();
    }

    pub fn ingest_push_failed() {
        INGEST_PUSH_FAILED_TOTAL.inc();
    }

    /// Record a snapshot dropped before evaluation.
    pub fn snapshot_dropped(reason: &str) {
        SNAPSHOTS_DROPPED_TOTAL.with_label_values(&[reason]).inc();
    }

    pub fn tick_skipped() {
        TICKS_SKIPPED_TOTAL.inc();
    }

    pub fn state_derived() {
        STATES_DERIVED_TOTAL.inc();
    }

    pub fn queue_error() {
        QUEUE_ERRORS_TOTAL.inc();
    }

    /// Set the subscriber gauge to the registry size.
    pub fn subscribers_set(count: usize) {
        SUBSCRIBERS.set(i64::try_from(count).unwrap_or(i64::MAX));
    }

    pub fn subscriber_send_failed() {
        SUBSCRIBER_SEND_FAILURES_TOTAL.inc();
    }

    /// Record fan-out latency for one tick.
    pub fn dispatch_fanout(ms: f64) {
        DISPATCH_FANOUT_MS.observe(ms);
    }
}

/// Encode every registered metric in the Prometheus text format.
pub fn encode_text() -> TelemetryResult<String> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&prometheus::gather(), &mut buffer)
        .map_err(|e| TelemetryError::Metrics(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::Metrics(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_increment() {
        let before = STATES_DERIVED_TOTAL.get();
        Metrics::state_derived();
        assert!(STATES_DERIVED_TOTAL.get() > before);

        let dropped = SNAPSHOTS_DROPPED_TOTAL.with_label_values(&["malformed"]);
        let before = dropped.get();
        Metrics::snapshot_dropped("malformed");
        assert!(dropped.get() > before);
    }

    #[test]
    fn test_encode_text_contains_touched_metrics() {
        Metrics::snapshot_ingested();
        Metrics::tick_skipped();
        Metrics::dispatch_fanout(1.5);

        let text = encode_text().unwrap();
        assert!(text.contains("gsi_snapshots_ingested_total"));
        assert!(text.contains("gsi_ticks_skipped_total"));
        assert!(text.contains("gsi_dispatch_fanout_ms_bucket"));
    }

    #[test]
    fn test_subscriber_gauge() {
        Metrics::subscribers_set(3);
        assert_eq!(SUBSCRIBERS.get(), 3);
        Metrics::subscribers_set(0);
        assert_eq!(SUBSCRIBERS.get(), 0);
    }
}
