//! Concurrency-safe set of connected viewers.
//!
//! The lock guards membership only. It is taken for each `add`, `remove` and
//! snapshot, and never held across a send: a broadcast iterates a
//! point-in-time copy of the membership, so connects and disconnects proceed
//! while a slow subscriber is being written to.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use gsi_telemetry::Metrics;

use crate::error::SendError;

/// Registry-assigned subscriber identifier.
pub type SubscriberId = u64;

/// Outbound half of one viewer's transport.
#[async_trait]
pub trait SubscriberSink: Send + Sync {
    /// Deliver one serialized dashboard state.
    async fn send(&self, payload: &str) -> Result<(), SendError>;
}

/// Handle to one registered viewer.
///
/// Cloning shares the sink and the closed signal; the registry entry is the
/// owner of record.
#[derive(Clone)]
pub struct Subscriber {
    id: SubscriberId,
    sink: Arc<dyn SubscriberSink>,
    closed: CancellationToken,
}

impl Subscriber {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Cancelled when the subscriber leaves the registry.
    pub fn closed(&self) -> &CancellationToken {
        &self.closed
    }

    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }

    pub async fn send(&self, payload: &str) -> Result<(), SendError> {
        if self.is_closed() {
            return Err(SendError::Closed);
        }
        self.sink.send(payload).await
    }
}

impl std::fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscriber")
            .field("id", &self.id)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

/// Active subscriber membership.
pub struct SubscriberRegistry {
    members: Mutex<HashMap<SubscriberId, Subscriber>>,
    next_id: AtomicU64,
    max: usize,
}

impl SubscriberRegistry {
    /// Create a registry admitting at most `max` subscribers.
    pub fn new(max: usize) -> Self {
        Self {
            members: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            max,
        }
    }

    /// Register a sink. Returns `None` when the registry is full.
    pub fn add(&self, sink: Arc<dyn SubscriberSink>) -> Option<Subscriber> {
        let mut members = self.members.lock();
        if members.len() >= self.max {
            return None;
        }
        let subscriber = Subscriber {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            sink,
            closed: CancellationToken::new(),
        };
        members.insert(subscriber.id, subscriber.clone());
        Metrics::subscribers_set(members.len());
        Some(subscriber)
    }

    /// Remove a subscriber and signal its connection to close.
    ///
    /// Returns false if it was already gone.
    pub fn remove(&self, id: SubscriberId) -> bool {
        let removed = {
            let mut members = self.members.lock();
            let removed = members.remove(&id);
            Metrics::subscribers_set(members.len());
            removed
        };
        match removed {
            Some(subscriber) => {
                subscriber.closed.cancel();
                true
            }
            None => false,
        }
    }

    /// Point-in-time copy of the membership.
    pub fn snapshot(&self) -> Vec<Subscriber> {
        self.members.lock().values().cloned().collect()
    }

    /// Run `f` against every current member and remove each member whose
    /// call failed.
    ///
    /// Calls run concurrently and all complete before this returns. Members
    /// added after the snapshot is taken are not visited. Returns the number
    /// removed.
    pub async fn for_each_snapshot<F, Fut>(&self, f: F) -> usize
    where
        F: Fn(Subscriber) -> Fut,
        Fut: Future<Output = Result<(), SendError>>,
    {
        let members = self.snapshot();
        if members.is_empty() {
            return 0;
        }

        let ids: Vec<SubscriberId> = members.iter().map(Subscriber::id).collect();
        let results = join_all(members.into_iter().map(&f)).await;

        let mut removed = 0;
        for (id, result) in ids.into_iter().zip(results) {
            if let Err(e) = result {
                debug!(subscriber = id, error = %e, "Removing subscriber after failed send");
                if self.remove(id) {
                    removed += 1;
                }
            }
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.members.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.lock().is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.max
    }

    pub fn max(&self) -> usize {
        self.max
    }
}
