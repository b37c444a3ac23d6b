use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;
use tracing::warn;

use super::Outbound;
use super::Subscriber;
use super::SubscriberFeed;
use super::SubscriberId;
use crate::metrics::FEED_EVICTIONS;
use crate::metrics::FEED_SUBSCRIBERS;

/// Why a subscriber left the live set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionCause {
    /// Missed two consecutive probe cycles
    ProbeTimeout,
    /// Outbox full/closed, or a socket write failed or timed out
    DeliveryFailure,
    /// Client closed the connection
    Disconnected,
    /// Server is shutting down
    Shutdown,
}

impl EvictionCause {
    pub fn as_label(&self) -> &'static str {
        match self {
            EvictionCause::ProbeTimeout => "probe_timeout",
            EvictionCause::DeliveryFailure => "delivery_failure",
            EvictionCause::Disconnected => "disconnected",
            EvictionCause::Shutdown => "shutdown",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProbeReport {
    pub probed: usize,
    pub evicted: usize,
}

/// The set of live subscriber connections.
pub struct SubscriptionRegistry {
    subscribers: DashMap<SubscriberId, Arc<Subscriber>>,
    next_id: AtomicU64,
    outbox_capacity: usize,
}

impl SubscriptionRegistry {
    pub fn new(outbox_capacity: usize) -> Self {
        Self {
            subscribers: DashMap::new(),
            next_id: AtomicU64::new(1),
            outbox_capacity,
        }
    }

    /// Adds a new alive subscriber and hands back the receiving half of its
    /// outbox for the connection task.
    pub fn register(&self) -> (Arc<Subscriber>, SubscriberFeed) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (subscriber, feed) = Subscriber::new(id, self.outbox_capacity);
        self.subscribers.insert(id, subscriber.clone());
        FEED_SUBSCRIBERS.inc();
        debug!("subscriber {} registered", id);
        (subscriber, feed)
    }

    /// Removes and terminates the subscriber. Idempotent; returns whether
    /// the subscriber was still registered.
    pub fn deregister(
        &self,
        id: SubscriberId,
        cause: EvictionCause,
    ) -> bool {
        let Some((_, subscriber)) = self.subscribers.remove(&id) else {
            return false;
        };
        subscriber.terminate();
        FEED_SUBSCRIBERS.dec();
        FEED_EVICTIONS.with_label_values(&[cause.as_label()]).inc();
        match cause {
            EvictionCause::ProbeTimeout | EvictionCause::DeliveryFailure => {
                warn!("subscriber {} evicted: {}", id, cause.as_label())
            }
            EvictionCause::Disconnected | EvictionCause::Shutdown => {
                debug!("subscriber {} deregistered: {}", id, cause.as_label())
            }
        }
        true
    }

    /// Point-in-time copy of the live set.
    pub fn live_snapshot(&self) -> Vec<Arc<Subscriber>> {
        self.subscribers.iter().map(|entry| entry.value().clone()).collect()
    }

    /// One liveness round: evicts subscribers that never answered the
    /// previous probe, marks the rest suspect and probes them.
    pub fn probe_cycle(&self) -> ProbeReport {
        let mut report = ProbeReport::default();
        for subscriber in self.live_snapshot() {
            let id = subscriber.id();
            if !subscriber.suspect() {
                if self.deregister(id, EvictionCause::ProbeTimeout) {
                    report.evicted += 1;
                }
                continue;
            }
            match subscriber.deliver(Outbound::Probe) {
                Ok(()) => report.probed += 1,
                Err(e) => {
                    debug!("probe to subscriber {} failed: {}", id, e);
                    if self.deregister(id, EvictionCause::DeliveryFailure) {
                        report.evicted += 1;
                    }
                }
            }
        }
        report
    }

    pub fn contains(
        &self,
        id: SubscriberId,
    ) -> bool {
        self.subscribers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Deregisters everyone; used on server shutdown.
    pub fn shutdown(&self) -> usize {
        self.live_snapshot()
            .into_iter()
            .filter(|s| self.deregister(s.id(), EvictionCause::Shutdown))
            .count()
    }
}
