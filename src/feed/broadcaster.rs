use std::sync::Arc;

use tracing::debug;
use tracing::error;

use super::EvictionCause;
use super::FeedEvent;
use super::Outbound;
use super::SubscriptionRegistry;
use crate::metrics::BROADCAST_FANOUT;
use crate::Note;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Subscribers the note was queued for
    pub delivered: usize,
    /// Subscribers evicted because the note could not be queued
    pub dropped: usize,
}

/// Pushes accepted notes to every subscriber in the live set.
pub struct Broadcaster {
    registry: Arc<SubscriptionRegistry>,
}

impl Broadcaster {
    pub fn new(registry: Arc<SubscriptionRegistry>) -> Self {
        Self { registry }
    }

    /// Queues `note` for every subscriber registered right now.
    ///
    /// Each subscriber is handled on its own: a failure evicts that
    /// subscriber and moves on. Nothing here is reported to the submitter.
    pub fn broadcast(
        &self,
        note: &Note,
    ) -> BroadcastReport {
        let frame = match FeedEvent::Note(note.clone()).encode() {
            Ok(frame) => frame,
            Err(e) => {
                error!("note {} not broadcast: {}", note.id(), e);
                return BroadcastReport::default();
            }
        };
        self.broadcast_frame(frame)
    }

    pub(crate) fn broadcast_frame(
        &self,
        frame: Arc<str>,
    ) -> BroadcastReport {
        let mut report = BroadcastReport::default();
        for subscriber in self.registry.live_snapshot() {
            match subscriber.deliver(Outbound::Frame(frame.clone())) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    debug!("delivery to subscriber {} failed: {}", subscriber.id(), e);
                    self.registry.deregister(subscriber.id(), EvictionCause::DeliveryFailure);
                    report.dropped += 1;
                }
            }
        }
        BROADCAST_FANOUT.observe(report.delivered as f64);
        report
    }
}
