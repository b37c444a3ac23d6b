use std::sync::Arc;

use tracing::debug;

use super::BoardContext;
use crate::EvictionCause;
use crate::FeedError;
use crate::FeedEvent;
use crate::Outbound;
use crate::Subscriber;
use crate::SubscriberFeed;
use crate::SubscriberId;

/// A freshly attached subscriber whose outbox already holds the initial
/// snapshot.
pub struct FeedSession {
    pub subscriber: Arc<Subscriber>,
    pub feed: SubscriberFeed,
}

/// Attaches and detaches live subscribers.
#[derive(Clone)]
pub struct SubscriptionEndpoint {
    ctx: Arc<BoardContext>,
}

impl SubscriptionEndpoint {
    pub fn new(ctx: Arc<BoardContext>) -> Self {
        Self { ctx }
    }

    /// Registers a subscriber and queues one `initial` message carrying the
    /// store contents as of registration. Everything queued afterwards is an
    /// incremental note or a probe.
    pub fn attach(&self) -> Result<FeedSession, FeedError> {
        self.ctx.sequenced(|| {
            let (subscriber, feed) = self.ctx.registry.register();
            let initial = FeedEvent::Initial(self.ctx.store.snapshot());

            let queued = initial
                .encode()
                .and_then(|frame| subscriber.deliver(Outbound::Frame(frame)));
            if let Err(e) = queued {
                self.ctx.registry.deregister(subscriber.id(), EvictionCause::DeliveryFailure);
                return Err(e);
            }

            subscriber.activate();
            debug!("subscriber {} attached", subscriber.id());
            Ok(FeedSession { subscriber, feed })
        })
    }

    /// Connection ended; idempotent.
    pub fn detach(
        &self,
        id: SubscriberId,
        cause: EvictionCause,
    ) -> bool {
        self.ctx.registry.deregister(id, cause)
    }
}
