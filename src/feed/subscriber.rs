use std::sync::atomic::AtomicU8;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio_util::sync::CancellationToken;

use crate::FeedError;

pub type SubscriberId = u64;

/// Lifecycle of a live connection.
///
/// ```text
/// Registering --initial snapshot queued--> Live
/// Live --probe cycle--> Suspect --any inbound frame--> Live
/// any --deregister--> Terminated
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SubscriberState {
    Registering = 0,
    Live = 1,
    Suspect = 2,
    Terminated = 3,
}

impl SubscriberState {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => SubscriberState::Registering,
            1 => SubscriberState::Live,
            2 => SubscriberState::Suspect,
            _ => SubscriberState::Terminated,
        }
    }
}

/// Frames queued for a connection task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// Pre-encoded feed event
    Frame(Arc<str>),
    /// Liveness probe, sent as a protocol-level ping
    Probe,
}

#[derive(Debug)]
pub struct Subscriber {
    id: SubscriberId,
    state: AtomicU8,
    outbox: mpsc::Sender<Outbound>,
    cancel: CancellationToken,
}

impl Subscriber {
    pub(crate) fn new(
        id: SubscriberId,
        outbox_capacity: usize,
    ) -> (Arc<Self>, SubscriberFeed) {
        let (tx, rx) = mpsc::channel(outbox_capacity.max(1));
        let cancel = CancellationToken::new();
        let subscriber = Arc::new(Self {
            id,
            state: AtomicU8::new(SubscriberState::Registering as u8),
            outbox: tx,
            cancel: cancel.clone(),
        });
        let feed = SubscriberFeed {
            id,
            receiver: rx,
            cancel,
        };
        (subscriber, feed)
    }

    pub fn id(&self) -> SubscriberId {
        self.id
    }

    pub fn state(&self) -> SubscriberState {
        SubscriberState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// `true` until a probe cycle marks the subscriber suspect
    pub fn is_alive(&self) -> bool {
        matches!(self.state(), SubscriberState::Registering | SubscriberState::Live)
    }

    /// Registering -> Live, once the initial snapshot is queued
    pub(crate) fn activate(&self) {
        let _ = self.state.compare_exchange(
            SubscriberState::Registering as u8,
            SubscriberState::Live as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    /// Records a liveness response. Terminated subscribers stay terminated.
    pub fn mark_alive(&self) {
        let _ = self.state.fetch_update(Ordering::AcqRel, Ordering::Acquire, |s| {
            match SubscriberState::from_u8(s) {
                SubscriberState::Terminated => None,
                _ => Some(SubscriberState::Live as u8),
            }
        });
    }

    /// Marks the subscriber suspect ahead of a probe.
    ///
    /// Returns `false` when it was already suspect (it missed the previous
    /// probe) or terminated, i.e. when it should not be probed again.
    pub(crate) fn suspect(&self) -> bool {
        self.state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |s| {
                match SubscriberState::from_u8(s) {
                    SubscriberState::Registering | SubscriberState::Live => Some(SubscriberState::Suspect as u8),
                    SubscriberState::Suspect | SubscriberState::Terminated => None,
                }
            })
            .is_ok()
    }

    /// Non-blocking enqueue into the outbox.
    pub(crate) fn deliver(
        &self,
        outbound: Outbound,
    ) -> Result<(), FeedError> {
        self.outbox.try_send(outbound).map_err(|e| match e {
            TrySendError::Full(_) => FeedError::Backpressured(self.id),
            TrySendError::Closed(_) => FeedError::Disconnected(self.id),
        })
    }

    /// Moves to Terminated and cancels the connection task.
    /// Returns `false` if it was already terminated.
    pub(crate) fn terminate(&self) -> bool {
        let previous = self.state.swap(SubscriberState::Terminated as u8, Ordering::AcqRel);
        self.cancel.cancel();
        previous != SubscriberState::Terminated as u8
    }
}

/// Receiving half of a subscriber's outbox, owned by its connection task.
#[derive(Debug)]
pub struct SubscriberFeed {
    id: SubscriberId,
    receiver: mpsc::Receiver<Outbound>,
    cancel: CancellationToken,
}

impl SubscriberFeed {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Next queued frame. `None` once the subscriber has been deregistered.
    pub async fn recv(&mut self) -> Option<Outbound> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            outbound = self.receiver.recv() => outbound,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
