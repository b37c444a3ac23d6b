//! Live subscriber feed.
//!
//! ## Components
//! - [`Subscriber`]: one live connection, its outbox and liveness state
//! - [`SubscriptionRegistry`]: the live set, probe cycles and eviction
//! - [`Broadcaster`]: fanout of accepted notes to a registry snapshot
//! - [`run_probe_timer`]: periodic driver of [`SubscriptionRegistry::probe_cycle`]
//!
//! Delivery into a subscriber never blocks: every subscriber owns a bounded
//! outbox drained by its connection task. A full outbox is a delivery failure
//! and evicts that subscriber only.

mod broadcaster;
mod event;
mod heartbeat;
mod registry;
mod subscriber;
pub use broadcaster::*;
pub use event::*;
pub use heartbeat::*;
pub use registry::*;
pub use subscriber::*;
