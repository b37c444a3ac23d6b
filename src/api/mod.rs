//! Synchronous entry points of the board.
//!
//! [`IngressApi`] accepts and lists notes, [`SubscriptionEndpoint`] attaches
//! live subscribers. Both act on one shared [`BoardContext`].

mod context;
mod ingress;
mod subscription;
pub use context::*;
pub use ingress::*;
pub use subscription::*;

#[cfg(test)]
mod subscription_test;
