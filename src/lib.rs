//! A real-time note board.
//!
//! Accepted notes are kept in a bounded in-memory [`NoteStore`] and fanned out
//! to every live WebSocket subscriber. Subscribers are probed periodically and
//! evicted when they stop answering or fall behind.

mod api;
mod config;
mod errors;
mod feed;
mod server;
mod store;
mod validation;

pub mod metrics;
pub mod network;
pub mod utils;

pub use self::config::*;
pub use api::*;
pub use errors::*;
pub use feed::*;
pub use server::*;
pub use store::*;
pub use validation::*;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub mod test_utils;
