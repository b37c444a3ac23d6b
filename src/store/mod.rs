//! Bounded in-memory note storage.
//!
//! Notes live only for the lifetime of the process. The store keeps at most
//! `max_notes` of them and evicts strictly oldest-first.

mod note;
mod note_store;
pub use note::*;
pub use note_store::*;
