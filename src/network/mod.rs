//! HTTP and WebSocket transport for the board.
//!
//! - `GET  /api/sticky-notes`: list stored notes, oldest first
//! - `POST /api/sticky-notes`: submit a note
//! - `GET  /` with `Upgrade: websocket`: live feed
//!
//! Every rejection is turned into a JSON `{ "error": ... }` body.

mod handlers;
mod routes;
mod ws;
pub use handlers::ErrorBody;
pub use routes::*;

#[cfg(test)]
mod handlers_test;
