//! Error hierarchy for the note board.
//!
//! Errors are split by who ends up seeing them:
//! - [`RejectReason`]: client input errors, returned synchronously to the submitter
//! - [`FeedError`]: subscriber delivery failures, contained inside the feed layer
//! - [`Error`]: process-level failures (configuration, binding, shutdown)

use std::net::SocketAddr;
use std::time::Duration;

use config::ConfigError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration loading or deserialization failures
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Configuration values that parsed but are not usable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// HTTP listener could not be bound
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: warp::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    SignalSenderClosed(String),

    /// Unrecoverable failures requiring process termination
    #[error("Fatal error: {0}")]
    Fatal(String),
}

/// Why a submission was refused.
///
/// The `Display` text is part of the wire contract: it is returned verbatim
/// as the `error` field of a `400` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    #[error("Missing required fields")]
    MissingField,

    #[error("Invalid data types")]
    InvalidType,

    #[error("Message too long")]
    MessageTooLong,

    #[error("Invalid color selection")]
    InvalidColor,
}

impl RejectReason {
    /// Stable label used for metrics and structured logs
    pub fn as_label(&self) -> &'static str {
        match self {
            RejectReason::MissingField => "missing_field",
            RejectReason::InvalidType => "invalid_type",
            RejectReason::MessageTooLong => "message_too_long",
            RejectReason::InvalidColor => "invalid_color",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Subscriber outbox is full; it is not keeping up with the feed
    #[error("Subscriber {0} outbox is full")]
    Backpressured(u64),

    /// Subscriber connection task is gone
    #[error("Subscriber {0} disconnected")]
    Disconnected(u64),

    #[error("Send to subscriber {id} timed out after {duration:?}")]
    SendTimeout { id: u64, duration: Duration },

    #[error("Failed to encode feed event: {0}")]
    Encode(#[from] serde_json::Error),

    /// WebSocket transport errors
    #[error(transparent)]
    Transport(#[from] warp::Error),
}
