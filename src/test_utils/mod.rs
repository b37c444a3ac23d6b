//! Shared fixtures for unit tests.

use std::sync::Arc;

use crate::BoardConfig;
use crate::BoardContext;
use crate::NoteDraft;
use crate::RawSubmission;

static LOGGER_INIT: once_cell::sync::Lazy<()> = once_cell::sync::Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
});

pub fn enable_logger() {
    *LOGGER_INIT;
    println!("setup logger for unit test.");
}

/// An already validated draft whose proof token is `sig-<message>`.
pub fn draft(message: &str) -> NoteDraft {
    NoteDraft {
        message: message.to_string(),
        proof_token: format!("sig-{message}"),
        principal: "wallet-1".to_string(),
        color: "yellow".to_string(),
    }
}

pub fn submission(message: &str) -> RawSubmission {
    RawSubmission::new(message, format!("sig-{message}"), "wallet-1")
}

pub fn context_with(config: BoardConfig) -> Arc<BoardContext> {
    enable_logger();
    Arc::new(BoardContext::new(&config))
}
