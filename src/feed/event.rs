use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::FeedError;
use crate::Note;

/// Messages pushed to live subscribers.
///
/// Encoded as `{"type": "initial", "data": [...]}` for the snapshot sent on
/// connect and `{"type": "note", "data": {...}}` for each accepted note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum FeedEvent {
    Initial(Vec<Note>),
    Note(Note),
}

impl FeedEvent {
    /// Serializes once so the same frame can be shared by every recipient.
    pub fn encode(&self) -> Result<Arc<str>, FeedError> {
        Ok(Arc::from(serde_json::to_string(self)?))
    }
}
