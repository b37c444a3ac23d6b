use chrono::DateTime;
use chrono::Utc;
use nanoid::nanoid;
use serde::Deserialize;
use serde::Serialize;

/// Principal recorded for submitters that do not identify themselves
pub const ANONYMOUS_PRINCIPAL: &str = "anonymous";

/// Characters of the proof token kept as a human readable id prefix
const ID_PREFIX_LEN: usize = 8;

/// Submission fields that passed validation, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub message: String,
    pub proof_token: String,
    pub principal: String,
    pub color: String,
}

/// An accepted note.
///
/// Field names on the wire follow the board's public contract:
/// `proof_token` is `signature`, `principal` is `walletAddress` and
/// `created_at` is `timestamp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    id: String,
    message: String,
    #[serde(rename = "signature")]
    proof_token: String,
    #[serde(rename = "walletAddress")]
    principal: String,
    color: String,
    #[serde(rename = "timestamp")]
    created_at: DateTime<Utc>,
}

impl Note {
    /// Stamps a draft with an id and acceptance time.
    pub(crate) fn accept(draft: NoteDraft) -> Self {
        let prefix: String = draft.proof_token.chars().take(ID_PREFIX_LEN).collect();
        Self {
            id: format!("{}-{}", prefix, nanoid!()),
            message: draft.message,
            proof_token: draft.proof_token,
            principal: draft.principal,
            color: draft.color,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn proof_token(&self) -> &str {
        &self.proof_token
    }

    pub fn principal(&self) -> &str {
        &self.principal
    }

    pub fn is_anonymous(&self) -> bool {
        self.principal == ANONYMOUS_PRINCIPAL
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
