use std::sync::Arc;

use tracing::debug;
use tracing::info;

use super::BoardContext;
use crate::metrics::NOTES_ACCEPTED;
use crate::metrics::NOTES_REJECTED;
use crate::Note;
use crate::RawSubmission;
use crate::RejectReason;

/// Submit and list operations.
#[derive(Clone)]
pub struct IngressApi {
    ctx: Arc<BoardContext>,
}

impl IngressApi {
    pub fn new(ctx: Arc<BoardContext>) -> Self {
        Self { ctx }
    }

    /// Validates `raw`, stores it and fans it out to live subscribers.
    ///
    /// A rejected submission has no effect at all. Delivery problems with
    /// individual subscribers never change the result.
    pub fn submit(
        &self,
        raw: &RawSubmission,
    ) -> Result<Note, RejectReason> {
        let draft = self.ctx.validator.validate(raw).map_err(|reason| {
            NOTES_REJECTED.with_label_values(&[reason.as_label()]).inc();
            debug!("submission rejected: {}", reason);
            reason
        })?;

        let (note, report) = self.ctx.sequenced(|| {
            let note = self.ctx.store.append(draft);
            let report = self.ctx.broadcaster.broadcast(&note);
            (note, report)
        });

        NOTES_ACCEPTED.inc();
        info!(
            "note {} accepted: delivered={}, dropped={}",
            note.id(),
            report.delivered,
            report.dropped
        );
        Ok(note)
    }

    /// All stored notes, oldest first.
    pub fn list_all(&self) -> Vec<Note> {
        self.ctx.store.snapshot()
    }
}
