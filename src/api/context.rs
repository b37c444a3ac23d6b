use std::sync::Arc;

use parking_lot::Mutex;

use crate::BoardConfig;
use crate::Broadcaster;
use crate::NoteStore;
use crate::SubscriptionRegistry;
use crate::Validator;

/// Shared state of one board: the note store, the live set and the
/// components that act on them.
///
/// Append+broadcast and subscriber attachment both run under `sequencer`, so
/// each subscriber sees every note exactly once: either inside its initial
/// snapshot or as a later incremental message.
pub struct BoardContext {
    pub(crate) store: Arc<NoteStore>,
    pub(crate) registry: Arc<SubscriptionRegistry>,
    pub(crate) broadcaster: Broadcaster,
    pub(crate) validator: Validator,
    sequencer: Mutex<()>,
}

impl BoardContext {
    pub fn new(config: &BoardConfig) -> Self {
        let store = Arc::new(NoteStore::new(config.store.max_notes));
        let registry = Arc::new(SubscriptionRegistry::new(config.feed.outbox_capacity));
        Self {
            broadcaster: Broadcaster::new(registry.clone()),
            validator: Validator::new(config.validation.clone()),
            store,
            registry,
            sequencer: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<NoteStore> {
        &self.store
    }

    pub fn registry(&self) -> &Arc<SubscriptionRegistry> {
        &self.registry
    }

    /// Runs `f` while holding the sequencing guard. `f` must not block.
    pub(crate) fn sequenced<R>(
        &self,
        f: impl FnOnce() -> R,
    ) -> R {
        let _guard = self.sequencer.lock();
        f()
    }
}
