use std::collections::VecDeque;

use parking_lot::RwLock;
use tracing::trace;

use super::Note;
use super::NoteDraft;
use crate::metrics::NOTES_EVICTED;

/// Fixed-capacity FIFO of accepted notes, oldest first.
///
/// Eviction and insertion happen under one write guard, so readers never
/// observe more than `capacity` notes or a half-applied append.
pub struct NoteStore {
    notes: RwLock<VecDeque<Note>>,
    capacity: usize,
}

impl NoteStore {
    /// `capacity` is clamped to at least one note.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            notes: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Stamps `draft` with an id and timestamp and stores it at the tail,
    /// evicting the oldest note first when the store is full.
    pub fn append(
        &self,
        draft: NoteDraft,
    ) -> Note {
        let note = Note::accept(draft);

        let mut notes = self.notes.write();
        if notes.len() >= self.capacity {
            if let Some(evicted) = notes.pop_front() {
                trace!("evicted note {} to make room", evicted.id());
                NOTES_EVICTED.inc();
            }
        }
        notes.push_back(note.clone());

        note
    }

    /// Point-in-time copy of the stored notes, oldest first.
    pub fn snapshot(&self) -> Vec<Note> {
        self.notes.read().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.notes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
