//! Note id generation.
//!
//! # Invariants
//! - Ids are epoch milliseconds, strictly increasing per generator.
//! - After `observe`, no id at or below the observed one is issued.
//! - Once `NoteId::MAX` was issued or observed, no further id is issued.

use crate::model::note::NoteId;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of fresh note ids.
pub trait NoteIdGenerator {
    /// Returns an id not issued or observed before, or `None` when the id
    /// space is used up.
    fn next_id(&mut self) -> Option<NoteId>;
    /// Records an id that already exists in the collection.
    fn observe(&mut self, id: NoteId);
}

/// Millisecond clock ids, bumped forward when two notes land in the same
/// millisecond or the clock steps back.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicNoteIds {
    last: Option<NoteId>,
    clock: fn() -> i64,
}

impl MonotonicNoteIds {
    pub fn new() -> Self {
        Self::with_clock(epoch_millis)
    }

    pub fn with_clock(clock: fn() -> i64) -> Self {
        Self { last: None, clock }
    }
}

impl Default for MonotonicNoteIds {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteIdGenerator for MonotonicNoteIds {
    fn next_id(&mut self) -> Option<NoteId> {
        let now = (self.clock)();
        let id = match self.last {
            Some(last) if now <= last => last.checked_add(1)?,
            _ => now,
        };
        self.last = Some(id);
        Some(id)
    }

    fn observe(&mut self, id: NoteId) {
        if self.last.map_or(true, |last| id > last) {
            self.last = Some(id);
        }
    }
}

fn epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{MonotonicNoteIds, NoteIdGenerator};

    fn frozen_clock() -> i64 {
        1_700_000_000_000
    }

    #[test]
    fn same_millisecond_ids_stay_unique() {
        let mut ids = MonotonicNoteIds::with_clock(frozen_clock);
        let first = ids.next_id().unwrap();
        let second = ids.next_id().unwrap();
        let third = ids.next_id().unwrap();
        assert_eq!(first, 1_700_000_000_000);
        assert_eq!(second, first + 1);
        assert_eq!(third, first + 2);
    }

    #[test]
    fn observed_ids_are_never_reissued() {
        let mut ids = MonotonicNoteIds::with_clock(frozen_clock);
        ids.observe(1_800_000_000_000);
        ids.observe(5);
        assert_eq!(ids.next_id(), Some(1_800_000_000_001));
    }

    #[test]
    fn max_id_exhausts_the_generator() {
        let mut ids = MonotonicNoteIds::with_clock(frozen_clock);
        ids.observe(i64::MAX);
        assert_eq!(ids.next_id(), None);
        assert_eq!(ids.next_id(), None);
    }

    #[test]
    fn system_clock_ids_look_like_timestamps() {
        let mut ids = MonotonicNoteIds::new();
        assert!(ids.next_id().unwrap() > 1_600_000_000_000);
    }
}
