//! Note collection repository.
//!
//! # Responsibility
//! - Read and write the whole note collection under the `notes` key.
//!
//! # Invariants
//! - `save_notes` always writes the complete collection; there are no
//!   partial writes.
//! - An absent key means "no collection yet", distinct from an empty one.

use crate::model::note::Note;
use crate::repo::storage_repo::{LocalStorage, RepoError, RepoResult};

/// Storage key holding the JSON array of notes.
pub const NOTES_KEY: &str = "notes";

/// Repository interface for the persisted note collection.
pub trait NoteRepository {
    /// Loads the stored collection; `None` when nothing was stored yet.
    fn load_notes(&self) -> RepoResult<Option<Vec<Note>>>;
    /// Replaces the stored collection with `notes`.
    fn save_notes(&self, notes: &[Note]) -> RepoResult<()>;
}

/// Note repository over any `LocalStorage` backend.
#[derive(Debug, Clone)]
pub struct StorageNoteRepository<S: LocalStorage> {
    storage: S,
}

impl<S: LocalStorage> StorageNoteRepository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

impl<S: LocalStorage> NoteRepository for StorageNoteRepository<S> {
    fn load_notes(&self) -> RepoResult<Option<Vec<Note>>> {
        let Some(raw) = self.storage.get_item(NOTES_KEY)? else {
            return Ok(None);
        };
        serde_json::from_str::<Vec<Note>>(&raw)
            .map(Some)
            .map_err(|source| RepoError::Deserialize {
                key: NOTES_KEY,
                source,
            })
    }

    fn save_notes(&self, notes: &[Note]) -> RepoResult<()> {
        let encoded = serde_json::to_string(notes).map_err(RepoError::Serialize)?;
        self.storage.set_item(NOTES_KEY, &encoded)
    }
}
