//! Notes screen service.
//!
//! # Responsibility
//! - Own the in-memory note collection and the draft form.
//! - Persist the full collection after every mutation.
//! - Provide the pinned-first display order.
//!
//! # Invariants
//! - The in-memory collection only changes after its persisted copy was
//!   written successfully.
//! - Display order is a stable sort: pinned first, otherwise stored order.
//! - Unknown ids leave the collection and storage untouched.

use crate::model::note::{ImageFile, Note, NoteDraft, NoteId};
use crate::repo::note_repo::NoteRepository;
use crate::repo::storage_repo::RepoError;
use crate::service::note_ids::{MonotonicNoteIds, NoteIdGenerator};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Warning shown when a selected file is not an image.
pub const INVALID_IMAGE_WARNING: &str = "Please select a valid image file";

/// Service error for note screen actions.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Selected file is missing or not an `image/*` file.
    InvalidImage { media_type: Option<String> },
    /// Every id above the highest stored one is taken.
    IdsExhausted,
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidImage {
                media_type: Some(media_type),
            } => write!(f, "not an image file: `{media_type}`"),
            Self::InvalidImage { media_type: None } => write!(f, "no file selected"),
            Self::IdsExhausted => write!(f, "no note id left above the highest stored id"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::InvalidImage { .. } | Self::IdsExhausted => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// State and actions of the Notes screen.
pub struct NoteService<R: NoteRepository, G: NoteIdGenerator = MonotonicNoteIds> {
    repo: R,
    ids: G,
    notes: Vec<Note>,
    draft: NoteDraft,
    load_error: Option<String>,
    warning: Option<&'static str>,
}

impl<R: NoteRepository> NoteService<R> {
    /// Mounts the screen with clock-based ids.
    pub fn mount(repo: R) -> Self {
        Self::mount_with_ids(repo, MonotonicNoteIds::new())
    }
}

impl<R: NoteRepository, G: NoteIdGenerator> NoteService<R, G> {
    /// Mounts the screen: loads the stored collection once.
    ///
    /// A missing collection starts empty. A malformed one also starts empty,
    /// with the parse failure kept in `load_error` and logged.
    pub fn mount_with_ids(repo: R, mut ids: G) -> Self {
        let (notes, load_error) = match repo.load_notes() {
            Ok(Some(notes)) => {
                info!(
                    "event=notes_load module=note_service status=ok count={}",
                    notes.len()
                );
                (notes, None)
            }
            Ok(None) => {
                info!("event=notes_load module=note_service status=ok count=0 stored=false");
                (Vec::new(), None)
            }
            Err(err) => {
                error!(
                    "event=notes_load module=note_service status=error error_code=notes_load_failed error={}",
                    err
                );
                (Vec::new(), Some(err.to_string()))
            }
        };

        for note in &notes {
            ids.observe(note.id);
        }

        Self {
            repo,
            ids,
            notes,
            draft: NoteDraft::default(),
            load_error,
            warning: None,
        }
    }

    /// Notes in stored (insertion) order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Notes in display order.
    pub fn display_notes(&self) -> Vec<&Note> {
        display_order(&self.notes)
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn draft(&self) -> &NoteDraft {
        &self.draft
    }

    /// Parse failure from mount, if the stored collection was unreadable.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Last user-facing warning, if any.
    pub fn warning(&self) -> Option<&'static str> {
        self.warning
    }

    /// Returns and clears the pending warning.
    pub fn take_warning(&mut self) -> Option<&'static str> {
        self.warning.take()
    }

    pub fn set_draft_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_draft_content(&mut self, content: impl Into<String>) {
        self.draft.content = content.into();
    }

    /// Attaches the selected file to the draft.
    ///
    /// A missing or non-image file clears the draft image, raises
    /// `INVALID_IMAGE_WARNING` and returns `InvalidImage`. Other draft fields
    /// are kept.
    pub fn attach_image(&mut self, file: Option<ImageFile>) -> Result<(), NoteServiceError> {
        let rejected_type = match file.map(ImageFile::into_note_image) {
            Some(Ok(image)) => {
                self.draft.image = Some(image);
                self.warning = None;
                return Ok(());
            }
            Some(Err(file)) => Some(file.media_type),
            None => None,
        };

        self.draft.image = None;
        self.warning = Some(INVALID_IMAGE_WARNING);
        warn!(
            "event=note_image_rejected module=note_service status=error media_type={}",
            rejected_type.as_deref().unwrap_or("none")
        );
        Err(NoteServiceError::InvalidImage {
            media_type: rejected_type,
        })
    }

    /// Appends the draft as a new note, persists, then clears the draft.
    pub fn add_note(&mut self) -> Result<NoteId, NoteServiceError> {
        let Some(id) = self.ids.next_id() else {
            error!("event=note_add module=note_service status=error reason=ids_exhausted");
            return Err(NoteServiceError::IdsExhausted);
        };
        let mut next = self.notes.clone();
        next.push(Note::from_draft(id, self.draft.clone()));
        self.commit(next, "note_add")?;
        self.draft.clear();
        Ok(id)
    }

    /// Flips `pinned` on the matching note. Returns `false` when no note
    /// has `id`.
    pub fn toggle_pin(&mut self, id: NoteId) -> Result<bool, NoteServiceError> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };
        let mut next = self.notes.clone();
        next[index].toggle_pinned();
        self.commit(next, "note_pin")?;
        Ok(true)
    }

    /// Removes the matching note. Returns `false` when no note has `id`.
    pub fn delete_note(&mut self, id: NoteId) -> Result<bool, NoteServiceError> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };
        let mut next = self.notes.clone();
        next.remove(index);
        self.commit(next, "note_delete")?;
        Ok(true)
    }

    fn position(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }

    fn commit(&mut self, next: Vec<Note>, event: &str) -> Result<(), NoteServiceError> {
        if let Err(err) = self.repo.save_notes(&next) {
            error!(
                "event={} module=note_service status=error error_code=notes_save_failed error={}",
                event, err
            );
            return Err(err.into());
        }
        info!(
            "event={} module=note_service status=ok count={}",
            event,
            next.len()
        );
        self.notes = next;
        Ok(())
    }
}

/// Orders notes for display: pinned first, stored order within each group.
pub fn display_order(notes: &[Note]) -> Vec<&Note> {
    let mut ordered: Vec<&Note> = notes.iter().collect();
    ordered.sort_by_key(|note| !note.pinned);
    ordered
}
