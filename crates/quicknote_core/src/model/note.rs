//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted note record and its JSON layout.
//! - Define the draft form state used while composing a note.
//! - Gate image attachments by declared media type.
//!
//! # Invariants
//! - `id` is unique within one collection.
//! - `image`, when present, always has an `image/*` media type.
//! - A malformed `image` value in stored data loads as no image.

use serde::{Deserialize, Deserializer, Serialize};

/// Stable identifier of a note: creation time in epoch milliseconds,
/// bumped forward when needed to stay unique.
pub type NoteId = i64;

const IMAGE_MEDIA_TYPE_PREFIX: &str = "image/";

/// Persisted note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub pinned: bool,
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_image",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<NoteImage>,
}

impl Note {
    /// Builds a note from a finished draft.
    pub fn from_draft(id: NoteId, draft: NoteDraft) -> Self {
        Self {
            id,
            title: draft.title,
            content: draft.content,
            pinned: draft.pinned,
            image: draft.image,
        }
    }

    /// Flips the pinned flag.
    pub fn toggle_pinned(&mut self) {
        self.pinned = !self.pinned;
    }
}

/// Image attached to a note. Bytes are stored base64-encoded so the image
/// survives a reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteImage {
    pub file_name: String,
    pub media_type: String,
    #[serde(with = "crate::serde_ext::base64_bytes")]
    pub bytes: Vec<u8>,
}

/// Candidate upload picked by the user, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    /// Declared media type; empty when the host could not tell.
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Whether the declared media type is `image/*`.
    pub fn is_valid_image(&self) -> bool {
        is_image_media_type(&self.media_type)
    }

    /// Converts into an attachment, handing the file back when it is not an
    /// image.
    pub fn into_note_image(self) -> Result<NoteImage, ImageFile> {
        if !self.is_valid_image() {
            return Err(self);
        }
        Ok(NoteImage {
            file_name: self.file_name,
            media_type: self.media_type,
            bytes: self.bytes,
        })
    }
}

/// Transient form state for the note being composed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub pinned: bool,
    pub image: Option<NoteImage>,
}

impl NoteDraft {
    /// Resets every field back to an empty draft.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Returns whether `media_type` declares an image.
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type.starts_with(IMAGE_MEDIA_TYPE_PREFIX)
}

// Older blobs carry `null` or `{}` (an unserializable file handle) here.
fn deserialize_lenient_image<'de, D>(deserializer: D) -> Result<Option<NoteImage>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|value| serde_json::from_value::<NoteImage>(value).ok())
        .filter(|image| is_image_media_type(&image.media_type)))
}
