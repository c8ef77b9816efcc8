use quicknote_core::{
    ImageFile, LocalStorage, MemoryLocalStorage, Note, NoteDraft, NoteIdGenerator,
    NoteRepository, NoteService, NoteServiceError, RepoError, RepoResult,
    StorageNoteRepository, INVALID_IMAGE_WARNING, NOTES_KEY,
};
use std::cell::Cell;

#[derive(Default)]
struct CountingIds {
    next: i64,
}

impl NoteIdGenerator for CountingIds {
    fn next_id(&mut self) -> Option<i64> {
        self.next = self.next.checked_add(1)?;
        Some(self.next)
    }

    fn observe(&mut self, id: i64) {
        self.next = self.next.max(id);
    }
}

fn mount(storage: &MemoryLocalStorage) -> NoteService<StorageNoteRepository<MemoryLocalStorage>, CountingIds> {
    NoteService::mount_with_ids(
        StorageNoteRepository::new(storage.clone()),
        CountingIds::default(),
    )
}

fn stored_notes(storage: &MemoryLocalStorage) -> Vec<Note> {
    StorageNoteRepository::new(storage)
        .load_notes()
        .unwrap()
        .unwrap_or_default()
}

fn add(screen: &mut NoteService<StorageNoteRepository<MemoryLocalStorage>, CountingIds>, title: &str) -> i64 {
    screen.set_draft_title(title);
    screen.set_draft_content(format!("{title} content"));
    screen.add_note().unwrap()
}

#[test]
fn mount_without_stored_notes_starts_empty() {
    let storage = MemoryLocalStorage::new();
    let screen = mount(&storage);
    assert!(screen.notes().is_empty());
    assert!(screen.load_error().is_none());
    assert!(storage.get_item(NOTES_KEY).unwrap().is_none());
}

#[test]
fn add_note_appends_persists_and_clears_draft() {
    let storage = MemoryLocalStorage::new();
    let mut screen = mount(&storage);

    screen.set_draft_title("Groceries");
    screen.set_draft_content("milk, eggs");
    let id = screen.add_note().unwrap();

    assert_eq!(screen.notes().len(), 1);
    let note = screen.note(id).unwrap();
    assert_eq!(note.title, "Groceries");
    assert_eq!(note.content, "milk, eggs");
    assert!(!note.pinned);
    assert!(note.image.is_none());
    assert_eq!(screen.draft(), &NoteDraft::default());
    assert_eq!(stored_notes(&storage), screen.notes());
}

#[test]
fn add_note_allows_an_empty_draft() {
    let storage = MemoryLocalStorage::new();
    let mut screen = mount(&storage);
    let id = screen.add_note().unwrap();
    assert_eq!(screen.note(id).unwrap().title, "");
}

#[test]
fn rapid_adds_get_unique_ids() {
    let storage = MemoryLocalStorage::new();
    let mut screen = NoteService::mount(StorageNoteRepository::new(storage.clone()));
    let mut ids: Vec<i64> = (0..50)
        .map(|_| screen.add_note().unwrap())
        .collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 50);
}

#[test]
fn ids_continue_after_remount() {
    let storage = MemoryLocalStorage::new();
    let first_id = add(&mut mount(&storage), "first");

    let mut screen = mount(&storage);
    let second_id = add(&mut screen, "second");
    assert!(second_id > first_id);
    assert_eq!(screen.notes().len(), 2);
}

#[test]
fn toggle_pin_flips_only_the_target() {
    let storage = MemoryLocalStorage::new();
    let mut screen = mount(&storage);
    let a = add(&mut screen, "a");
    let b = add(&mut screen, "b");

    assert!(screen.toggle_pin(b).unwrap());
    assert!(screen.note(b).unwrap().pinned);
    assert!(!screen.note(a).unwrap().pinned);
    assert_eq!(stored_notes(&storage), screen.notes());

    assert!(screen.toggle_pin(b).unwrap());
    assert!(!screen.note(b).unwrap().pinned);
}

#[test]
fn toggle_pin_unknown_id_changes_nothing() {
    let storage = MemoryLocalStorage::new();
    let mut screen = mount(&storage);
    add(&mut screen, "a");
    let before = screen.notes().to_vec();

    assert!(!screen.toggle_pin(9_999).unwrap());
    assert_eq!(screen.notes(), before.as_slice());
    assert_eq!(stored_notes(&storage), before);
}

#[test]
fn delete_removes_one_and_keeps_relative_order() {
    let storage = MemoryLocalStorage::new();
    let mut screen = mount(&storage);
    let a = add(&mut screen, "a");
    let b = add(&mut screen, "b");
    let c = add(&mut screen, "c");

    assert!(screen.delete_note(b).unwrap());
    let ids: Vec<i64> = screen.notes().iter().map(|note| note.id).collect();
    assert_eq!(ids, vec![a, c]);
    assert_eq!(stored_notes(&storage), screen.notes());

    assert!(!screen.delete_note(b).unwrap());
    assert_eq!(screen.notes().len(), 2);
}

#[test]
fn display_places_pinned_first_without_reordering_storage() {
    let storage = MemoryLocalStorage::new();
    let mut screen = mount(&storage);
    let a = add(&mut screen, "A");
    let b = add(&mut screen, "B");
    let c = add(&mut screen, "C");
    screen.toggle_pin(b).unwrap();

    let shown: Vec<i64> = screen.display_notes().iter().map(|note| note.id).collect();
    assert_eq!(shown, vec![b, a, c]);

    let stored: Vec<i64> = stored_notes(&storage).iter().map(|note| note.id).collect();
    assert_eq!(stored, vec![a, b, c]);
}

#[test]
fn rejected_file_warns_and_does_not_block_add() {
    let storage = MemoryLocalStorage::new();
    let mut screen = mount(&storage);
    screen.set_draft_title("report");

    let err = screen
        .attach_image(Some(ImageFile::new("report.pdf", "application/pdf", vec![1, 2])))
        .unwrap_err();
    assert!(matches!(
        err,
        NoteServiceError::InvalidImage { media_type: Some(ref media_type) } if media_type == "application/pdf"
    ));
    assert!(screen.draft().image.is_none());
    assert_eq!(screen.draft().title, "report");
    assert_eq!(screen.take_warning(), Some(INVALID_IMAGE_WARNING));
    assert_eq!(screen.warning(), None);

    let id = screen.add_note().unwrap();
    assert!(screen.note(id).unwrap().image.is_none());
}

#[test]
fn selecting_nothing_clears_a_previous_image() {
    let storage = MemoryLocalStorage::new();
    let mut screen = mount(&storage);
    screen
        .attach_image(Some(ImageFile::new("cat.png", "image/png", vec![0x89])))
        .unwrap();
    assert!(screen.draft().image.is_some());

    let err = screen.attach_image(None).unwrap_err();
    assert!(matches!(err, NoteServiceError::InvalidImage { media_type: None }));
    assert!(screen.draft().image.is_none());
}

#[test]
fn attached_image_survives_reload() {
    let storage = MemoryLocalStorage::new();
    let mut screen = mount(&storage);
    screen.set_draft_title("cat");
    screen
        .attach_image(Some(ImageFile::new("cat.png", "image/png", vec![0x89, 0x50, 0x4e])))
        .unwrap();
    let id = screen.add_note().unwrap();

    let reloaded = mount(&storage);
    let image = reloaded.note(id).unwrap().image.clone().unwrap();
    assert_eq!(image.file_name, "cat.png");
    assert_eq!(image.media_type, "image/png");
    assert_eq!(image.bytes, vec![0x89, 0x50, 0x4e]);
}

#[test]
fn malformed_blob_mounts_empty_with_load_error() {
    let storage = MemoryLocalStorage::new();
    storage.set_item(NOTES_KEY, "[{\"id\": \"oops\"}]").unwrap();

    let screen = mount(&storage);
    assert!(screen.notes().is_empty());
    assert!(screen.load_error().unwrap().contains(NOTES_KEY));
}

#[test]
fn blob_written_by_browser_build_loads() {
    let storage = MemoryLocalStorage::new();
    storage
        .set_item(
            NOTES_KEY,
            r#"[{"title":"old","content":"kept","pinned":true,"image":{},"id":1712345678901}]"#,
        )
        .unwrap();

    let screen = mount(&storage);
    let note = screen.note(1_712_345_678_901).unwrap();
    assert_eq!(note.title, "old");
    assert!(note.pinned);
    assert!(note.image.is_none());
}

struct FailingSaves {
    saves: Cell<u32>,
}

impl NoteRepository for FailingSaves {
    fn load_notes(&self) -> RepoResult<Option<Vec<Note>>> {
        Ok(None)
    }

    fn save_notes(&self, _notes: &[Note]) -> RepoResult<()> {
        self.saves.set(self.saves.get() + 1);
        Err(RepoError::MissingRequiredTable("local_storage"))
    }
}

#[test]
fn failed_save_leaves_memory_and_draft_unchanged() {
    let mut screen = NoteService::mount_with_ids(
        FailingSaves {
            saves: Cell::new(0),
        },
        CountingIds::default(),
    );
    screen.set_draft_title("unsaved");

    let err = screen.add_note().unwrap_err();
    assert!(matches!(err, NoteServiceError::Repo(_)));
    assert!(screen.notes().is_empty());
    assert_eq!(screen.draft().title, "unsaved");
}

#[test]
fn add_fails_without_writing_when_max_id_is_stored() {
    let storage = MemoryLocalStorage::new();
    storage
        .set_item(
            NOTES_KEY,
            r#"[{"id":9223372036854775807,"title":"last","content":"","pinned":false}]"#,
        )
        .unwrap();
    let mut screen = NoteService::mount(StorageNoteRepository::new(storage.clone()));
    screen.set_draft_title("one too many");

    let err = screen.add_note().unwrap_err();
    assert!(matches!(err, NoteServiceError::IdsExhausted));
    assert_eq!(screen.notes().len(), 1);
    assert_eq!(screen.draft().title, "one too many");
    let stored: Vec<Note> =
        serde_json::from_str(&storage.get_item(NOTES_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(stored.len(), 1);
}
