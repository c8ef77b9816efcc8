//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose one synchronous function per screen action.
//! - Keep error semantics simple: envelopes with `ok` and a message.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call reopens storage, so state lives only in the storage file.

use log::warn;
use quicknote_core::{
    core_version as core_version_inner, display_order, init_logging as init_logging_inner,
    load_config, ping as ping_inner, AppConfig, AppError, AppShell, ImageFile, LoginForm,
    Note, NoteServiceError, NotesScreen, Route, SignupForm, SqliteLocalStorage,
};
use std::sync::OnceLock;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Screen transition envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenResponse {
    pub ok: bool,
    /// Path of the screen to show after the call.
    pub route: String,
    /// Human-readable message (confirmation or failure reason).
    pub message: String,
}

impl ScreenResponse {
    fn success(route: Route, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            route: route.path().to_string(),
            message: message.into(),
        }
    }

    fn failure(route: Route, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            route: route.path().to_string(),
            message: message.into(),
        }
    }
}

/// Image picked on the host side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// One note as shown in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub pinned: bool,
    pub image_media_type: Option<String>,
    pub image_bytes: Option<Vec<u8>>,
}

/// Note list envelope, items in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesResponse {
    pub ok: bool,
    pub items: Vec<NoteItem>,
    pub message: String,
}

/// Note mutation envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    pub ok: bool,
    pub note_id: Option<i64>,
    pub message: String,
}

impl NoteActionResponse {
    fn success(message: impl Into<String>, note_id: i64) -> Self {
        Self {
            ok: true,
            note_id: Some(note_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            message: message.into(),
        }
    }
}

/// Login screen submit.
#[flutter_rust_bridge::frb(sync)]
pub fn session_login(email: String, password: String) -> ScreenResponse {
    let result = with_app(|app| app.submit_login(&LoginForm::new(email, password)));
    match result {
        Ok(navigation) => ScreenResponse::success(navigation.landed, "Logged in."),
        Err(err) => ScreenResponse::failure(Route::Login, format!("session_login failed: {err}")),
    }
}

/// Signup screen submit. Nothing is stored.
#[flutter_rust_bridge::frb(sync)]
pub fn session_signup(
    name: String,
    email: String,
    password: String,
    profession: String,
) -> ScreenResponse {
    let form = SignupForm {
        name,
        email,
        password,
        profession,
    };
    let result = with_app(|app| {
        app.open(Route::Signup.path())?;
        app.submit_signup(&form)
    });
    match result {
        Ok(outcome) => ScreenResponse::success(outcome.next, outcome.message),
        Err(err) => {
            ScreenResponse::failure(Route::Signup, format!("session_signup failed: {err}"))
        }
    }
}

/// Notes screen logout.
#[flutter_rust_bridge::frb(sync)]
pub fn session_logout() -> ScreenResponse {
    let result = with_app(|app| {
        app.open(Route::Notes.path())?;
        app.logout()
    });
    match result {
        Ok(navigation) => ScreenResponse::success(navigation.landed, "Logged out."),
        Err(err) => ScreenResponse::failure(Route::Login, format!("session_logout failed: {err}")),
    }
}

/// Whether the persisted session flag is set.
#[flutter_rust_bridge::frb(sync)]
pub fn session_is_logged_in() -> bool {
    with_app(|app| Ok(app.session_state().is_logged_in())).unwrap_or(false)
}

/// Direct navigation to `path`, honoring the configured route guard.
#[flutter_rust_bridge::frb(sync)]
pub fn route_open(path: String) -> ScreenResponse {
    match with_app(|app| app.open(&path)) {
        Ok(navigation) if navigation.redirected() => {
            ScreenResponse::success(navigation.landed, "Login required.")
        }
        Ok(navigation) => ScreenResponse::success(navigation.landed, String::new()),
        Err(err) => ScreenResponse::failure(Route::Login, format!("route_open failed: {err}")),
    }
}

/// Lists notes pinned-first.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list() -> NotesResponse {
    match with_notes_screen(|screen| {
        let items = display_order(screen.notes())
            .into_iter()
            .map(to_note_item)
            .collect::<Vec<_>>();
        let message = match screen.load_error() {
            Some(load_error) => format!("Stored notes could not be read: {load_error}"),
            None => String::new(),
        };
        Ok(NotesResponse {
            ok: screen.load_error().is_none(),
            items,
            message,
        })
    }) {
        Ok(response) => response,
        Err(err) => NotesResponse {
            ok: false,
            items: Vec::new(),
            message: format!("notes_list failed: {err}"),
        },
    }
}

/// Adds a note. An invalid image is dropped with a warning; the note is
/// still added.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_add(title: String, content: String, image: Option<ImageUpload>) -> NoteActionResponse {
    let result = with_notes_screen(|screen| {
        screen.set_draft_title(title);
        screen.set_draft_content(content);
        let mut message = "Note added.".to_string();
        if let Some(upload) = image {
            let file = ImageFile::new(upload.file_name, upload.media_type, upload.bytes);
            if let Err(err) = screen.attach_image(Some(file)) {
                warn!("event=ffi_notes_add module=ffi status=degraded reason=invalid_image");
                let warning = screen.take_warning().unwrap_or_default();
                message = format!("Note added without image. {warning} ({err})");
            }
        }
        let note_id = screen.add_note()?;
        Ok((note_id, message))
    });
    match result {
        Ok((note_id, message)) => NoteActionResponse::success(message, note_id),
        Err(err) => NoteActionResponse::failure(format!("notes_add failed: {err}")),
    }
}

/// Pins or unpins a note.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_toggle_pin(note_id: i64) -> NoteActionResponse {
    match with_notes_screen(|screen| screen.toggle_pin(note_id)) {
        Ok(true) => NoteActionResponse::success("Pin toggled.", note_id),
        Ok(false) => NoteActionResponse::failure(format!("note not found: {note_id}")),
        Err(err) => NoteActionResponse::failure(format!("notes_toggle_pin failed: {err}")),
    }
}

/// Deletes a note.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_delete(note_id: i64) -> NoteActionResponse {
    match with_notes_screen(|screen| screen.delete_note(note_id)) {
        Ok(true) => NoteActionResponse::success("Note deleted.", note_id),
        Ok(false) => NoteActionResponse::failure(format!("note not found: {note_id}")),
        Err(err) => NoteActionResponse::failure(format!("notes_delete failed: {err}")),
    }
}

fn resolve_app_config() -> &'static AppConfig {
    APP_CONFIG.get_or_init(|| {
        load_config(None).unwrap_or_else(|err| {
            warn!("event=ffi_config module=ffi status=error fallback=defaults error={err}");
            AppConfig::default()
        })
    })
}

fn open_app() -> Result<AppShell<SqliteLocalStorage>, String> {
    let config = resolve_app_config();
    let storage = SqliteLocalStorage::open(&config.storage_path)
        .map_err(|err| format!("storage open failed: {err}"))?;
    AppShell::start(storage, config.route_guard).map_err(|err| format!("app start failed: {err}"))
}

fn with_app<T>(
    f: impl FnOnce(&mut AppShell<SqliteLocalStorage>) -> Result<T, AppError>,
) -> Result<T, String> {
    let mut app = open_app()?;
    f(&mut app).map_err(|err| err.to_string())
}

fn with_notes_screen<T>(
    f: impl FnOnce(&mut NotesScreen<SqliteLocalStorage>) -> Result<T, NoteServiceError>,
) -> Result<T, String> {
    let mut app = open_app()?;
    let navigation = app
        .open(Route::Notes.path())
        .map_err(|err| err.to_string())?;
    if navigation.redirected() {
        return Err("login required".to_string());
    }
    let screen = app
        .notes_mut()
        .ok_or_else(|| "notes screen not mounted".to_string())?;
    f(screen).map_err(|err| err.to_string())
}

fn to_note_item(note: &Note) -> NoteItem {
    NoteItem {
        id: note.id,
        title: note.title.clone(),
        content: note.content.clone(),
        pinned: note.pinned,
        image_media_type: note.image.as_ref().map(|image| image.media_type.clone()),
        image_bytes: note.image.as_ref().map(|image| image.bytes.clone()),
    }
}
