//! Core of QuickNote: a local-first notes demo behind a stub session gate.
//! This crate owns every business rule; UI, FFI and CLI layers only call it.

pub mod app;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod serde_ext;
pub mod service;

pub use app::{AppError, AppShell, NotesScreen};
pub use config::{load_config, AppConfig, ConfigError, CONFIG_ENV_PREFIX};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LogLevel,
};
pub use model::note::{ImageFile, Note, NoteDraft, NoteId, NoteImage};
pub use model::route::{Route, RouteGuardPolicy};
pub use model::session::{FormError, LoginForm, SessionState, SignupForm, SignupOutcome};
pub use repo::note_repo::{NoteRepository, StorageNoteRepository, NOTES_KEY};
pub use repo::session_repo::{SessionRepository, StorageSessionRepository, IS_LOGGED_IN_KEY};
pub use repo::storage_repo::{
    LocalStorage, MemoryLocalStorage, RepoError, RepoResult, SqliteLocalStorage,
};
pub use service::navigation_service::{Navigation, NavigationError, Navigator};
pub use service::note_ids::{MonotonicNoteIds, NoteIdGenerator};
pub use service::note_service::{
    display_order, NoteService, NoteServiceError, INVALID_IMAGE_WARNING,
};
pub use service::session_service::{SessionError, SessionService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
