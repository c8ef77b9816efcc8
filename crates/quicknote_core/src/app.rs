//! Application shell: routes the three screens over one storage.
//!
//! # Responsibility
//! - Create the session context and navigator at start.
//! - Mount the Notes screen whenever the Notes route becomes active.
//! - Route screen actions (login, signup, logout) to the right transitions.
//!
//! # Invariants
//! - Screen actions are only accepted on their own screen.
//! - Notes screen state exists only while `/notes` is the current route.
//! - Logout never touches the note collection.

use crate::model::route::{Route, RouteGuardPolicy};
use crate::model::session::{LoginForm, SessionState, SignupForm, SignupOutcome};
use crate::repo::note_repo::StorageNoteRepository;
use crate::repo::session_repo::StorageSessionRepository;
use crate::repo::storage_repo::LocalStorage;
use crate::service::navigation_service::{Navigation, NavigationError, Navigator};
use crate::service::note_service::NoteService;
use crate::service::session_service::{SessionError, SessionService};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Notes screen type mounted by the shell.
pub type NotesScreen<S> = NoteService<StorageNoteRepository<S>>;

#[derive(Debug)]
pub enum AppError {
    Session(SessionError),
    Navigation(NavigationError),
    /// Action submitted from a screen that does not offer it.
    ScreenMismatch { expected: Route, current: Route },
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Session(err) => write!(f, "{err}"),
            Self::Navigation(err) => write!(f, "{err}"),
            Self::ScreenMismatch { expected, current } => write!(
                f,
                "action belongs to screen `{expected}` but current screen is `{current}`"
            ),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Session(err) => Some(err),
            Self::Navigation(err) => Some(err),
            Self::ScreenMismatch { .. } => None,
        }
    }
}

impl From<SessionError> for AppError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

impl From<NavigationError> for AppError {
    fn from(value: NavigationError) -> Self {
        Self::Navigation(value)
    }
}

/// Running app over a shared `LocalStorage` handle.
pub struct AppShell<S: LocalStorage + Clone> {
    storage: S,
    session: SessionService<StorageSessionRepository<S>>,
    navigator: Navigator,
    notes: Option<NotesScreen<S>>,
}

impl<S: LocalStorage + Clone> AppShell<S> {
    /// Starts on `/` with the session restored from storage.
    pub fn start(storage: S, policy: RouteGuardPolicy) -> Result<Self, AppError> {
        let session = SessionService::start(StorageSessionRepository::new(storage.clone()))?;
        Ok(Self {
            storage,
            session,
            navigator: Navigator::new(policy),
            notes: None,
        })
    }

    pub fn current_route(&self) -> Route {
        self.navigator.current()
    }

    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    pub fn guard_policy(&self) -> RouteGuardPolicy {
        self.navigator.policy()
    }

    /// Notes screen, while `/notes` is active.
    pub fn notes(&self) -> Option<&NotesScreen<S>> {
        self.notes.as_ref()
    }

    pub fn notes_mut(&mut self) -> Option<&mut NotesScreen<S>> {
        self.notes.as_mut()
    }

    /// Direct navigation to `path`, as when typing a URL or following a link.
    pub fn open(&mut self, path: &str) -> Result<Navigation, AppError> {
        let navigation = self
            .navigator
            .open_path(path, self.session.state())?;
        self.sync_screens();
        Ok(navigation)
    }

    /// Login screen submit. Lands on the Notes screen.
    pub fn submit_login(&mut self, form: &LoginForm) -> Result<Navigation, AppError> {
        self.expect_screen(Route::Login)?;
        let next = self.session.login(form)?;
        Ok(self.go_to(next))
    }

    /// Signup screen submit. Lands back on the Login screen.
    pub fn submit_signup(&mut self, form: &SignupForm) -> Result<SignupOutcome, AppError> {
        self.expect_screen(Route::Signup)?;
        let outcome = self.session.signup(form)?;
        self.go_to(outcome.next);
        Ok(outcome)
    }

    /// Notes screen logout. Lands on the Login screen.
    pub fn logout(&mut self) -> Result<Navigation, AppError> {
        self.expect_screen(Route::Notes)?;
        let next = self.session.logout()?;
        Ok(self.go_to(next))
    }

    fn go_to(&mut self, route: Route) -> Navigation {
        let navigation = self.navigator.navigate(route, self.session.state());
        self.sync_screens();
        navigation
    }

    fn sync_screens(&mut self) {
        match (self.navigator.current(), self.notes.is_some()) {
            (Route::Notes, false) => {
                self.notes = Some(NoteService::mount(StorageNoteRepository::new(
                    self.storage.clone(),
                )));
            }
            (Route::Notes, true) => {}
            (_, _) => self.notes = None,
        }
    }

    fn expect_screen(&self, expected: Route) -> Result<(), AppError> {
        let current = self.navigator.current();
        if current != expected {
            return Err(AppError::ScreenMismatch { expected, current });
        }
        Ok(())
    }
}
