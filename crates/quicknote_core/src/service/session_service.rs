//! Session gate service (login, signup, logout).
//!
//! # Responsibility
//! - Hold the app-wide session context, loaded once at start.
//! - Accept any non-empty credentials; never store or check them.
//!
//! # Invariants
//! - Only `login` and `logout` change the session state.
//! - The persisted flag is written before the in-memory state flips.
//! - `signup` persists nothing.

use crate::model::route::Route;
use crate::model::session::{
    FormError, LoginForm, SessionState, SignupForm, SignupOutcome, SIGNUP_SUCCESS_MESSAGE,
};
use crate::repo::session_repo::SessionRepository;
use crate::repo::storage_repo::RepoError;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum SessionError {
    Form(FormError),
    Repo(RepoError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Form(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Form(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<FormError> for SessionError {
    fn from(value: FormError) -> Self {
        Self::Form(value)
    }
}

impl From<RepoError> for SessionError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Explicit session context shared by the screens and the route guard.
pub struct SessionService<R: SessionRepository> {
    repo: R,
    state: SessionState,
}

impl<R: SessionRepository> SessionService<R> {
    /// Creates the context from the persisted flag, so a session outlives
    /// restarts until logout.
    pub fn start(repo: R) -> Result<Self, SessionError> {
        let state = if repo.is_logged_in()? {
            SessionState::LoggedIn
        } else {
            SessionState::LoggedOut
        };
        info!(
            "event=session_start module=session_service status=ok logged_in={}",
            state.is_logged_in()
        );
        Ok(Self { repo, state })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Logs in with any non-empty credentials and returns the next route.
    pub fn login(&mut self, form: &LoginForm) -> Result<Route, SessionError> {
        form.validate()?;
        self.repo.set_logged_in()?;
        self.state = SessionState::LoggedIn;
        info!("event=login module=session_service status=ok");
        Ok(Route::Notes)
    }

    /// Accepts a signup form without creating an account.
    pub fn signup(&self, form: &SignupForm) -> Result<SignupOutcome, SessionError> {
        form.validate()?;
        info!("event=signup module=session_service status=ok persisted=false");
        Ok(SignupOutcome {
            message: SIGNUP_SUCCESS_MESSAGE,
            next: Route::Login,
        })
    }

    /// Clears the session flag and returns the next route. Notes are kept.
    pub fn logout(&mut self) -> Result<Route, SessionError> {
        self.repo.clear_logged_in()?;
        self.state = SessionState::LoggedOut;
        info!("event=logout module=session_service status=ok");
        Ok(Route::Login)
    }
}
