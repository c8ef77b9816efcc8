//! Route table for the three screens.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One screen of the app, addressed by a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`
    Login,
    /// `/signup`
    Signup,
    /// `/notes`
    Notes,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Login, Route::Signup, Route::Notes];

    /// Path this route is mounted at.
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Signup => "/signup",
            Self::Notes => "/notes",
        }
    }

    /// Resolves a path to a route. A single trailing slash is tolerated.
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let normalized = match trimmed.strip_suffix('/') {
            Some(rest) if !rest.is_empty() => rest,
            _ => trimmed,
        };
        Self::ALL
            .into_iter()
            .find(|route| route.path() == normalized)
    }

    /// Whether reaching this route is subject to the session guard.
    pub fn requires_session(self) -> bool {
        matches!(self, Self::Notes)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Whether `/notes` checks the session before rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteGuardPolicy {
    /// Any route opens regardless of session state.
    #[default]
    Unguarded,
    /// Guarded routes redirect to `/` while logged out.
    Guarded,
}
