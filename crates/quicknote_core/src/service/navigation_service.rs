//! Route navigation with an optional session guard.
//!
//! # Invariants
//! - The initial route is `/`.
//! - With `RouteGuardPolicy::Guarded`, a logged-out session never lands on
//!   a route that requires a session; it is redirected to `/`.
//! - With `RouteGuardPolicy::Unguarded`, every known route opens as asked.

use crate::model::route::{Route, RouteGuardPolicy};
use crate::model::session::SessionState;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    UnknownPath(String),
}

impl Display for NavigationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownPath(path) => write!(f, "no route for path `{path}`"),
        }
    }
}

impl Error for NavigationError {}

/// Outcome of one navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub requested: Route,
    pub landed: Route,
}

impl Navigation {
    pub fn redirected(&self) -> bool {
        self.requested != self.landed
    }
}

/// Tracks the current route.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Route,
    policy: RouteGuardPolicy,
}

impl Navigator {
    pub fn new(policy: RouteGuardPolicy) -> Self {
        Self {
            current: Route::Login,
            policy,
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    pub fn policy(&self) -> RouteGuardPolicy {
        self.policy
    }

    /// Route a request for `target` would land on.
    pub fn resolve(&self, target: Route, session: SessionState) -> Route {
        match self.policy {
            RouteGuardPolicy::Guarded if target.requires_session() && !session.is_logged_in() => {
                Route::Login
            }
            _ => target,
        }
    }

    pub fn navigate(&mut self, target: Route, session: SessionState) -> Navigation {
        let landed = self.resolve(target, session);
        let navigation = Navigation {
            requested: target,
            landed,
        };
        if navigation.redirected() {
            warn!(
                "event=navigate module=navigation status=redirected from={} requested={} to={}",
                self.current, target, landed
            );
        } else {
            info!(
                "event=navigate module=navigation status=ok from={} to={}",
                self.current, landed
            );
        }
        self.current = landed;
        navigation
    }

    /// Navigates to the route mounted at `path`.
    pub fn open_path(
        &mut self,
        path: &str,
        session: SessionState,
    ) -> Result<Navigation, NavigationError> {
        let target =
            Route::from_path(path).ok_or_else(|| NavigationError::UnknownPath(path.to_string()))?;
        Ok(self.navigate(target, session))
    }
}
