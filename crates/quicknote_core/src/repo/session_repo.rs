//! Session flag repository.
//!
//! # Invariants
//! - The flag is "set" when the `isLoggedIn` key holds a non-empty value.
//! - Clearing removes the key instead of writing a false value.

use crate::repo::storage_repo::{LocalStorage, RepoResult};

/// Storage key of the logged-in flag.
pub const IS_LOGGED_IN_KEY: &str = "isLoggedIn";

const LOGGED_IN_VALUE: &str = "true";

/// Repository interface for the persisted session flag.
pub trait SessionRepository {
    fn is_logged_in(&self) -> RepoResult<bool>;
    fn set_logged_in(&self) -> RepoResult<()>;
    fn clear_logged_in(&self) -> RepoResult<()>;
}

/// Session repository over any `LocalStorage` backend.
#[derive(Debug, Clone)]
pub struct StorageSessionRepository<S: LocalStorage> {
    storage: S,
}

impl<S: LocalStorage> StorageSessionRepository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

impl<S: LocalStorage> SessionRepository for StorageSessionRepository<S> {
    fn is_logged_in(&self) -> RepoResult<bool> {
        Ok(self
            .storage
            .get_item(IS_LOGGED_IN_KEY)?
            .is_some_and(|value| !value.is_empty()))
    }

    fn set_logged_in(&self) -> RepoResult<()> {
        self.storage.set_item(IS_LOGGED_IN_KEY, LOGGED_IN_VALUE)
    }

    fn clear_logged_in(&self) -> RepoResult<()> {
        self.storage.remove_item(IS_LOGGED_IN_KEY)
    }
}
