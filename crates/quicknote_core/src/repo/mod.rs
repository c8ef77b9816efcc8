//! Repository layer over the local key/value storage surface.
//!
//! # Responsibility
//! - Define the `LocalStorage` contract and its SQLite/in-memory backends.
//! - Map the `notes` and `isLoggedIn` keys to typed repositories.
//!
//! # Invariants
//! - The note collection is always written in full as one JSON value.
//! - Malformed stored data is reported, never silently patched.

pub mod note_repo;
pub mod session_repo;
pub mod storage_repo;
