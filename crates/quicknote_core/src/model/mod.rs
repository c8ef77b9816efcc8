//! Domain model for the notes demo.
//!
//! # Responsibility
//! - Define the persisted note record and the transient draft form.
//! - Define session state, sign-in forms and the route table.
//!
//! # Invariants
//! - Every persisted note is identified by a unique `NoteId`.
//! - The session carries no identity; it is a logged-in flag only.

pub mod note;
pub mod route;
pub mod session;
