//! Screen-level use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into screen actions.
//! - Keep UI/FFI/CLI layers decoupled from storage details.

pub mod navigation_service;
pub mod note_ids;
pub mod note_service;
pub mod session_service;
