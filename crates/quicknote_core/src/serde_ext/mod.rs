//! Serde field adapters shared by persisted models.

pub mod base64_bytes;
