//! Filesystem-backed preset persistence for tree documents.
//!
//! A preset is a named snapshot of the user's tree data plus its settings.
//! All presets live in a single JSON store file together with the pointer to
//! the currently active preset; the pre-preset single-document format is
//! migrated automatically on first access.

pub mod error;
pub mod http;
pub mod store;
pub mod types;
