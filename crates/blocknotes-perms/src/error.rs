//! Error types for the permissions module.

use blocknotes_core::{NoteId, Principal};
use thiserror::Error;

/// Errors that can occur during permission checks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PermsError {
    /// The caller may not read the note.
    #[error("unauthorized access to note {note_id} by {caller}")]
    Unauthorized { note_id: NoteId, caller: Principal },

    /// The caller attempted an owner-only mutation.
    #[error("{caller} is not the owner of note {note_id}")]
    NotOwner { note_id: NoteId, caller: Principal },
}

/// Result type for permission operations.
pub type Result<T> = std::result::Result<T, PermsError>;
