//! Error types for the note registry.

use blocknotes_core::{CoreError, NoteId, Principal};
use blocknotes_perms::PermsError;
use blocknotes_store::StoreError;
use thiserror::Error;

/// Errors that can occur during registry operations.
///
/// Every variant leaves the store exactly as it was before the call.
#[derive(Debug, Error)]
pub enum NotesError {
    /// Note content was empty.
    #[error("note content cannot be empty")]
    EmptyContent,

    /// A visibility value outside the three known levels.
    #[error("invalid visibility value: {0}")]
    InvalidVisibility(u8),

    /// The id was never issued, or the note was deleted.
    #[error("note does not exist: {0}")]
    NotFound(NoteId),

    /// The caller may not read the note.
    #[error("unauthorized access to note {note_id} by {caller}")]
    Unauthorized { note_id: NoteId, caller: Principal },

    /// The caller attempted an owner-only mutation.
    #[error("{caller} is not the owner of note {note_id}")]
    NotOwner { note_id: NoteId, caller: Principal },

    /// Storage error.
    #[error("storage error: {0}")]
    Store(StoreError),

    /// Core error.
    #[error("core error: {0}")]
    Core(CoreError),
}

/// Coarse classification of a [`NotesError`], for callers that branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Empty content or a malformed argument.
    InvalidInput,
    /// Unknown or deleted note.
    NotFound,
    /// Read denied by the visibility rules.
    Unauthorized,
    /// Owner-only mutation attempted by someone else.
    NotOwner,
    /// The backend or an encoder failed.
    Internal,
}

impl NotesError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NotesError::EmptyContent | NotesError::InvalidVisibility(_) => ErrorKind::InvalidInput,
            NotesError::NotFound(_) => ErrorKind::NotFound,
            NotesError::Unauthorized { .. } => ErrorKind::Unauthorized,
            NotesError::NotOwner { .. } => ErrorKind::NotOwner,
            NotesError::Core(CoreError::InvalidPrincipal(_)) => ErrorKind::InvalidInput,
            NotesError::Store(_) | NotesError::Core(_) => ErrorKind::Internal,
        }
    }
}

impl From<CoreError> for NotesError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidVisibility(v) => NotesError::InvalidVisibility(v),
            other => NotesError::Core(other),
        }
    }
}

impl From<PermsError> for NotesError {
    fn from(e: PermsError) -> Self {
        match e {
            PermsError::Unauthorized { note_id, caller } => {
                NotesError::Unauthorized { note_id, caller }
            }
            PermsError::NotOwner { note_id, caller } => NotesError::NotOwner { note_id, caller },
        }
    }
}

impl From<StoreError> for NotesError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => NotesError::NotFound(id),
            other => NotesError::Store(other),
        }
    }
}

impl From<tokio::task::JoinError> for NotesError {
    fn from(e: tokio::task::JoinError) -> Self {
        NotesError::Store(StoreError::from(e))
    }
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, NotesError>;
