//! Notifications emitted when notes change.
//!
//! Events are produced only after a mutation has been applied, so an
//! observer never sees an event for a rejected operation.

use serde::{Deserialize, Serialize};

use crate::crypto::Principal;
use crate::error::{CoreError, Result};
use crate::types::{NoteId, Visibility};

/// An observable change to the note store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteEvent {
    /// A note was created.
    Created {
        id: NoteId,
        content: String,
        owner: Principal,
        visibility: Visibility,
    },

    /// A principal was granted read access to a note.
    Shared { id: NoteId, grantee: Principal },

    /// A note was deleted.
    Deleted { id: NoteId },
}

impl NoteEvent {
    /// The note this event concerns.
    pub fn note_id(&self) -> NoteId {
        match self {
            NoteEvent::Created { id, .. } => *id,
            NoteEvent::Shared { id, .. } => *id,
            NoteEvent::Deleted { id } => *id,
        }
    }

    /// Short name of the event kind, used in logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            NoteEvent::Created { .. } => "created",
            NoteEvent::Shared { .. } => "shared",
            NoteEvent::Deleted { .. } => "deleted",
        }
    }

    /// Serialize to CBOR bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf)
            .map_err(|e| CoreError::EncodingError(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize from CBOR bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        ciborium::from_reader(bytes).map_err(|e| CoreError::DecodingError(e.to_string()))
    }
}
