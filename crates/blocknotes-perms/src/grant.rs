//! Share grant payloads.
//!
//! A grant adds one principal to a note's share set. Grants are append-only:
//! there is no revoke counterpart.

use blocknotes_core::{Note, NoteId, Principal};

/// Payload of a share operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareGrant {
    /// The note being shared.
    pub note_id: NoteId,

    /// The principal being granted read access.
    pub grantee: Principal,
}

impl ShareGrant {
    /// Create a new grant.
    pub fn new(note_id: NoteId, grantee: Principal) -> Self {
        Self { note_id, grantee }
    }

    /// Apply the grant to a note.
    ///
    /// Returns `false` if the grantee was already in the share set.
    /// Ownership is not checked here; see [`crate::ensure_owner`].
    pub fn apply(&self, note: &mut Note) -> bool {
        debug_assert_eq!(note.id, self.note_id);
        note.shared_with.insert(self.grantee)
    }
}
