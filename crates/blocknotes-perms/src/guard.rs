//! The owner guard.
//!
//! Sharing, visibility changes and deletion are all owner-only. They share
//! this one check so the rule lives in exactly one place.

use blocknotes_core::{Note, Principal};

use crate::error::{PermsError, Result};

/// Fail with `NotOwner` unless `caller` owns `note`.
pub fn ensure_owner(note: &Note, caller: &Principal) -> Result<()> {
    if note.is_owned_by(caller) {
        Ok(())
    } else {
        Err(PermsError::NotOwner {
            note_id: note.id,
            caller: *caller,
        })
    }
}
