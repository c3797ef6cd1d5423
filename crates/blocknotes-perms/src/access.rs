//! Read access classification.
//!
//! The rules are evaluated against a single note and a single caller.
//! Existence is the caller's concern: by the time a note reaches this
//! module it has already been loaded from the store.

use blocknotes_core::{Note, Principal, Visibility};

use crate::error::{PermsError, Result};

/// Why a read was allowed, or that it was not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The note is public.
    Public,
    /// The caller owns the note.
    Owner,
    /// The note is shared and the caller holds a grant.
    SharedGrant,
    /// None of the rules matched.
    Denied,
}

impl AccessDecision {
    /// Whether the read may proceed.
    pub fn is_allowed(self) -> bool {
        !matches!(self, AccessDecision::Denied)
    }
}

/// Classify a read attempt.
pub fn classify_read(note: &Note, caller: &Principal) -> AccessDecision {
    if note.visibility == Visibility::Public {
        return AccessDecision::Public;
    }

    if note.is_owned_by(caller) {
        return AccessDecision::Owner;
    }

    match note.visibility {
        Visibility::Shared if note.is_shared_with(caller) => AccessDecision::SharedGrant,
        // Grants on a private note stay dormant.
        _ => AccessDecision::Denied,
    }
}

/// Classify a read attempt, failing with `Unauthorized` when denied.
pub fn authorize_read(note: &Note, caller: &Principal) -> Result<AccessDecision> {
    match classify_read(note, caller) {
        AccessDecision::Denied => Err(PermsError::Unauthorized {
            note_id: note.id,
            caller: *caller,
        }),
        decision => Ok(decision),
    }
}
