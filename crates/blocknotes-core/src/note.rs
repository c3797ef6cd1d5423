//! The note entity.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::crypto::Principal;
use crate::types::{NoteId, Visibility};

/// Principals holding an explicit read grant on a note.
///
/// The set only grows. There is no revoke: an owner who wants to cut off
/// shared readers changes the note's visibility instead, which leaves the
/// grants in place for when the note becomes `Shared` again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareSet(BTreeSet<Principal>);

impl ShareSet {
    /// Create an empty share set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a grantee. Returns `false` if it was already present.
    pub fn insert(&mut self, grantee: Principal) -> bool {
        self.0.insert(grantee)
    }

    /// Whether the principal holds a grant.
    pub fn contains(&self, principal: &Principal) -> bool {
        self.0.contains(principal)
    }

    /// Number of grantees.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nobody holds a grant.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate grantees in byte order.
    pub fn iter(&self) -> impl Iterator<Item = &Principal> {
        self.0.iter()
    }
}

impl FromIterator<Principal> for ShareSet {
    fn from_iter<I: IntoIterator<Item = Principal>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A stored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Sequential identifier, never zero.
    pub id: NoteId,

    /// Non-empty text, immutable after creation.
    pub content: String,

    /// The creating principal, immutable.
    pub owner: Principal,

    /// Current access class. Only the owner may change it.
    pub visibility: Visibility,

    /// Explicit read grants, consulted only while `visibility` is `Shared`.
    pub shared_with: ShareSet,
}

impl Note {
    /// Create a freshly stored note with no grants.
    pub fn new(id: NoteId, content: impl Into<String>, owner: Principal, visibility: Visibility) -> Self {
        Self {
            id,
            content: content.into(),
            owner,
            visibility,
            shared_with: ShareSet::new(),
        }
    }

    /// Whether `principal` owns this note.
    pub fn is_owned_by(&self, principal: &Principal) -> bool {
        &self.owner == principal
    }

    /// Whether `principal` holds a grant, regardless of current visibility.
    pub fn is_shared_with(&self, principal: &Principal) -> bool {
        self.shared_with.contains(principal)
    }
}
