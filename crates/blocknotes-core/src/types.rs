//! Strong type definitions for BlockNotes.
//!
//! Identifiers and enumerations are newtypes so they cannot be confused
//! with plain integers at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Smallest unit of value that can be transferred to the store.
pub type Amount = u128;

/// A sequential note identifier.
///
/// Identifiers start at 1 and are never reused, even after deletion.
/// `0` is reserved as the "not found" sentinel and is never assigned.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NoteId(pub u64);

impl NoteId {
    /// The sentinel id. Never refers to a note.
    pub const ZERO: Self = Self(0);

    /// The first id handed out by a fresh store.
    pub const FIRST: Self = Self(1);

    /// Create a NoteId from a raw value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Whether this is the reserved sentinel.
    pub const fn is_sentinel(&self) -> bool {
        self.0 == 0
    }

    /// The id that follows this one.
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Debug for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteId({})", self.0)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for NoteId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Access class of a note.
///
/// The discriminants are the wire values accepted by [`Visibility::try_from`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Visibility {
    /// Owner only.
    Private = 0,
    /// Owner plus principals in the note's share set.
    Shared = 1,
    /// Any caller.
    Public = 2,
}

impl Visibility {
    /// All levels, in wire order.
    pub const ALL: [Visibility; 3] = [Visibility::Private, Visibility::Shared, Visibility::Public];

    /// Wire value of this level.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Visibility {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Visibility::Private),
            1 => Ok(Visibility::Shared),
            2 => Ok(Visibility::Public),
            other => Err(CoreError::InvalidVisibility(other)),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Visibility::Private => "private",
            Visibility::Shared => "shared",
            Visibility::Public => "public",
        };
        f.write_str(name)
    }
}
