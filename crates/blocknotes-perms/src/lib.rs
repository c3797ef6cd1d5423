//! # BlockNotes Permissions
//!
//! Access control for notes.
//!
//! ## Overview
//!
//! Every note carries a [`Visibility`](blocknotes_core::Visibility) and a
//! share set. Reads are classified against those two fields; every mutation
//! is gated on ownership alone.
//!
//! ## Read Rules
//!
//! Evaluated in order, first match wins:
//!
//! 1. `Public` notes are readable by anyone
//! 2. The owner can always read
//! 3. `Shared` notes are readable by principals in the share set
//! 4. Everyone else is denied
//!
//! Grants recorded while a note is `Private` or `Public` are kept and become
//! effective again as soon as the note is switched back to `Shared`.
//!
//! ## Usage
//!
//! ```rust
//! use blocknotes_core::{Note, NoteId, Principal, Visibility};
//! use blocknotes_perms::{authorize_read, ensure_owner, ShareGrant};
//!
//! let owner = Principal::from_bytes([1; 32]);
//! let friend = Principal::from_bytes([2; 32]);
//! let mut note = Note::new(NoteId::FIRST, "hello", owner, Visibility::Shared);
//!
//! ensure_owner(&note, &owner).unwrap();
//! ShareGrant::new(note.id, friend).apply(&mut note);
//!
//! assert!(authorize_read(&note, &friend).is_ok());
//! ```

pub mod access;
pub mod error;
pub mod grant;
pub mod guard;

pub use access::{authorize_read, classify_read, AccessDecision};
pub use error::{PermsError, Result};
pub use grant::ShareGrant;
pub use guard::ensure_owner;
