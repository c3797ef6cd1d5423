//! # BlockNotes Core
//!
//! Pure primitives for BlockNotes: principals, note identifiers, visibility
//! levels, the note entity and the notifications emitted when notes change.
//!
//! This crate contains no I/O, no storage, no access rules. Those live in
//! `blocknotes-store` and `blocknotes-perms`.
//!
//! ## Key Types
//!
//! - [`Principal`] - Identity of a calling party (Ed25519 public key)
//! - [`NoteId`] - Sequential note identifier, `0` is reserved as "not found"
//! - [`Visibility`] - Closed three-way access class of a note
//! - [`Note`] - The stored record: content, owner, visibility, share set
//! - [`NoteEvent`] - Notifications for external observers

pub mod crypto;
pub mod error;
pub mod event;
pub mod note;
pub mod types;

pub use crypto::{Keypair, Principal};
pub use error::{CoreError, Result};
pub use event::NoteEvent;
pub use note::{Note, ShareSet};
pub use types::{Amount, NoteId, Visibility};
