//! # BlockNotes
//!
//! An access-controlled note store: principals create short text notes,
//! tag each with a visibility level, and the registry enforces who may
//! read, share, re-classify or delete each one.
//!
//! ## Overview
//!
//! - **Notes**: sequentially numbered from 1, never renumbered or reused
//! - **Visibility**: `Private` (owner only), `Shared` (owner plus grantees),
//!   `Public` (anyone)
//! - **Sharing**: owner-only, append-only grants that apply while `Shared`
//! - **Transfers**: value sent to the registry is refunded immediately
//!
//! ## Key Concepts
//!
//! - **Existence first**: an unknown or deleted id is `NotFound` for every
//!   caller, owner included.
//! - **Owner guard**: share, change-visibility and delete all go through the
//!   same ownership check.
//! - **Events**: `Created`, `Shared` and `Deleted` are emitted after the
//!   mutation they describe, never for rejected calls.
//!
//! ## Usage
//!
//! ```rust
//! use blocknotes::{Notes, NotesConfig, Visibility};
//! use blocknotes::core::Keypair;
//! use blocknotes::store::MemoryStore;
//!
//! async fn example() {
//!     let owner = Keypair::generate().principal();
//!     let friend = Keypair::generate().principal();
//!
//!     let mut notes = Notes::new(MemoryStore::new(), NotesConfig::default());
//!
//!     let id = notes.create(&owner, "for friends", Visibility::Shared).await.unwrap();
//!     notes.share_with(id, friend, &owner).await.unwrap();
//!
//!     let view = notes.read(id, &friend).await.unwrap();
//!     assert_eq!(view.content, "for friends");
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `blocknotes::core` - Primitives (Principal, NoteId, Visibility, ...)
//! - `blocknotes::store` - Storage abstraction, memory and SQLite backends
//! - `blocknotes::perms` - Access rules and the owner guard

pub mod config;
pub mod error;
pub mod guard;
pub mod registry;
pub mod service;

// Re-export component crates
pub use blocknotes_core as core;
pub use blocknotes_perms as perms;
pub use blocknotes_store as store;

// Re-export main types for convenience
pub use config::NotesConfig;
pub use error::{ErrorKind, NotesError, Result};
pub use guard::{Refund, TransferGuard};
pub use registry::{NoteView, Notes};
pub use service::NotesService;

// Re-export commonly used core types
pub use blocknotes_core::{Amount, Keypair, Note, NoteEvent, NoteId, Principal, Visibility};
