//! # BlockNotes Store
//!
//! Storage abstraction for BlockNotes. Provides a trait-based interface
//! for note persistence with SQLite and in-memory implementations.
//!
//! ## Overview
//!
//! The store module abstracts note storage behind the [`Store`] trait,
//! allowing the registry to be storage-agnostic. [`SqliteStore`] persists
//! to disk, [`MemoryStore`] is for tests and ephemeral use.
//!
//! ## Key Types
//!
//! - [`Store`] - The async trait for all storage operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use blocknotes_core::{Keypair, Visibility};
//! use blocknotes_store::{SqliteStore, Store};
//!
//! async fn example() {
//!     let store = SqliteStore::open("notes.db").unwrap();
//!     let owner = Keypair::generate().principal();
//!
//!     let id = store.insert_note("hello", &owner, Visibility::Private).await.unwrap();
//!     let note = store.get_note(id).await.unwrap();
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Monotonic ids**: ids start at 1 and are never reissued after removal
//! - **Idempotent grants**: recording the same grant twice returns `false`
//! - **No policy**: stores never check ownership or visibility

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::Store;

/// Get current time in milliseconds.
pub(crate) fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
