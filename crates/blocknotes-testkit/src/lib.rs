//! # BlockNotes Testkit
//!
//! Testing utilities for BlockNotes.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: Deterministic principals and ready-made registries
//! - **Generators**: Proptest strategies for property-based testing
//! - **Wallets**: The sender side of transfer scenarios
//! - **Tracing**: A one-call subscriber for test output
//!
//! ## Test Fixtures
//!
//! ```rust
//! use blocknotes_testkit::fixtures::{multi_party_fixtures, memory_registry};
//!
//! let parties = multi_party_fixtures(3);
//! let notes = memory_registry();
//! assert_ne!(parties[0].principal(), parties[1].principal());
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use blocknotes_testkit::generators::{content, visibility};
//!
//! proptest! {
//!     #[test]
//!     fn create_then_read(text in content(), v in visibility()) {
//!         // ...
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod wallet;

pub use fixtures::{memory_registry, multi_party_fixtures, TestFixture};
pub use wallet::Wallet;

/// Install a `tracing` subscriber for tests.
///
/// Honours `RUST_LOG`, defaulting to `debug` for the BlockNotes crates.
/// Safe to call from every test: only the first call installs anything.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("blocknotes=debug,blocknotes_store=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
