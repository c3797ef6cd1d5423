//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use blocknotes::{Notes, NotesConfig};
use blocknotes_core::{Keypair, Principal};
use blocknotes_store::MemoryStore;

/// A test party: a keypair and the principal it speaks for.
pub struct TestFixture {
    pub keypair: Keypair,
}

impl TestFixture {
    /// Create a new test fixture with a random keypair.
    pub fn new() -> Self {
        Self {
            keypair: Keypair::generate(),
        }
    }

    /// Create with a deterministic keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: Keypair::from_seed(&seed),
        }
    }

    /// The principal this party calls as.
    pub fn principal(&self) -> Principal {
        self.keypair.principal()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple test fixtures for multi-party tests.
///
/// Deterministic: the same `count` always yields the same principals.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[..8].copy_from_slice(&(i as u64).to_le_bytes());
            seed[31] = 0xb1;
            TestFixture::with_seed(seed)
        })
        .collect()
}

/// A registry over a fresh in-memory store with default config.
pub fn memory_registry() -> Notes<MemoryStore> {
    Notes::new(MemoryStore::new(), NotesConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blocknotes_core::Visibility;

    #[test]
    fn test_multi_party() {
        let parties = multi_party_fixtures(3);

        let pks: Vec<_> = parties.iter().map(|p| p.principal()).collect();
        assert_ne!(pks[0], pks[1]);
        assert_ne!(pks[1], pks[2]);
        assert_ne!(pks[0], pks[2]);
    }

    #[test]
    fn test_multi_party_deterministic() {
        let a = multi_party_fixtures(2);
        let b = multi_party_fixtures(2);
        assert_eq!(a[1].principal(), b[1].principal());
    }

    #[tokio::test]
    async fn test_memory_registry_is_fresh() {
        let mut notes = memory_registry();
        let owner = TestFixture::new().principal();

        let id = notes.create(&owner, "first", Visibility::Private).await.unwrap();
        assert_eq!(id.get(), 1);

        // A second registry does not share state with the first.
        let other = memory_registry();
        assert_eq!(other.note_count().await.unwrap(), 0);
    }
}
