//! In-memory implementation of the Store trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use blocknotes_core::{Note, NoteId, Principal, Visibility};
use blocknotes_perms::ShareGrant;

use crate::error::{Result, StoreError};
use crate::traits::Store;

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

struct MemoryStoreInner {
    /// Notes indexed by id. Removed notes are dropped from the map.
    notes: BTreeMap<NoteId, Note>,

    /// The id the next insert receives. Only ever increases.
    next_id: NoteId,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner {
                notes: BTreeMap::new(),
                next_id: NoteId::FIRST,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_note(
        &self,
        content: &str,
        owner: &Principal,
        visibility: Visibility,
    ) -> Result<NoteId> {
        let mut inner = self.inner.write()?;

        let id = inner.next_id;
        inner.next_id = id.next();
        inner.notes.insert(id, Note::new(id, content, *owner, visibility));

        Ok(id)
    }

    async fn get_note(&self, id: NoteId) -> Result<Option<Note>> {
        let inner = self.inner.read()?;
        Ok(inner.notes.get(&id).cloned())
    }

    async fn add_share(&self, grant: &ShareGrant) -> Result<bool> {
        let mut inner = self.inner.write()?;
        let note = inner
            .notes
            .get_mut(&grant.note_id)
            .ok_or(StoreError::NotFound(grant.note_id))?;

        Ok(grant.apply(note))
    }

    async fn set_visibility(&self, id: NoteId, visibility: Visibility) -> Result<()> {
        let mut inner = self.inner.write()?;
        let note = inner.notes.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        note.visibility = visibility;
        Ok(())
    }

    async fn remove_note(&self, id: NoteId) -> Result<bool> {
        let mut inner = self.inner.write()?;
        Ok(inner.notes.remove(&id).is_some())
    }

    async fn notes_by_owner(&self, owner: &Principal) -> Result<Vec<NoteId>> {
        let inner = self.inner.read()?;
        Ok(inner
            .notes
            .values()
            .filter(|n| n.is_owned_by(owner))
            .map(|n| n.id)
            .collect())
    }

    async fn count(&self) -> Result<usize> {
        let inner = self.inner.read()?;
        Ok(inner.notes.len())
    }

    async fn next_id(&self) -> Result<NoteId> {
        let inner = self.inner.read()?;
        Ok(inner.next_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(byte: u8) -> Principal {
        Principal::from_bytes([byte; 32])
    }

    #[tokio::test]
    async fn test_ids_are_sequential_from_one() {
        let store = MemoryStore::new();
        let owner = principal(1);

        assert_eq!(store.next_id().await.unwrap(), NoteId::FIRST);
        for expected in 1..=3u64 {
            let id = store
                .insert_note("n", &owner, Visibility::Private)
                .await
                .unwrap();
            assert_eq!(id, NoteId::new(expected));
        }
        assert_eq!(store.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_removed_id_is_not_reused() {
        let store = MemoryStore::new();
        let owner = principal(1);

        let first = store.insert_note("a", &owner, Visibility::Public).await.unwrap();
        assert!(store.remove_note(first).await.unwrap());
        assert!(!store.remove_note(first).await.unwrap());

        let second = store.insert_note("b", &owner, Visibility::Public).await.unwrap();
        assert_eq!(second, NoteId::new(2));
        assert!(store.get_note(first).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_share_and_visibility_persist_independently() {
        let store = MemoryStore::new();
        let owner = principal(1);
        let grantee = principal(2);

        let id = store.insert_note("s", &owner, Visibility::Shared).await.unwrap();
        let grant = ShareGrant::new(id, grantee);
        assert!(store.add_share(&grant).await.unwrap());
        assert!(!store.add_share(&grant).await.unwrap());

        store.set_visibility(id, Visibility::Private).await.unwrap();

        let note = store.get_note(id).await.unwrap().unwrap();
        assert_eq!(note.visibility, Visibility::Private);
        assert!(note.is_shared_with(&grantee));
    }

    #[tokio::test]
    async fn test_mutations_on_missing_note() {
        let store = MemoryStore::new();
        let missing = NoteId::new(42);

        assert!(matches!(
            store.set_visibility(missing, Visibility::Public).await,
            Err(StoreError::NotFound(id)) if id == missing
        ));
        assert!(matches!(
            store.add_share(&ShareGrant::new(missing, principal(2))).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(store.get_note(missing).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_notes_by_owner() {
        let store = MemoryStore::new();
        let alice = principal(1);
        let bob = principal(2);

        store.insert_note("a1", &alice, Visibility::Private).await.unwrap();
        store.insert_note("b1", &bob, Visibility::Private).await.unwrap();
        let a2 = store.insert_note("a2", &alice, Visibility::Public).await.unwrap();
        store.remove_note(NoteId::FIRST).await.unwrap();

        assert_eq!(store.notes_by_owner(&alice).await.unwrap(), vec![a2]);
        assert_eq!(store.notes_by_owner(&bob).await.unwrap(), vec![NoteId::new(2)]);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Any interleaving of inserts and removals hands out ids in
            // strictly increasing order.
            #[test]
            fn ids_never_repeat(ops in proptest::collection::vec(any::<bool>(), 1..40)) {
                let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
                let issued = rt.block_on(async {
                    let store = MemoryStore::new();
                    let owner = principal(1);
                    let mut issued = Vec::new();
                    for insert in ops {
                        match issued.last() {
                            Some(&last) if !insert => {
                                store.remove_note(last).await.unwrap();
                            }
                            _ => {
                                let id = store
                                    .insert_note("n", &owner, Visibility::Public)
                                    .await
                                    .unwrap();
                                issued.push(id);
                            }
                        }
                    }
                    issued
                });
                prop_assert!(issued.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }
}
