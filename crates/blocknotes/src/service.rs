//! Shared handle for concurrent callers.
//!
//! [`Notes`] serializes mutations through `&mut self`. When several tasks
//! need the same registry, [`NotesService`] puts it behind one async mutex:
//! every operation, reads included, runs to completion before the next one
//! starts.
//!
//! Mutations run on a spawned task. Dropping the returned future, for example
//! under `tokio::time::timeout`, detaches the caller but the mutation still
//! finishes, so a stored write is never left without its event.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};

use blocknotes_core::{Amount, NoteEvent, NoteId, Principal, Visibility};
use blocknotes_store::Store;

use crate::config::NotesConfig;
use crate::error::Result;
use crate::guard::Refund;
use crate::registry::{NoteView, Notes};

/// Cloneable single-writer handle to a [`Notes`] registry.
pub struct NotesService<S: Store> {
    inner: Arc<Mutex<Notes<S>>>,
}

impl<S: Store> Clone for NotesService<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Store + 'static> NotesService<S> {
    /// Create a service over a fresh registry.
    pub fn new(store: S, config: NotesConfig) -> Self {
        Self::from_registry(Notes::new(store, config))
    }

    /// Wrap an existing registry.
    pub fn from_registry(notes: Notes<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(notes)),
        }
    }

    pub async fn create(
        &self,
        caller: &Principal,
        content: &str,
        visibility: Visibility,
    ) -> Result<NoteId> {
        let inner = Arc::clone(&self.inner);
        let (caller, content) = (*caller, content.to_owned());
        run_detached(async move {
            inner.lock().await.create(&caller, &content, visibility).await
        })
        .await
    }

    pub async fn read(&self, id: NoteId, caller: &Principal) -> Result<NoteView> {
        self.inner.lock().await.read(id, caller).await
    }

    pub async fn share_with(
        &self,
        id: NoteId,
        grantee: Principal,
        caller: &Principal,
    ) -> Result<()> {
        let inner = Arc::clone(&self.inner);
        let caller = *caller;
        run_detached(async move { inner.lock().await.share_with(id, grantee, &caller).await }).await
    }

    pub async fn change_visibility(
        &self,
        id: NoteId,
        visibility: Visibility,
        caller: &Principal,
    ) -> Result<()> {
        let inner = Arc::clone(&self.inner);
        let caller = *caller;
        run_detached(async move {
            inner
                .lock()
                .await
                .change_visibility(id, visibility, &caller)
                .await
        })
        .await
    }

    pub async fn delete_note(&self, id: NoteId, caller: &Principal) -> Result<()> {
        let inner = Arc::clone(&self.inner);
        let caller = *caller;
        run_detached(async move { inner.lock().await.delete_note(id, &caller).await }).await
    }

    pub async fn is_shared_with(&self, id: NoteId, grantee: &Principal) -> Result<bool> {
        self.inner.lock().await.is_shared_with(id, grantee).await
    }

    pub async fn receive_value(&self, sender: Principal, amount: Amount) -> Refund {
        self.inner.lock().await.receive_value(sender, amount)
    }

    pub async fn balance(&self) -> Amount {
        self.inner.lock().await.balance()
    }

    /// Subscribe to events emitted from now on.
    pub async fn subscribe(&self) -> broadcast::Receiver<NoteEvent> {
        self.inner.lock().await.subscribe()
    }

    /// Take all journaled events.
    pub async fn drain_events(&self) -> Vec<NoteEvent> {
        self.inner.lock().await.drain_events()
    }

    /// Run a closure with exclusive access to the registry.
    pub async fn with_registry<T>(&self, f: impl FnOnce(&mut Notes<S>) -> T) -> T {
        let mut guard = self.inner.lock().await;
        f(&mut guard)
    }
}

/// Drive `task` on its own tokio task and wait for it.
async fn run_detached<T, F>(task: F) -> Result<T>
where
    T: Send + 'static,
    F: Future<Output = Result<T>> + Send + 'static,
{
    tokio::spawn(task).await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use blocknotes_core::Keypair;
    use blocknotes_store::MemoryStore;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_get_distinct_sequential_ids() {
        let service = NotesService::new(MemoryStore::new(), NotesConfig::default());
        let owner = Keypair::from_seed(&[1; 32]).principal();

        let mut handles = Vec::new();
        for i in 0..32 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service
                    .create(&owner, &format!("note {}", i), Visibility::Private)
                    .await
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().get());
        }
        ids.sort_unstable();

        assert_eq!(ids, (1..=32).collect::<Vec<u64>>());
        assert_eq!(service.drain_events().await.len(), 32);
    }

    #[tokio::test]
    async fn test_service_round_trip() {
        let service = NotesService::new(MemoryStore::new(), NotesConfig::default());
        let owner = Keypair::from_seed(&[1; 32]).principal();
        let friend = Keypair::from_seed(&[2; 32]).principal();
        let mut rx = service.subscribe().await;

        let id = service.create(&owner, "shared", Visibility::Shared).await.unwrap();
        service.share_with(id, friend, &owner).await.unwrap();

        assert_eq!(service.read(id, &friend).await.unwrap().content, "shared");
        assert!(service.is_shared_with(id, &friend).await.unwrap());
        assert_eq!(rx.recv().await.unwrap().kind_name(), "created");
        assert_eq!(rx.recv().await.unwrap().kind_name(), "shared");

        let count = service.with_registry(|notes| notes.events().len()).await;
        assert_eq!(count, 2);
    }
}
