//! The note registry.
//!
//! Brings together storage, access rules and the transfer guard into the
//! public operation surface.

use std::collections::VecDeque;

use serde::Serialize;
use tokio::sync::broadcast;

use blocknotes_core::{Amount, Note, NoteEvent, NoteId, Principal, Visibility};
use blocknotes_perms::{authorize_read, ensure_owner, ShareGrant};
use blocknotes_store::Store;

use crate::config::NotesConfig;
use crate::error::{NotesError, Result};
use crate::guard::{Refund, TransferGuard};

/// What a successful read returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteView {
    pub content: String,
    pub visibility: Visibility,
}

/// The note registry.
///
/// Provides the full operation surface:
/// - Creating notes
/// - Reading notes, subject to visibility
/// - Sharing, changing visibility and deleting, owner-only
/// - Bouncing unsolicited transfers
///
/// Mutations take `&mut self`, so a single `Notes` value is its own
/// serialization point. Every id-bearing operation checks existence first,
/// then authorization, then mutates, then emits its event.
///
/// A mutating future dropped while the store is still working may leave the
/// store write applied without its event. Callers that can be cancelled
/// should go through [`NotesService`](crate::NotesService), which runs each
/// mutation to completion on its own task.
pub struct Notes<S: Store> {
    /// The storage backend.
    store: S,
    /// Configuration.
    config: NotesConfig,
    /// Bounces unsolicited transfers.
    guard: TransferGuard,
    /// Most recent events, at most `event_capacity` of them.
    journal: VecDeque<NoteEvent>,
    /// Live subscribers, created on first `subscribe`.
    events_tx: Option<broadcast::Sender<NoteEvent>>,
}

impl<S: Store> Notes<S> {
    /// Create a new registry over a store.
    pub fn new(store: S, config: NotesConfig) -> Self {
        Self {
            store,
            config,
            guard: TransferGuard::new(),
            journal: VecDeque::new(),
            events_tx: None,
        }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the configuration.
    pub fn config(&self) -> &NotesConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Record Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a note owned by `caller`.
    pub async fn create(
        &mut self,
        caller: &Principal,
        content: &str,
        visibility: Visibility,
    ) -> Result<NoteId> {
        if content.is_empty() {
            return Err(rejected("create", NotesError::EmptyContent));
        }

        let id = self.store.insert_note(content, caller, visibility).await?;
        tracing::debug!(note_id = %id, owner = %caller, %visibility, "note created");

        self.emit(NoteEvent::Created {
            id,
            content: content.to_owned(),
            owner: *caller,
            visibility,
        });
        Ok(id)
    }

    /// Create a note from an untyped visibility value.
    ///
    /// Values outside the known levels fail with `InvalidVisibility` before
    /// the content is looked at.
    pub async fn create_raw(
        &mut self,
        caller: &Principal,
        content: &str,
        visibility: u8,
    ) -> Result<NoteId> {
        let visibility =
            Visibility::try_from(visibility).map_err(|e| rejected("create", e.into()))?;
        self.create(caller, content, visibility).await
    }

    /// Read a note's content and visibility.
    pub async fn read(&self, id: NoteId, caller: &Principal) -> Result<NoteView> {
        let note = self.load("read", id).await?;
        let decision = authorize_read(&note, caller).map_err(|e| rejected("read", e.into()))?;
        tracing::trace!(note_id = %id, caller = %caller, ?decision, "note read");

        Ok(NoteView {
            content: note.content,
            visibility: note.visibility,
        })
    }

    /// Grant `grantee` read access while the note is `Shared`.
    ///
    /// Sharing is allowed at any visibility. Granting twice is not an error
    /// and leaves the share set unchanged; the event is emitted either way.
    pub async fn share_with(
        &mut self,
        id: NoteId,
        grantee: Principal,
        caller: &Principal,
    ) -> Result<()> {
        let note = self.load_owned("share_with", id, caller).await?;

        let added = self.store.add_share(&ShareGrant::new(note.id, grantee)).await?;
        tracing::debug!(note_id = %id, grantee = %grantee, added, "note shared");

        self.emit(NoteEvent::Shared { id, grantee });
        Ok(())
    }

    /// Overwrite a note's visibility. Existing grants are kept.
    pub async fn change_visibility(
        &mut self,
        id: NoteId,
        visibility: Visibility,
        caller: &Principal,
    ) -> Result<()> {
        let note = self.load_owned("change_visibility", id, caller).await?;

        self.store.set_visibility(id, visibility).await?;
        tracing::debug!(
            note_id = %id,
            from = %note.visibility,
            to = %visibility,
            "note visibility changed"
        );
        Ok(())
    }

    /// Delete a note. Its id is never issued again.
    pub async fn delete_note(&mut self, id: NoteId, caller: &Principal) -> Result<()> {
        self.load_owned("delete_note", id, caller).await?;

        if !self.store.remove_note(id).await? {
            return Err(rejected("delete_note", NotesError::NotFound(id)));
        }
        tracing::debug!(note_id = %id, owner = %caller, "note deleted");

        self.emit(NoteEvent::Deleted { id });
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether `grantee` holds a grant on the note, regardless of visibility.
    pub async fn is_shared_with(&self, id: NoteId, grantee: &Principal) -> Result<bool> {
        let note = self.load("is_shared_with", id).await?;
        Ok(note.is_shared_with(grantee))
    }

    /// Ids of existing notes owned by `owner`, ascending.
    pub async fn notes_owned_by(&self, owner: &Principal) -> Result<Vec<NoteId>> {
        Ok(self.store.notes_by_owner(owner).await?)
    }

    /// Number of existing notes.
    pub async fn note_count(&self) -> Result<usize> {
        Ok(self.store.count().await?)
    }

    /// The id the next `create` will return.
    pub async fn next_id(&self) -> Result<NoteId> {
        Ok(self.store.next_id().await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transfers
    // ─────────────────────────────────────────────────────────────────────────

    /// Bounce an unsolicited transfer back to its sender.
    pub fn receive_value(&mut self, sender: Principal, amount: Amount) -> Refund {
        let refund = self.guard.receive(sender, amount);
        tracing::warn!(sender = %sender, amount = %amount, "refunded unsolicited transfer");
        refund
    }

    /// Value held by the registry. Always zero.
    pub fn balance(&self) -> Amount {
        self.guard.balance()
    }

    /// The transfer guard, for its counters.
    pub fn transfer_guard(&self) -> &TransferGuard {
        &self.guard
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Events
    // ─────────────────────────────────────────────────────────────────────────

    /// Journaled events, oldest first.
    ///
    /// Holds at most `event_capacity` entries; older ones are dropped.
    pub fn events(&self) -> &VecDeque<NoteEvent> {
        &self.journal
    }

    /// Take all journaled events, leaving the journal empty.
    pub fn drain_events(&mut self) -> Vec<NoteEvent> {
        self.journal.drain(..).collect()
    }

    /// Subscribe to events emitted from now on.
    pub fn subscribe(&mut self) -> broadcast::Receiver<NoteEvent> {
        let capacity = self.config.event_capacity.max(1);
        self.events_tx
            .get_or_insert_with(|| broadcast::channel(capacity).0)
            .subscribe()
    }

    fn emit(&mut self, event: NoteEvent) {
        tracing::trace!(note_id = %event.note_id(), kind = event.kind_name(), "event emitted");

        if let Some(tx) = &self.events_tx {
            // Err only means nobody is listening right now.
            let _ = tx.send(event.clone());
        }
        if self.config.record_events {
            if self.journal.len() >= self.config.event_capacity.max(1) {
                self.journal.pop_front();
            }
            self.journal.push_back(event);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Checks
    // ─────────────────────────────────────────────────────────────────────────

    /// Load a note, failing with `NotFound`.
    async fn load(&self, op: &'static str, id: NoteId) -> Result<Note> {
        match self.store.get_note(id).await? {
            Some(note) => Ok(note),
            None => Err(rejected(op, NotesError::NotFound(id))),
        }
    }

    /// Load a note and run the owner guard on it.
    async fn load_owned(&self, op: &'static str, id: NoteId, caller: &Principal) -> Result<Note> {
        let note = self.load(op, id).await?;
        ensure_owner(&note, caller).map_err(|e| rejected(op, e.into()))?;
        Ok(note)
    }
}

/// Log a rejected operation and pass the error through.
fn rejected(op: &'static str, err: NotesError) -> NotesError {
    tracing::debug!(op, kind = ?err.kind(), error = %err, "operation rejected");
    err
}
