//! Store trait: the minimal interface for note persistence.

use async_trait::async_trait;

use blocknotes_core::{Note, NoteId, Principal, Visibility};
use blocknotes_perms::ShareGrant;

use crate::error::Result;

/// The async trait for all storage operations.
///
/// Stores hold data only. They do not check ownership or visibility; the
/// registry in `blocknotes` runs those checks before calling any mutation.
/// Every method is atomic on its own: a failed call leaves no trace.
#[async_trait]
pub trait Store: Send + Sync {
    /// Allocate the next id and insert a note under it.
    ///
    /// Allocation and insertion happen in one step. Ids start at 1 and are
    /// never handed out twice, even after the note holding one is removed.
    async fn insert_note(
        &self,
        content: &str,
        owner: &Principal,
        visibility: Visibility,
    ) -> Result<NoteId>;

    /// Get a note by id, including its share set.
    async fn get_note(&self, id: NoteId) -> Result<Option<Note>>;

    /// Record a share grant.
    ///
    /// Returns `true` if the grantee is new, `false` if it was already
    /// present. Fails with `NotFound` if the note does not exist.
    async fn add_share(&self, grant: &ShareGrant) -> Result<bool>;

    /// Overwrite a note's visibility. The share set is left untouched.
    async fn set_visibility(&self, id: NoteId, visibility: Visibility) -> Result<()>;

    /// Remove a note and its grants.
    ///
    /// Returns `false` if there was nothing to remove.
    async fn remove_note(&self, id: NoteId) -> Result<bool>;

    /// Ids of existing notes owned by `owner`, ascending.
    async fn notes_by_owner(&self, owner: &Principal) -> Result<Vec<NoteId>>;

    /// Number of existing notes.
    async fn count(&self) -> Result<usize>;

    /// The id the next insert will receive.
    async fn next_id(&self) -> Result<NoteId>;
}
