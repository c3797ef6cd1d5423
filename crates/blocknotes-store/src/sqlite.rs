//! SQLite implementation of the Store trait.
//!
//! This is the persistent storage backend for BlockNotes. It uses rusqlite
//! with bundled SQLite, wrapped in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use blocknotes_core::{Note, NoteId, Principal, ShareSet, Visibility};
use blocknotes_perms::ShareGrant;

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::Store;

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a blocking operation on the connection off the async runtime.
    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let mut conn = conn.lock()?;
            f(&mut conn)
        })
        .await?
    }
}

// Helper to convert a notes row (without shares) to a Note
fn row_to_note(row: &rusqlite::Row<'_>) -> rusqlite::Result<Note> {
    let id: i64 = row.get("id")?;
    let owner_bytes: Vec<u8> = row.get("owner")?;
    let visibility: u8 = row.get("visibility")?;

    let owner = Principal::try_from(owner_bytes.as_slice()).map_err(|_| {
        rusqlite::Error::InvalidColumnType(2, "owner".into(), rusqlite::types::Type::Blob)
    })?;
    let visibility = Visibility::try_from(visibility).map_err(|_| {
        rusqlite::Error::InvalidColumnType(3, "visibility".into(), rusqlite::types::Type::Integer)
    })?;

    Ok(Note {
        id: NoteId::new(id as u64),
        content: row.get("content")?,
        owner,
        visibility,
        shared_with: ShareSet::new(),
    })
}

fn load_shares(conn: &Connection, id: NoteId) -> Result<ShareSet> {
    let mut stmt = conn.prepare("SELECT grantee FROM note_shares WHERE note_id = ?1")?;
    let rows = stmt
        .query_map(params![id.get() as i64], |row| row.get::<_, Vec<u8>>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    rows.iter()
        .map(|bytes| {
            Principal::try_from(bytes.as_slice())
                .map_err(|e| StoreError::InvalidData(format!("grantee on note {}: {}", id, e)))
        })
        .collect()
}

fn note_exists(conn: &Connection, id: NoteId) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT id FROM notes WHERE id = ?1",
            params![id.get() as i64],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

#[async_trait]
impl Store for SqliteStore {
    async fn insert_note(
        &self,
        content: &str,
        owner: &Principal,
        visibility: Visibility,
    ) -> Result<NoteId> {
        let content = content.to_owned();
        let owner = *owner;

        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO notes (content, owner, visibility) VALUES (?1, ?2, ?3)",
                params![content, owner.as_bytes().as_slice(), visibility.as_u8()],
            )?;

            Ok(NoteId::new(conn.last_insert_rowid() as u64))
        })
        .await
    }

    async fn get_note(&self, id: NoteId) -> Result<Option<Note>> {
        self.with_conn(move |conn| {
            let note = conn
                .query_row(
                    "SELECT id, content, owner, visibility FROM notes WHERE id = ?1",
                    params![id.get() as i64],
                    row_to_note,
                )
                .optional()?;

            match note {
                Some(mut note) => {
                    note.shared_with = load_shares(conn, id)?;
                    Ok(Some(note))
                }
                None => Ok(None),
            }
        })
        .await
    }

    async fn add_share(&self, grant: &ShareGrant) -> Result<bool> {
        let grant = *grant;

        self.with_conn(move |conn| {
            let tx = conn.transaction()?;

            if !note_exists(&tx, grant.note_id)? {
                return Err(StoreError::NotFound(grant.note_id));
            }

            let inserted = tx.execute(
                "INSERT OR IGNORE INTO note_shares (note_id, grantee) VALUES (?1, ?2)",
                params![grant.note_id.get() as i64, grant.grantee.as_bytes().as_slice()],
            )?;

            tx.commit()?;
            Ok(inserted == 1)
        })
        .await
    }

    async fn set_visibility(&self, id: NoteId, visibility: Visibility) -> Result<()> {
        self.with_conn(move |conn| {
            let updated = conn.execute(
                "UPDATE notes SET visibility = ?1 WHERE id = ?2",
                params![visibility.as_u8(), id.get() as i64],
            )?;

            if updated == 0 {
                return Err(StoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn remove_note(&self, id: NoteId) -> Result<bool> {
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;

            tx.execute(
                "DELETE FROM note_shares WHERE note_id = ?1",
                params![id.get() as i64],
            )?;
            let removed = tx.execute("DELETE FROM notes WHERE id = ?1", params![id.get() as i64])?;

            tx.commit()?;
            Ok(removed == 1)
        })
        .await
    }

    async fn notes_by_owner(&self, owner: &Principal) -> Result<Vec<NoteId>> {
        let owner = *owner;

        self.with_conn(move |conn| {
            let mut stmt = conn.prepare("SELECT id FROM notes WHERE owner = ?1 ORDER BY id")?;
            let ids = stmt
                .query_map(params![owner.as_bytes().as_slice()], |row| {
                    row.get::<_, i64>(0)
                })?
                .map(|r| r.map(|id| NoteId::new(id as u64)))
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(ids)
        })
        .await
    }

    async fn count(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
            Ok(count as usize)
        })
        .await
    }

    async fn next_id(&self) -> Result<NoteId> {
        self.with_conn(|conn| {
            // sqlite_sequence has no row for `notes` until the first insert.
            let last: Option<i64> = conn
                .query_row(
                    "SELECT seq FROM sqlite_sequence WHERE name = 'notes'",
                    [],
                    |row| row.get(0),
                )
                .optional()?;

            Ok(NoteId::new(last.unwrap_or(0) as u64).next())
        })
        .await
    }
}
