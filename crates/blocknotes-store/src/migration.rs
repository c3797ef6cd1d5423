//! Versioned schema for the SQLite backend.
//!
//! `MIGRATIONS[n]` takes the schema from version `n` to `n + 1`. Applied
//! versions are recorded in `schema_migrations`; a database written by a
//! newer build is refused rather than guessed at.

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Result, StoreError};

type Migration = fn(&Connection) -> Result<()>;

const MIGRATIONS: &[Migration] = &[apply_v1];

/// Schema version this build writes.
pub const CURRENT_VERSION: u32 = MIGRATIONS.len() as u32;

/// Highest applied schema version, or 0 for a fresh database.
pub fn schema_version(conn: &Connection) -> Result<u32> {
    let has_table = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_migrations'",
            [],
            |_| Ok(()),
        )
        .optional()?
        .is_some();
    if !has_table {
        return Ok(0);
    }

    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Bring the schema up to [`CURRENT_VERSION`]. Safe to call on every open.
pub fn migrate(conn: &mut Connection) -> Result<()> {
    let found = schema_version(conn)?;
    if found > CURRENT_VERSION {
        return Err(StoreError::Migration(format!(
            "schema version {found} is newer than this build ({CURRENT_VERSION})"
        )));
    }
    if found == CURRENT_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at INTEGER NOT NULL
        )",
        [],
    )?;

    for (step, apply) in MIGRATIONS.iter().enumerate().skip(found as usize) {
        let version = step as u32 + 1;
        tracing::debug!(version, "applying schema migration");
        apply(&tx)?;
        tx.execute(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
            params![version, crate::now_millis()],
        )?;
    }

    tx.commit()?;
    Ok(())
}

/// Migration v1: Initial schema.
fn apply_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- AUTOINCREMENT keeps sqlite from ever reissuing the id of a deleted row.
        CREATE TABLE notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            content TEXT NOT NULL CHECK (length(content) > 0),
            owner BLOB NOT NULL,              -- 32 bytes, Ed25519 public key
            visibility INTEGER NOT NULL CHECK (visibility BETWEEN 0 AND 2)
        );

        -- Append-only share grants. Rows go away only with their note.
        CREATE TABLE note_shares (
            note_id INTEGER NOT NULL,
            grantee BLOB NOT NULL,            -- 32 bytes, Ed25519 public key
            PRIMARY KEY (note_id, grantee)
        );

        CREATE INDEX idx_notes_owner ON notes(owner);
        "#,
    )?;

    Ok(())
}
