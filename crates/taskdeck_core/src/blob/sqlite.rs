//! SQLite-backed blob store.
//!
//! # Responsibility
//! - Open file or in-memory SQLite databases holding the blob table.
//! - Apply schema migrations before exposing the store.
//! - Map get/set/remove onto the `blobs` key/value table.
//!
//! # Invariants
//! - A returned store has migrations fully applied.
//! - `set` is an upsert; the table holds at most one row per key.

use super::migrations::apply_migrations;
use super::{BlobResult, BlobStore};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

/// Blob store persisted in a SQLite key/value table.
#[derive(Debug)]
pub struct SqliteBlobStore {
    conn: Connection,
}

impl SqliteBlobStore {
    /// Opens (or creates) a database file and applies pending migrations.
    ///
    /// # Side effects
    /// - Emits `blob_open` logging events with duration and status.
    pub fn open(path: impl AsRef<Path>) -> BlobResult<Self> {
        let started_at = Instant::now();
        info!("event=blob_open module=blob status=start mode=file");
        let conn = Connection::open(path).map_err(|err| {
            error!(
                "event=blob_open module=blob status=error mode=file duration_ms={} error_code=blob_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            err
        })?;
        Self::bootstrap(conn, "file", started_at)
    }

    /// Opens an in-memory database and applies pending migrations.
    ///
    /// The store vanishes when dropped; used by tests and ephemeral runs.
    pub fn open_in_memory() -> BlobResult<Self> {
        let started_at = Instant::now();
        info!("event=blob_open module=blob status=start mode=memory");
        let conn = Connection::open_in_memory().map_err(|err| {
            error!(
                "event=blob_open module=blob status=error mode=memory duration_ms={} error_code=blob_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            err
        })?;
        Self::bootstrap(conn, "memory", started_at)
    }

    fn bootstrap(mut conn: Connection, mode: &str, started_at: Instant) -> BlobResult<Self> {
        conn.busy_timeout(Duration::from_secs(5))?;
        match apply_migrations(&mut conn) {
            Ok(()) => {
                info!(
                    "event=blob_open module=blob status=ok mode={} duration_ms={}",
                    mode,
                    started_at.elapsed().as_millis()
                );
                Ok(Self { conn })
            }
            Err(err) => {
                error!(
                    "event=blob_open module=blob status=error mode={} duration_ms={} error_code=blob_bootstrap_failed error={}",
                    mode,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

impl BlobStore for SqliteBlobStore {
    fn get(&self, key: &str) -> BlobResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM blobs WHERE key = ?1;", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> BlobResult<()> {
        self.conn.execute(
            "INSERT INTO blobs (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> BlobResult<()> {
        self.conn
            .execute("DELETE FROM blobs WHERE key = ?1;", [key])?;
        Ok(())
    }
}
