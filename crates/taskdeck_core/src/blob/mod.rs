//! String-keyed blob persistence substrate.
//!
//! # Responsibility
//! - Define the get/set/remove contract the stores persist through.
//! - Provide the process-local and SQLite-backed implementations.
//!
//! # Invariants
//! - Operations are synchronous and run to completion on the caller's
//!   thread; no implementation may suspend or retry internally.
//! - `get` of an absent key is `Ok(None)`, never an error.
//! - `remove` of an absent key is `Ok(())`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;

mod memory;
mod sqlite;

pub use memory::MemoryBlobStore;
pub use sqlite::SqliteBlobStore;

pub type BlobResult<T> = Result<T, BlobError>;

/// Failure raised by a blob store implementation.
#[derive(Debug)]
pub enum BlobError {
    Sqlite(rusqlite::Error),
    /// Stored schema is newer than this binary understands.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Backend refused or lost the operation (host storage unavailable,
    /// quota exceeded, injected test failure).
    Unavailable(String),
}

impl Display for BlobError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "blob schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Unavailable(message) => write!(f, "blob store unavailable: {message}"),
        }
    }
}

impl Error for BlobError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
            Self::Unavailable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for BlobError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Opaque string-keyed blob storage, as provided by the host environment.
///
/// The stores treat this as their only persistence substrate: every value
/// is an opaque string (stores write JSON) under a fixed key. Methods take
/// `&self`; implementations with internal state use interior mutability,
/// which is safe under the crate's single-threaded execution model.
pub trait BlobStore {
    /// Returns the stored value for `key`, or `None` when absent.
    fn get(&self, key: &str) -> BlobResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> BlobResult<()>;
    /// Deletes `key`; absent keys are ignored.
    fn remove(&self, key: &str) -> BlobResult<()>;
}
