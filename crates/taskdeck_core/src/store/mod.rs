//! Persistent session/user and task stores.
//!
//! # Responsibility
//! - Own the in-memory roster, session and task state.
//! - Mirror every mutation synchronously into the blob store as JSON.
//! - Restore state from the persisted keys on open.
//!
//! # Invariants
//! - Mutations serialize the next state and write it to the blob store
//!   before the in-memory commit; a failed write leaves memory and blob
//!   agreeing on the old state.
//! - Persisted payloads live under the fixed keys `currentUser`, `users`
//!   and `tasks` in the original camelCase JSON shapes.

use crate::blob::{BlobError, BlobStore};
use crate::model::task::TaskValidationError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod session_store;
pub mod task_store;

pub use session_store::SessionStore;
pub use task_store::TaskStore;

/// Blob key holding the persisted session user.
pub const CURRENT_USER_KEY: &str = "currentUser";
/// Blob key holding the persisted user roster.
pub const USERS_KEY: &str = "users";
/// Blob key holding the persisted task sequence.
pub const TASKS_KEY: &str = "tasks";

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    /// The blob store failed while reading, writing or removing a key.
    Persistence {
        key: &'static str,
        source: BlobError,
    },
    /// A state value could not be serialized for persistence.
    Encode {
        key: &'static str,
        source: serde_json::Error,
    },
    /// A persisted payload is not valid JSON of the expected shape.
    Decode {
        key: &'static str,
        source: serde_json::Error,
    },
    /// A restored or outgoing record violates a model invariant.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Persistence { key, source } => {
                write!(f, "blob store failed for key `{key}`: {source}")
            }
            Self::Encode { key, source } => {
                write!(f, "failed to encode payload for key `{key}`: {source}")
            }
            Self::Decode { key, source } => {
                write!(f, "malformed payload under key `{key}`: {source}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted state: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence { source, .. } => Some(source),
            Self::Encode { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::InvalidData(value.to_string())
    }
}

/// Reads and decodes one persisted key; `None` when the key is absent.
pub(crate) fn read_json<T: DeserializeOwned>(
    blob: &dyn BlobStore,
    key: &'static str,
) -> StoreResult<Option<T>> {
    let payload = blob
        .get(key)
        .map_err(|source| StoreError::Persistence { key, source })?;
    match payload {
        Some(raw) => {
            let value =
                serde_json::from_str(&raw).map_err(|source| StoreError::Decode { key, source })?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// Serializes a value and writes it under one persisted key.
///
/// Encoding happens before the blob write, so an encode failure never
/// touches the blob store.
pub(crate) fn write_json<T: Serialize>(
    blob: &dyn BlobStore,
    key: &'static str,
    value: &T,
) -> StoreResult<()> {
    let payload =
        serde_json::to_string(value).map_err(|source| StoreError::Encode { key, source })?;
    blob.set(key, &payload)
        .map_err(|source| StoreError::Persistence { key, source })
}

/// Removes one persisted key; removing an absent key is not an error.
pub(crate) fn remove_key(blob: &dyn BlobStore, key: &'static str) -> StoreResult<()> {
    blob.remove(key)
        .map_err(|source| StoreError::Persistence { key, source })
}
