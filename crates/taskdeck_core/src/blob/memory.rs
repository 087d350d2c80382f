//! In-memory blob store.
//!
//! # Responsibility
//! - Stand in for host key-value storage in tests and ephemeral runs.
//!
//! # Invariants
//! - Never fails; every operation is a plain map access.
//! - Single-threaded use only (interior mutability via `RefCell`).

use super::{BlobResult, BlobStore};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Process-local blob store backed by an ordered map.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> BlobResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> BlobResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> BlobResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
