//! In-memory implementation of the StateStore trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{LedgerError, Result};
use crate::traits::{validate_key, StateStore};

/// In-memory world state.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryStore {
    state: RwLock<BTreeMap<String, Bytes>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of keys holding a value.
    pub fn len(&self) -> usize {
        self.state.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, Bytes>>> {
        self.state
            .read()
            .map_err(|e| LedgerError::Unavailable(format!("lock poisoned: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, Bytes>>> {
        self.state
            .write()
            .map_err(|e| LedgerError::Unavailable(format!("lock poisoned: {}", e)))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn get_state(&self, key: &str) -> Result<Option<Bytes>> {
        validate_key(key)?;
        Ok(self.read()?.get(key).cloned())
    }

    async fn put_state(&self, key: &str, value: &[u8]) -> Result<()> {
        validate_key(key)?;
        self.write()?
            .insert(key.to_string(), Bytes::copy_from_slice(value));
        Ok(())
    }

    async fn delete_state(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.write()?.remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        Ok(self.read()?.keys().cloned().collect())
    }
}
