//! Backend-agnostic storage trait for string-keyed boolean flags.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StorageError;

/// Durable store for string-keyed boolean flags.
///
/// The tour persists exactly one value through this trait: the
/// completion flag. An absent key means "never seen".
#[async_trait]
pub trait FlagStore: Send + Sync {
    /// Read a flag. `Ok(None)` when the key has never been written.
    async fn get_flag(&self, key: &str) -> Result<Option<bool>, StorageError>;

    /// Write a flag, creating or overwriting the key.
    async fn set_flag(&self, key: &str, value: bool) -> Result<(), StorageError>;

    /// Remove a flag. Returns whether the key existed.
    async fn clear_flag(&self, key: &str) -> Result<bool, StorageError>;
}

/// In-memory flag store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryFlagStore {
    flags: RwLock<HashMap<String, bool>>,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FlagStore for MemoryFlagStore {
    async fn get_flag(&self, key: &str) -> Result<Option<bool>, StorageError> {
        Ok(self.flags.read().await.get(key).copied())
    }

    async fn set_flag(&self, key: &str, value: bool) -> Result<(), StorageError> {
        self.flags.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn clear_flag(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.flags.write().await.remove(key).is_some())
    }
}
