//! Persistence adapter for the "seen" completion flag.
//!
//! Storage failures never reach the tour: `read` degrades to
//! "never seen" and `write`/`clear` become silent no-ops, while an
//! in-memory shadow keeps the rest of the session self-consistent.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::store::FlagStore;

/// The durable single-boolean completion flag, with an in-memory shadow.
pub struct CompletionFlag {
    store: Arc<dyn FlagStore>,
    key: String,
    /// Last value observed or written this session. Once set, it takes
    /// precedence over the backing store.
    shadow: RwLock<Option<bool>>,
}

impl CompletionFlag {
    pub fn new(store: Arc<dyn FlagStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            shadow: RwLock::new(None),
        }
    }

    /// Whether the tour has been seen. Absent key and storage failures
    /// both read as `false`.
    pub async fn read(&self) -> bool {
        if let Some(value) = *self.shadow.read().await {
            return value;
        }

        let value = match self.store.get_flag(&self.key).await {
            Ok(stored) => stored.unwrap_or(false),
            Err(e) => {
                tracing::warn!(key = %self.key, "Flag read failed, treating as never-seen: {e}");
                false
            }
        };
        *self.shadow.write().await = Some(value);
        value
    }

    /// Record the flag. The shadow is updated first so the session stays
    /// consistent even when durable storage is unavailable.
    pub async fn write(&self, value: bool) {
        *self.shadow.write().await = Some(value);
        if let Err(e) = self.store.set_flag(&self.key, value).await {
            tracing::warn!(key = %self.key, "Flag write failed, keeping in-memory value: {e}");
        }
    }

    /// Clear the flag, durably and in the shadow.
    pub async fn clear(&self) {
        *self.shadow.write().await = Some(false);
        if let Err(e) = self.store.clear_flag(&self.key).await {
            tracing::warn!(key = %self.key, "Flag clear failed: {e}");
        }
    }
}
