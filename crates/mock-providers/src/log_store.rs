//! In-memory message log store.

use async_trait::async_trait;
use campaign_core::{LogStoreError, MessageLogStore, NewMessageLog};
use tokio::sync::Mutex;

/// A log store that keeps entries in memory. Identifiers start at 1.
#[derive(Debug, Default)]
pub struct MemoryLogStore {
    entries: Mutex<Vec<NewMessageLog>>,
    fail: bool,
}

impl MemoryLogStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose every append fails.
    pub fn failing() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Entries appended so far, in order.
    pub async fn entries(&self) -> Vec<NewMessageLog> {
        self.entries.lock().await.clone()
    }
}

#[async_trait]
impl MessageLogStore for MemoryLogStore {
    async fn append(&self, entry: NewMessageLog) -> Result<i64, LogStoreError> {
        if self.fail {
            return Err(LogStoreError("store unavailable".to_string()));
        }

        let mut entries = self.entries.lock().await;
        entries.push(entry);
        Ok(entries.len() as i64)
    }
}
