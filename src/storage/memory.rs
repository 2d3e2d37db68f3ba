use std::{collections::HashMap, sync::Mutex};

use serde_json::Value;

use super::{Collection, Result, StorageBackend};

/// Key-value store kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<Collection, Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a collection, replacing anything stored under it.
    pub fn with(self, collection: Collection, value: Value) -> Self {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(collection, value);
        }
        self
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, collection: Collection) -> Result<Option<Value>> {
        let entries = self.entries.lock().unwrap_or_else(|poison| poison.into_inner());
        Ok(entries.get(&collection).cloned())
    }

    fn put(&self, collection: Collection, value: &Value) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|poison| poison.into_inner());
        entries.insert(collection, value.clone());
        Ok(())
    }
}
