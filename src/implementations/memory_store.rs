use std::collections::HashMap;

use crate::errors::{ FlipperError, FlipperResult };
use crate::traits::key_value_store::KeyValueStore;

/// Volatile key-value store, used for ephemeral sessions and tests
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with one entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }

    /// Make every subsequent `set` fail, to simulate a full or read-only disk
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Read without going through the trait, handy for assertions
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> FlipperResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> FlipperResult<()> {
        if self.fail_writes {
            return Err(FlipperError::Persistence(format!("write to {} rejected", key)));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
