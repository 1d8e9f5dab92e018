//! In-memory store

use std::collections::BTreeMap;

use super::traits::KeyValueStore;
use crate::error::DomainResult;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> DomainResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> DomainResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> DomainResult<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }
}
