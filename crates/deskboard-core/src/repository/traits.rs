//! Repository Layer - Core Traits
//!
//! String key/value persistence. Browser local storage in the app,
//! an in-memory map in tests.

use crate::error::DomainResult;

/// Minimal key/value store the applets persist into
pub trait KeyValueStore {
    /// Value stored under `key`, `None` when absent
    fn get(&self, key: &str) -> DomainResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> DomainResult<()>;

    fn remove(&mut self, key: &str) -> DomainResult<()>;

    /// Every key currently stored
    fn keys(&self) -> DomainResult<Vec<String>>;
}
