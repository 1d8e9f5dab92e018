//! Storage Commands
//!
//! `window.localStorage` as the applets' key/value store.

use deskboard_core::config::CONFIG_KEY;
use deskboard_core::repository::KeyValueStore;
use deskboard_core::{DomainError, DomainResult, SuiteConfig};

use super::{js_error, window};

/// Handle to the browser's local storage. Stateless: every call looks the storage up again.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

fn local_storage() -> Result<web_sys::Storage, String> {
    window()?
        .local_storage()
        .map_err(js_error)?
        .ok_or_else(|| "local storage is unavailable".to_string())
}

fn storage_err(e: String) -> DomainError {
    DomainError::Storage(e)
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> DomainResult<Option<String>> {
        local_storage()
            .and_then(|s| s.get_item(key).map_err(js_error))
            .map_err(storage_err)
    }

    fn set(&mut self, key: &str, value: &str) -> DomainResult<()> {
        // Quota errors surface here
        local_storage()
            .and_then(|s| s.set_item(key, value).map_err(js_error))
            .map_err(storage_err)
    }

    fn remove(&mut self, key: &str) -> DomainResult<()> {
        local_storage()
            .and_then(|s| s.remove_item(key).map_err(js_error))
            .map_err(storage_err)
    }

    fn keys(&self) -> DomainResult<Vec<String>> {
        let storage = local_storage().map_err(storage_err)?;
        let len = storage.length().map_err(|e| storage_err(js_error(e)))?;
        let mut keys = Vec::with_capacity(len as usize);
        for i in 0..len {
            if let Ok(Some(key)) = storage.key(i) {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}

/// Suite configuration, with the optional override stored under `deskboard-config`
pub fn load_config() -> SuiteConfig {
    match LocalStorage.get(CONFIG_KEY) {
        Ok(Some(raw)) => match SuiteConfig::from_json(&raw) {
            Ok(config) => {
                log::info!("[CONFIG] Using stored configuration override");
                config
            }
            Err(e) => {
                log::warn!("[CONFIG] Ignoring unreadable override: {}", e);
                SuiteConfig::default()
            }
        },
        Ok(None) => SuiteConfig::default(),
        Err(e) => {
            log::warn!("[CONFIG] {}", e);
            SuiteConfig::default()
        }
    }
}
