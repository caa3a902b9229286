//! Local Fallback Cache
//!
//! Synchronous string key/value store used as the write-through cache
//! for synced fields. In the browser this is `window.localStorage`.

use std::cell::RefCell;
use std::collections::HashMap;

use super::error::{SyncError, SyncResult};

pub trait LocalCache {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> SyncResult<()>;
}

/// `window.localStorage` with a key prefix
pub struct BrowserStorage {
    prefix: String,
}

impl BrowserStorage {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.storage().is_ok()
    }

    /// Unprefixed read, for documents that live outside the cache namespace
    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.storage().ok()?.get_item(key).ok().flatten()
    }

    fn storage(&self) -> SyncResult<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| SyncError::LocalStorage("no window".to_string()))?
            .local_storage()
            .map_err(|e| SyncError::LocalStorage(format!("{:?}", e)))?
            .ok_or_else(|| SyncError::LocalStorage("localStorage disabled".to_string()))
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

impl LocalCache for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        let storage = self.storage().ok()?;
        storage.get_item(&self.full_key(key)).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> SyncResult<()> {
        self.storage()?
            .set_item(&self.full_key(key), value)
            .map_err(|e| SyncError::LocalStorage(format!("{:?}", e)))
    }
}

/// Process-local cache for tests and non-browser hosts
#[derive(Default)]
pub struct MemoryCache {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        self
    }
}

impl LocalCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> SyncResult<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
