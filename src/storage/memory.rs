//! # In-Memory Backend
//!
//! Session-scoped store: contents live as long as the value does.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::backend::HostStore;
use super::errors::{StoreError, StoreResult};

/// In-memory host store
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held, still readable after a writer panicked
    pub fn len(&self) -> usize {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every key
    pub fn clear(&self) -> StoreResult<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        items.clear();
        Ok(())
    }
}

impl HostStore for MemoryStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let items = self
            .items
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get() {
        let store = MemoryStore::new();
        store.set_item("users", "[]").unwrap();
        assert_eq!(store.get_item("users").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_missing_key_is_none() {
        let store = MemoryStore::new();
        assert!(store.get_item("nope").unwrap().is_none());
    }

    #[test]
    fn test_overwrite() {
        let store = MemoryStore::new();
        store.set_item("k", "a").unwrap();
        store.set_item("k", "b").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("b"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_absent_key_is_ok() {
        let store = MemoryStore::new();
        store.remove_item("ghost").unwrap();

        store.set_item("k", "v").unwrap();
        store.remove_item("k").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear() {
        let store = MemoryStore::new();
        store.set_item("a", "1").unwrap();
        store.set_item("b", "2").unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_poisoned_lock() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(MemoryStore::new());
        store.set_item("a", "1").unwrap();
        store.set_item("b", "2").unwrap();

        let poisoner = store.clone();
        let result = thread::spawn(move || {
            let _guard = poisoner.items.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();
        assert!(result.is_err());

        assert_eq!(store.len(), 2);
        assert!(!store.is_empty());
        assert!(matches!(store.get_item("a"), Err(StoreError::Poisoned(_))));
        assert!(matches!(store.set_item("c", "3"), Err(StoreError::Poisoned(_))));
    }
}
