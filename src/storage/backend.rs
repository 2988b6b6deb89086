//! # Host Store Trait

use std::sync::Arc;

use super::errors::StoreResult;

/// Synchronous string-keyed key-value store the engine persists into.
///
/// Implementations take `&self` and handle their own interior mutability.
/// No call is atomic with respect to any other call.
pub trait HostStore: Send + Sync {
    /// Read the value under `key`, `None` if absent
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`; removing an absent key is not an error
    fn remove_item(&self, key: &str) -> StoreResult<()>;
}

impl<T: HostStore + ?Sized> HostStore for Arc<T> {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        (**self).remove_item(key)
    }
}

impl<T: HostStore + ?Sized> HostStore for Box<T> {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        (**self).remove_item(key)
    }
}
