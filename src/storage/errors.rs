//! Host store errors

use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Result type for host store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures raised by a host store implementation.
///
/// A missing key is not an error; `get_item` reports it as `None`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Disk I/O failed for a key
    #[error("I/O error on key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    /// The stored bytes are not valid UTF-8
    #[error("Stored value for key '{key}' is not valid UTF-8: {source}")]
    InvalidUtf8 {
        key: String,
        #[source]
        source: FromUtf8Error,
    },

    /// The store's lock was poisoned by a panicking writer
    #[error("Store lock poisoned: {0}")]
    Poisoned(String),
}

impl StoreError {
    /// Create an I/O error for the given key
    pub fn io(key: impl Into<String>, source: io::Error) -> Self {
        StoreError::Io {
            key: key.into(),
            source,
        }
    }

    /// Create an invalid UTF-8 error for the given key
    pub fn invalid_utf8(key: impl Into<String>, source: FromUtf8Error) -> Self {
        StoreError::InvalidUtf8 {
            key: key.into(),
            source,
        }
    }
}
