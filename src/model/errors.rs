//! Model error types
//!
//! Persisted data that fails to decode is surfaced, never treated as an
//! empty collection.

use thiserror::Error;

use crate::storage::StoreError;

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised by the store engine
#[derive(Debug, Error)]
pub enum ModelError {
    /// The value under a collection key is not a JSON array of objects
    #[error("Failed to decode collection '{key}': {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Records could not be encoded for storage
    #[error("Failed to encode collection '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A stored record did not match the requested Rust type
    #[error("Record in collection '{key}' does not match requested type: {source}")]
    Typed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A JSON value passed as a record is not an object
    #[error("Expected a JSON object record, found {found}")]
    NotARecord { found: &'static str },

    /// Two registered schemas persist under the same key
    #[error("Schemas '{first}' and '{second}' both use storage key '{name}'")]
    DuplicateSchemaName {
        name: String,
        first: String,
        second: String,
    },

    /// The host store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ModelError {
    /// Returns true for malformed persisted data
    pub fn is_decode(&self) -> bool {
        matches!(self, ModelError::Decode { .. })
    }

    /// Returns the collection key involved, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            ModelError::Decode { key, .. }
            | ModelError::Encode { key, .. }
            | ModelError::Typed { key, .. } => Some(key),
            ModelError::DuplicateSchemaName { name, .. } => Some(name),
            ModelError::NotARecord { .. } | ModelError::Store(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_error() -> ModelError {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        ModelError::Decode {
            key: "users".into(),
            source,
        }
    }

    #[test]
    fn test_decode_error_display() {
        let err = decode_error();
        assert!(err.is_decode());
        assert_eq!(err.key(), Some("users"));
        assert!(err.to_string().contains("users"));
    }

    #[test]
    fn test_duplicate_schema_display() {
        let err = ModelError::DuplicateSchemaName {
            name: "users".into(),
            first: "users".into(),
            second: "people".into(),
        };
        let display = err.to_string();
        assert!(display.contains("users"));
        assert!(display.contains("people"));
        assert!(!err.is_decode());
    }

    #[test]
    fn test_store_error_converts() {
        let err: ModelError = StoreError::Poisoned("boom".into()).into();
        assert!(matches!(err, ModelError::Store(_)));
        assert!(err.key().is_none());
    }
}
