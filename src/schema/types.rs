//! Field value types and the record shape stored in a collection
//!
//! Supported types:
//! - text: UTF-8 string
//! - number: JSON number
//! - boolean: JSON boolean
//! - date: RFC 3339 timestamp string
//! - json: any JSON value
//!
//! The engine never checks a value against its declared type. The type is
//! carried so callers can inspect a schema and pick a matching Rust type
//! for typed access.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One stored entity: field name to JSON value.
///
/// No declared field is enforced at runtime; any subset may be present.
pub type Record = Map<String, Value>;

/// Semantic type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// UTF-8 string
    Text,
    /// JSON number (integer or float)
    Number,
    /// Boolean
    Boolean,
    /// Timestamp, persisted as an RFC 3339 string
    Date,
    /// Arbitrary JSON
    Json,
}

impl ValueType {
    /// Returns the type name for messages and debugging
    pub fn type_name(&self) -> &'static str {
        match self {
            ValueType::Text => "text",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
            ValueType::Date => "date",
            ValueType::Json => "json",
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(ValueType::Text.type_name(), "text");
        assert_eq!(ValueType::Number.type_name(), "number");
        assert_eq!(ValueType::Boolean.type_name(), "boolean");
        assert_eq!(ValueType::Date.type_name(), "date");
        assert_eq!(ValueType::Json.type_name(), "json");
    }

    #[test]
    fn test_serde_lowercase() {
        let encoded = serde_json::to_string(&ValueType::Date).unwrap();
        assert_eq!(encoded, "\"date\"");

        let decoded: ValueType = serde_json::from_str("\"number\"").unwrap();
        assert_eq!(decoded, ValueType::Number);
    }
}
