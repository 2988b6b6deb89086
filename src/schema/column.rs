//! Column descriptors
//!
//! A `Column` describes one field of a record: its semantic type, whether it
//! is required on insert, an optional default generator, and whether it is
//! transient. Descriptors are immutable values. `required()`, `transient()`
//! and `default()` each return a new descriptor with exactly one attribute
//! changed, so the order they are chained in does not matter as long as a
//! shared generator is passed through `default_with`.

use std::fmt;
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use super::types::ValueType;

/// Generator for a column's default value.
///
/// Invoked once per default computation; results are never cached.
pub type DefaultFn = Arc<dyn Fn() -> Value + Send + Sync>;

/// Per-field metadata for a collection schema
#[derive(Clone)]
pub struct Column {
    value_type: ValueType,
    required: bool,
    transient: bool,
    default_fn: Option<DefaultFn>,
}

impl Column {
    /// Create a plain optional column of the given type
    pub fn new(value_type: ValueType) -> Self {
        Self {
            value_type,
            required: false,
            transient: false,
            default_fn: None,
        }
    }

    /// Returns a copy marked as required.
    ///
    /// Required is a declaration for callers; the engine never rejects a
    /// record that omits a required field.
    pub fn required(&self) -> Self {
        Self {
            required: true,
            ..self.clone()
        }
    }

    /// Returns a copy marked as transient.
    ///
    /// Transient columns are still persisted.
    pub fn transient(&self) -> Self {
        Self {
            transient: true,
            ..self.clone()
        }
    }

    /// Returns a copy whose default is produced by `f`.
    ///
    /// Calling this again replaces the generator. Each call wraps `f` in a
    /// new generator, and column equality compares generators by identity,
    /// so two columns built from separate `default` calls are never equal.
    /// Share one [`DefaultFn`] through [`Column::default_with`] when columns
    /// must compare equal.
    pub fn default<F, V>(&self, f: F) -> Self
    where
        F: Fn() -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        Self {
            default_fn: Some(Arc::new(move || f().into())),
            ..self.clone()
        }
    }

    /// Returns a copy using an already shared generator, keeping its identity
    pub fn default_with(&self, f: DefaultFn) -> Self {
        Self {
            default_fn: Some(f),
            ..self.clone()
        }
    }

    /// Semantic type of the field
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_transient(&self) -> bool {
        self.transient
    }

    pub fn has_default(&self) -> bool {
        self.default_fn.is_some()
    }

    /// The default generator, if any
    pub fn default_fn(&self) -> Option<&DefaultFn> {
        self.default_fn.as_ref()
    }

    /// Invokes the default generator
    pub fn generate_default(&self) -> Option<Value> {
        self.default_fn.as_ref().map(|f| f())
    }
}

/// Two columns are equal when all flags match and they share the same
/// default generator (by identity, not by output).
impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        let same_default = match (&self.default_fn, &other.default_fn) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        self.value_type == other.value_type
            && self.required == other.required
            && self.transient == other.transient
            && same_default
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("value_type", &self.value_type)
            .field("required", &self.required)
            .field("transient", &self.transient)
            .field("has_default", &self.has_default())
            .finish()
    }
}

/// Text column
pub fn text() -> Column {
    Column::new(ValueType::Text)
}

/// Number column
pub fn number() -> Column {
    Column::new(ValueType::Number)
}

/// Boolean column
pub fn boolean() -> Column {
    Column::new(ValueType::Boolean)
}

/// Date column, stored as an RFC 3339 string
pub fn date() -> Column {
    Column::new(ValueType::Date)
}

/// Untyped JSON column
pub fn json() -> Column {
    Column::new(ValueType::Json)
}

/// Text column defaulting to a fresh v4 UUID per record
pub fn uuid() -> Column {
    text().default(|| ::uuid::Uuid::new_v4().to_string())
}

/// Date column defaulting to the current UTC time per record
pub fn timestamp() -> Column {
    date().default(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
}
