//! Conversions from caller input into records

use serde_json::Value;

use super::errors::{ModelError, ModelResult};
use crate::schema::Record;

/// Input accepted by `values(..)`: one record or a batch of records
pub trait IntoRecords {
    fn into_records(self) -> ModelResult<Vec<Record>>;
}

/// Input accepted by an update payload: exactly one record
pub trait IntoRecord {
    fn into_record(self) -> ModelResult<Record>;
}

impl IntoRecord for Record {
    fn into_record(self) -> ModelResult<Record> {
        Ok(self)
    }
}

impl IntoRecord for Value {
    fn into_record(self) -> ModelResult<Record> {
        match self {
            Value::Object(record) => Ok(record),
            other => Err(ModelError::NotARecord {
                found: json_type_name(&other),
            }),
        }
    }
}

impl IntoRecords for Record {
    fn into_records(self) -> ModelResult<Vec<Record>> {
        Ok(vec![self])
    }
}

impl IntoRecords for Vec<Record> {
    fn into_records(self) -> ModelResult<Vec<Record>> {
        Ok(self)
    }
}

impl<const N: usize> IntoRecords for [Record; N] {
    fn into_records(self) -> ModelResult<Vec<Record>> {
        Ok(self.into())
    }
}

impl IntoRecords for Vec<Value> {
    fn into_records(self) -> ModelResult<Vec<Record>> {
        self.into_iter().map(IntoRecord::into_record).collect()
    }
}

/// An array is a batch; any other value must be a single object.
impl IntoRecords for Value {
    fn into_records(self) -> ModelResult<Vec<Record>> {
        match self {
            Value::Array(items) => items.into_records(),
            other => Ok(vec![other.into_record()?]),
        }
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
