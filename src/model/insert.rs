//! Insert and set builders

use serde::de::DeserializeOwned;
use tracing::debug;

use super::errors::ModelResult;
use super::input::IntoRecords;
use super::{decode_records, StoreModel};
use crate::schema::{Record, Schema};

/// How new records combine with the persisted collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WriteMode {
    /// Append after the existing records
    Append,
    /// Discard the existing records
    Replace,
}

/// Pending `insert` or `set` against one collection
#[must_use = "an insert does nothing until `values` is called"]
pub struct Insert<'a> {
    model: &'a StoreModel,
    schema: &'a Schema,
    mode: WriteMode,
}

impl<'a> Insert<'a> {
    pub(crate) fn new(model: &'a StoreModel, schema: &'a Schema, mode: WriteMode) -> Self {
        Self {
            model,
            schema,
            mode,
        }
    }

    /// Writes one record or a batch.
    ///
    /// Each record is merged over its own freshly computed default record,
    /// explicit fields winning. In append mode the existing collection is
    /// read first and must decode.
    pub fn values(self, values: impl IntoRecords) -> ModelResult<Inserted> {
        let key = self.model.key_for(self.schema);
        let new_records: Vec<Record> = values
            .into_records()?
            .into_iter()
            .map(|record| with_defaults(self.schema, record))
            .collect();

        let collection = match self.mode {
            WriteMode::Append => {
                let mut existing = self.model.read_collection(key)?;
                existing.extend(new_records.iter().cloned());
                existing
            }
            WriteMode::Replace => new_records.clone(),
        };
        self.model.write_collection(key, &collection)?;

        debug!(
            target: "localstore::model",
            key,
            mode = ?self.mode,
            written = new_records.len(),
            total = collection.len(),
            "records written"
        );

        Ok(Inserted {
            key: key.to_string(),
            records: new_records,
        })
    }
}

/// Result of an insert or set
#[derive(Debug, Clone)]
pub struct Inserted {
    key: String,
    records: Vec<Record>,
}

impl Inserted {
    /// The records just written, defaults applied
    pub fn returning(self) -> Vec<Record> {
        self.records
    }

    /// The records just written, deserialized into `T`
    pub fn returning_as<T: DeserializeOwned>(self) -> ModelResult<Vec<T>> {
        decode_records(&self.key, self.records)
    }

    /// Number of records written
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// `{...defaults, ...record}`
fn with_defaults(schema: &Schema, record: Record) -> Record {
    let mut merged = schema.compute_default_record();
    merged.extend(record);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{number, text};
    use serde_json::json;

    #[test]
    fn test_explicit_fields_win_over_defaults() {
        let schema = Schema::new("users")
            .column("id", text().default(|| "default"))
            .column("age", number().default(|| 1));

        let record = json!({"id": "1"}).as_object().unwrap().clone();
        let merged = with_defaults(&schema, record);

        assert_eq!(merged.get("id"), Some(&json!("1")));
        assert_eq!(merged.get("age"), Some(&json!(1)));
    }

    #[test]
    fn test_explicit_null_is_kept() {
        let schema = Schema::new("users").column("id", text().default(|| "default"));

        let record = json!({"id": null}).as_object().unwrap().clone();
        let merged = with_defaults(&schema, record);
        assert_eq!(merged.get("id"), Some(&json!(null)));
    }

    #[test]
    fn test_undeclared_fields_pass_through() {
        let schema = Schema::new("users");

        let record = json!({"extra": true}).as_object().unwrap().clone();
        let merged = with_defaults(&schema, record);
        assert_eq!(merged.get("extra"), Some(&json!(true)));
    }
}
