//! Update builder
//!
//! Predicates given to `where_` accumulate by logical AND; no predicate
//! matches every record. Executing the update rewrites the collection as
//! the non-matching records followed by the updated ones, so updated
//! records move to the end.

use serde::de::DeserializeOwned;
use tracing::debug;

use super::errors::ModelResult;
use super::input::IntoRecord;
use super::{decode_records, StoreModel};
use crate::schema::{Record, Schema};

type Predicate<'a> = Box<dyn Fn(&Record) -> bool + 'a>;

/// Pending update against one collection
#[must_use = "an update does nothing until `value` is called"]
pub struct Update<'a> {
    model: &'a StoreModel,
    schema: &'a Schema,
    predicates: Vec<Predicate<'a>>,
}

impl<'a> Update<'a> {
    pub(crate) fn new(model: &'a StoreModel, schema: &'a Schema) -> Self {
        Self {
            model,
            schema,
            predicates: Vec::new(),
        }
    }

    /// Narrows the match set to records for which `predicate` also holds
    #[doc(alias = "where")]
    pub fn where_<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Record) -> bool + 'a,
    {
        self.predicates.push(Box::new(predicate));
        self
    }

    fn matches(&self, record: &Record) -> bool {
        self.predicates.iter().all(|p| p(record))
    }

    /// Shallow-merges `partial` into every matching record and persists.
    ///
    /// Predicates see each record as it was before the update.
    pub fn value(self, partial: impl IntoRecord) -> ModelResult<Updated> {
        let partial = partial.into_record()?;
        let key = self.model.key_for(self.schema);
        let all = self.model.read_collection(key)?;

        let (matched, mut rest): (Vec<Record>, Vec<Record>) =
            all.into_iter().partition(|record| self.matches(record));

        let updated: Vec<Record> = matched
            .into_iter()
            .map(|mut record| {
                record.extend(partial.clone());
                record
            })
            .collect();

        let rest_len = rest.len();
        rest.extend(updated.iter().cloned());
        self.model.write_collection(key, &rest)?;

        debug!(
            target: "localstore::model",
            key,
            matched = updated.len(),
            rest = rest_len,
            "records updated"
        );

        Ok(Updated {
            key: key.to_string(),
            records: updated,
        })
    }

    /// Same as [`Update::value`]
    pub fn values(self, partial: impl IntoRecord) -> ModelResult<Updated> {
        self.value(partial)
    }
}

/// Result of an update
#[derive(Debug, Clone)]
pub struct Updated {
    key: String,
    records: Vec<Record>,
}

impl Updated {
    /// Only the records that matched, after the merge
    pub fn returning(self) -> Vec<Record> {
        self.records
    }

    /// The updated records, deserialized into `T`
    pub fn returning_as<T: DeserializeOwned>(self) -> ModelResult<Vec<T>> {
        decode_records(&self.key, self.records)
    }

    /// Number of records that matched
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
