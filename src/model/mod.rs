//! Store engine
//!
//! `StoreModel` binds one host store to a set of registered schemas and
//! runs collection-level CRUD against it. Each collection is one JSON array
//! of objects stored under its schema's name.
//!
//! Every mutating call is a read-modify-write against the host store with
//! no locking around it. Two interleaved operations on the same collection
//! can lose an update.
//!
//! # Usage
//!
//! ```
//! use localstore::model::StoreModel;
//! use localstore::schema::{create_schema, number, text};
//! use localstore::storage::MemoryStore;
//! use serde_json::json;
//!
//! let users = create_schema(
//!     "users",
//!     [("age", number().required()), ("id", text().default(|| "d"))],
//! );
//! let model = StoreModel::new(MemoryStore::new(), [("users", users.clone())]).unwrap();
//!
//! model.insert(&users).values(json!({"age": 20})).unwrap();
//! assert_eq!(model.get(&users).unwrap()[0]["id"], "d");
//! ```

mod errors;
mod input;
mod insert;
mod update;

pub use errors::{ModelError, ModelResult};
pub use input::{IntoRecord, IntoRecords};
pub use insert::{Insert, Inserted};
pub use update::{Update, Updated};

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::schema::{Record, Schema};
use crate::storage::{HostStore, StoreError};
use insert::WriteMode;

/// Typed CRUD engine over a host store
pub struct StoreModel {
    store: Arc<dyn HostStore>,
    /// Registered schemas by registration name
    schemas: BTreeMap<String, Schema>,
}

impl StoreModel {
    /// Binds `store` to the given `(registration name, schema)` pairs.
    ///
    /// A later pair with the same registration name replaces an earlier one.
    ///
    /// # Errors
    ///
    /// `DuplicateSchemaName` if two registered schemas share a storage key.
    pub fn new<I, K>(store: impl HostStore + 'static, schemas: I) -> ModelResult<Self>
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        Self::with_shared(Arc::new(store), schemas)
    }

    /// Like [`StoreModel::new`] but keeps a handle the caller can share
    pub fn with_shared<I, K>(store: Arc<dyn HostStore>, schemas: I) -> ModelResult<Self>
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        let schemas: BTreeMap<String, Schema> = schemas
            .into_iter()
            .map(|(alias, schema)| (alias.into(), schema))
            .collect();

        let mut owners: BTreeMap<&str, &str> = BTreeMap::new();
        for (alias, schema) in &schemas {
            if let Some(first) = owners.insert(schema.name(), alias) {
                return Err(ModelError::DuplicateSchemaName {
                    name: schema.name().to_string(),
                    first: first.to_string(),
                    second: alias.clone(),
                });
            }
        }

        Ok(Self { store, schemas })
    }

    /// Registered schemas by registration name
    pub fn schemas(&self) -> &BTreeMap<String, Schema> {
        &self.schemas
    }

    /// Looks up a registered schema by registration name
    pub fn schema(&self, alias: &str) -> Option<&Schema> {
        self.schemas.get(alias)
    }

    /// The underlying host store
    pub fn store(&self) -> &Arc<dyn HostStore> {
        &self.store
    }

    /// Reads the whole collection.
    ///
    /// An absent key reads as empty. Records come back exactly as stored;
    /// defaults are applied only on write.
    pub fn get(&self, schema: &Schema) -> ModelResult<Vec<Record>> {
        self.read_collection(self.key_for(schema))
    }

    /// Reads the whole collection, deserializing each record into `T`
    pub fn get_as<T: DeserializeOwned>(&self, schema: &Schema) -> ModelResult<Vec<T>> {
        let key = self.key_for(schema);
        decode_records(key, self.read_collection(key)?)
    }

    /// Appends records to the collection
    pub fn insert<'a>(&'a self, schema: &'a Schema) -> Insert<'a> {
        Insert::new(self, schema, WriteMode::Append)
    }

    /// Replaces the collection with new records
    pub fn set<'a>(&'a self, schema: &'a Schema) -> Insert<'a> {
        Insert::new(self, schema, WriteMode::Replace)
    }

    /// Starts a predicate-filtered update
    pub fn update<'a>(&'a self, schema: &'a Schema) -> Update<'a> {
        Update::new(self, schema)
    }

    /// Removes the collection key
    pub fn clear(&self, schema: &Schema) -> ModelResult<()> {
        let key = self.key_for(schema);
        self.store.remove_item(key)?;
        debug!(target: "localstore::model", key, "collection cleared");
        Ok(())
    }

    /// Removes the key of every registered schema
    pub fn clear_all(&self) -> ModelResult<()> {
        for schema in self.schemas.values() {
            self.store.remove_item(schema.name())?;
        }
        debug!(target: "localstore::model", count = self.schemas.len(), "all collections cleared");
        Ok(())
    }

    fn key_for<'s>(&self, schema: &'s Schema) -> &'s str {
        let key = schema.name();
        if !self.schemas.values().any(|s| s.name() == key) {
            warn!(target: "localstore::model", key, "schema is not registered with this model");
        }
        key
    }

    pub(crate) fn read_collection(&self, key: &str) -> ModelResult<Vec<Record>> {
        let raw = match self.store.get_item(key) {
            Ok(Some(raw)) if !raw.is_empty() => raw.into_bytes(),
            Ok(_) => return Ok(Vec::new()),
            // Undecodable bytes are corrupt content, not a host failure
            Err(StoreError::InvalidUtf8 { source, .. }) => source.into_bytes(),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&raw).map_err(|source| {
            warn!(target: "localstore::model", key, error = %source, "stored collection is malformed");
            ModelError::Decode {
                key: key.to_string(),
                source,
            }
        })
    }

    pub(crate) fn write_collection(&self, key: &str, records: &[Record]) -> ModelResult<()> {
        let encoded = serde_json::to_string(records).map_err(|source| ModelError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.store.set_item(key, &encoded)?;
        Ok(())
    }
}

impl std::fmt::Debug for StoreModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreModel")
            .field("schemas", &self.schemas.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

pub(crate) fn decode_records<T: DeserializeOwned>(
    key: &str,
    records: Vec<Record>,
) -> ModelResult<Vec<T>> {
    records
        .into_iter()
        .map(|record| {
            serde_json::from_value(Value::Object(record)).map_err(|source| ModelError::Typed {
                key: key.to_string(),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{number, text};
    use crate::storage::MemoryStore;
    use serde::Deserialize;
    use serde_json::json;

    fn users() -> Schema {
        Schema::new("users")
            .column("age", number().required())
            .column("id", text().default(|| "d"))
    }

    fn model_with(store: Arc<MemoryStore>) -> StoreModel {
        StoreModel::with_shared(store, [("users", users())]).unwrap()
    }

    #[test]
    fn test_get_absent_is_empty() {
        let model = model_with(Arc::new(MemoryStore::new()));
        assert!(model.get(&users()).unwrap().is_empty());
    }

    #[test]
    fn test_empty_string_reads_as_absent() {
        let store = Arc::new(MemoryStore::new());
        store.set_item("users", "").unwrap();
        let model = model_with(store);
        assert!(model.get(&users()).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_collection_is_decode_error() {
        let store = Arc::new(MemoryStore::new());
        store.set_item("users", "{not json").unwrap();
        let model = model_with(store);

        assert!(model.get(&users()).unwrap_err().is_decode());
    }

    #[test]
    fn test_array_of_non_objects_is_decode_error() {
        let store = Arc::new(MemoryStore::new());
        store.set_item("users", "[1, 2]").unwrap();
        let model = model_with(store);

        assert!(model.get(&users()).unwrap_err().is_decode());
    }

    #[test]
    fn test_persisted_format_is_plain_json_array() {
        let store = Arc::new(MemoryStore::new());
        let model = model_with(store.clone());
        model.insert(&users()).values(json!({"age": 20})).unwrap();

        let raw = store.get_item("users").unwrap().unwrap();
        let parsed: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, json!([{"age": 20, "id": "d"}]));
    }

    #[test]
    fn test_duplicate_storage_key_rejected() {
        let a = Schema::new("shared");
        let b = Schema::new("shared");
        let err = StoreModel::new(MemoryStore::new(), [("a", a), ("b", b)]).unwrap_err();

        match err {
            ModelError::DuplicateSchemaName { name, first, second } => {
                assert_eq!(name, "shared");
                assert_eq!(first, "a");
                assert_eq!(second, "b");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_get_as_deserializes_records() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct User {
            age: u32,
            id: String,
        }

        let model = model_with(Arc::new(MemoryStore::new()));
        model.insert(&users()).values(json!({"age": 20})).unwrap();

        let typed: Vec<User> = model.get_as(&users()).unwrap();
        assert_eq!(
            typed,
            vec![User {
                age: 20,
                id: "d".into()
            }]
        );
    }

    #[test]
    fn test_get_as_reports_shape_mismatch() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Strict {
            missing: String,
        }

        let model = model_with(Arc::new(MemoryStore::new()));
        model.insert(&users()).values(json!({"age": 20})).unwrap();

        let err = model.get_as::<Strict>(&users()).unwrap_err();
        assert!(matches!(err, ModelError::Typed { .. }));
    }

    #[test]
    fn test_unregistered_schema_still_works() {
        let model = model_with(Arc::new(MemoryStore::new()));
        let other = Schema::new("other");

        model.insert(&other).values(json!({"x": 1})).unwrap();
        assert_eq!(model.get(&other).unwrap().len(), 1);

        model.clear_all().unwrap();
        assert_eq!(model.get(&other).unwrap().len(), 1);
    }
}
