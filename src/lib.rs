//! localstore - typed collections over a string-keyed host store
//!
//! Callers describe record collections with schemas of typed columns,
//! register them with a [`StoreModel`] bound to a [`HostStore`], and then
//! get, insert, set, update and clear whole collections. Each collection is
//! persisted as one JSON array under its schema name.
//!
//! # Modules
//!
//! - [`schema`]: column descriptors and collection schemas
//! - [`storage`]: the host store capability and its backends
//! - [`model`]: the CRUD engine
//! - [`config`]: backend selection and model factories

pub mod config;
pub mod model;
pub mod schema;
pub mod storage;

pub use config::{create_local_store_model, create_session_store_model, BackendConfig, StoreConfig};
pub use model::{ModelError, ModelResult, StoreModel};
pub use schema::{create_schema, Column, Record, Schema, ValueType};
pub use storage::{FileStore, HostStore, MemoryStore, StoreError};
