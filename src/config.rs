//! Store configuration
//!
//! Selects which host store a model is opened against: the durable
//! file-backed store or the process-lifetime in-memory store.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::{ModelResult, StoreModel};
use crate::schema::Schema;
use crate::storage::{FileStore, MemoryStore};

/// Host store selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackendConfig {
    /// Durable store, one file per collection under `root`
    Local {
        /// Root directory (default: ".localstore")
        #[serde(default = "default_root")]
        root: PathBuf,
    },
    /// In-memory store living as long as the model
    Session,
}

fn default_root() -> PathBuf {
    PathBuf::from(".localstore")
}

fn default_backend() -> BackendConfig {
    BackendConfig::Session
}

/// Model configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Host store to open (default: session)
    #[serde(default = "default_backend")]
    pub backend: BackendConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
        }
    }
}

impl StoreConfig {
    /// Durable store rooted at `root`
    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self {
            backend: BackendConfig::Local { root: root.into() },
        }
    }

    /// In-memory store
    pub fn session() -> Self {
        Self {
            backend: BackendConfig::Session,
        }
    }

    /// Parses a JSON config document
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Opens the configured backend and binds `schemas` to it
    pub fn open<I, K>(&self, schemas: I) -> ModelResult<StoreModel>
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        match &self.backend {
            BackendConfig::Local { root } => StoreModel::new(FileStore::new(root.clone()), schemas),
            BackendConfig::Session => StoreModel::new(MemoryStore::new(), schemas),
        }
    }
}

/// Model over the durable file-backed store at `root`
pub fn create_local_store_model<I, K>(
    root: impl Into<PathBuf>,
    schemas: I,
) -> ModelResult<StoreModel>
where
    I: IntoIterator<Item = (K, Schema)>,
    K: Into<String>,
{
    StoreConfig::local(root).open(schemas)
}

/// Model over a fresh in-memory store
pub fn create_session_store_model<I, K>(schemas: I) -> ModelResult<StoreModel>
where
    I: IntoIterator<Item = (K, Schema)>,
    K: Into<String>,
{
    StoreConfig::session().open(schemas)
}
