//! # Local Filesystem Backend
//!
//! Durable store keeping one file per key under a root directory. File names
//! are the URL-safe base64 of the key, so any key string maps to a valid
//! name. Keys whose encoding would exceed the filesystem's name limit are
//! named by their SHA-256 digest instead, with a distinct suffix so the two
//! schemes never collide. Writes go to a temp file that is fsynced and
//! renamed over the target.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use sha2::{Digest, Sha256};
use tracing::trace;

use super::backend::HostStore;
use super::errors::{StoreError, StoreResult};

const ITEM_EXTENSION: &str = "item";
const TEMP_EXTENSION: &str = "tmp";
const DIGEST_SUFFIX: &str = "sha256";

/// Longest encoded key used directly as a file stem; leaves room for the
/// suffix and extension within a 255-byte name.
const MAX_ENCODED_KEY_LEN: usize = 200;

/// Local filesystem host store
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`.
    ///
    /// The directory is created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of this store
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn item_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.{}", file_stem(key), ITEM_EXTENSION))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.{}", file_stem(key), TEMP_EXTENSION))
    }
}

/// Base64 stems never contain '.', so a digest stem cannot equal one.
fn file_stem(key: &str) -> String {
    let encoded = URL_SAFE_NO_PAD.encode(key);
    if encoded.len() <= MAX_ENCODED_KEY_LEN {
        return encoded;
    }
    let digest = Sha256::digest(key.as_bytes());
    format!("{}.{}", URL_SAFE_NO_PAD.encode(digest), DIGEST_SUFFIX)
}

impl HostStore for FileStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let bytes = match fs::read(self.item_path(key)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(key, e)),
        };
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|source| StoreError::invalid_utf8(key, source))
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        fs::create_dir_all(&self.root).map_err(|e| StoreError::io(key, e))?;

        let temp_path = self.temp_path(key);
        let item_path = self.item_path(key);

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| StoreError::io(key, e))?;
        file.write_all(value.as_bytes())
            .map_err(|e| StoreError::io(key, e))?;
        file.sync_all().map_err(|e| StoreError::io(key, e))?;

        fs::rename(&temp_path, &item_path).map_err(|e| StoreError::io(key, e))?;

        if let Ok(dir) = File::open(&self.root) {
            let _ = dir.sync_all();
        }

        trace!(target: "localstore::storage", key, bytes = value.len(), "item written");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        match fs::remove_file(self.item_path(key)) {
            Ok(()) => {
                trace!(target: "localstore::storage", key, "item removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }
}
