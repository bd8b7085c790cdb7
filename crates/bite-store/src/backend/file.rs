//! JSON-file backend.
//!
//! The whole store is one JSON object of string values:
//!
//! ```text
//! {
//!   "cart": "[{\"id\":\"…\",\"item\":{…},\"quantity\":2}]",
//!   "deliveryAddress": "{\"street\":\"123 Main Street\",…}"
//! }
//! ```
//!
//! Values are cached in memory and every write rewrites the file through a
//! temporary sibling followed by a rename, so a crash mid-write leaves the
//! previous file intact.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, info};

use super::DurableStore;
use crate::error::{StoreError, StoreResult};

type Values = BTreeMap<String, String>;

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: Mutex<Values>,
}

impl FileStore {
    /// Opens (or creates on first write) the store file at `path`.
    ///
    /// Missing parent directories are created. An existing file that is not a
    /// JSON object of strings is rejected with
    /// [`StoreError::CorruptBackingFile`] rather than silently overwritten.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let values = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => Values::new(),
            Ok(raw) => serde_json::from_str::<Values>(&raw).map_err(|e| {
                StoreError::CorruptBackingFile {
                    path: path.clone(),
                    reason: e.to_string(),
                }
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => Values::new(),
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        info!(path = %path.display(), keys = values.len(), "Opened file store");

        Ok(FileStore {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, key: &str, values: &Values) -> StoreResult<()> {
        let raw = serde_json::to_string_pretty(values).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;

        debug!(path = %self.path.display(), key, "Store flushed");
        Ok(())
    }

    /// Applies `change` to a copy of the values, writes it out, and only then
    /// swaps it in. A failed write leaves the cache matching the file.
    fn update(&self, key: &str, change: impl FnOnce(&mut Values)) -> StoreResult<()> {
        let mut values = self.values.lock().map_err(|_| StoreError::Poisoned)?;

        let mut next = values.clone();
        change(&mut next);
        self.flush(key, &next)?;

        *values = next;
        Ok(())
    }
}

impl DurableStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let values = self.values.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.update(key, |values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        if self.get(key)?.is_none() {
            return Ok(());
        }

        self.update(key, |values| {
            values.remove(key);
        })
    }
}
