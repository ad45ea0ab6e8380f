//! JSON file store
//!
//! All keys live in a single JSON object on disk. Every `set` re-reads the
//! file under an exclusive lock, replaces one key and writes the result back
//! atomically, so concurrent processes only clobber each other per key.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::{KeyValueStore, StoreError, lock_exclusive, replace_file};

/// Store backed by one JSON file (default `~/.habitforge/state.json`)
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Open a store at `path`. The file is created lazily on first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(io_error(&self.path, e)),
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(StoreError::Unavailable(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }

    fn write_all(&self, map: &Map<String, Value>) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(map)?;
        replace_file(&self.path, content.as_bytes()).map_err(|e| io_error(&self.path, e))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        let _lock = lock_exclusive(&self.path).map_err(|e| io_error(&self.path, e))?;
        let mut map = self.read_all()?;
        map.insert(key.to_string(), value);
        self.write_all(&map)
        // Lock is released when `_lock` is dropped
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}
