//! JSON file store (native)
//!
//! The whole map is rewritten on every `set_int`: written to a `.tmp`
//! sibling first, then renamed over the real file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use super::KeyValueStore;
use crate::error::GameError;

pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, i64>,
}

impl FileStore {
    /// Open the store in the platform data directory
    pub fn open_default() -> Result<Self, GameError> {
        let dirs = ProjectDirs::from("", "", "flappy-bird")
            .ok_or_else(|| GameError::Storage("could not determine data directory".into()))?;
        let dir = dirs.data_dir();
        fs::create_dir_all(dir)
            .map_err(|e| GameError::Storage(format!("{}: {}", dir.display(), e)))?;
        Self::open(dir.join("scores.json"))
    }

    /// Open (or lazily create) the store at `path`.
    /// A corrupt file is treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, GameError> {
        let path = path.into();
        let values: BTreeMap<String, i64> = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring corrupt store {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(GameError::Storage(format!("{}: {}", path.display(), e))),
        };
        log::info!("Opened store {} ({} keys)", path.display(), values.len());
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), GameError> {
        let json = serde_json::to_string(&self.values)
            .map_err(|e| GameError::Storage(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| GameError::Storage(format!("{}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| GameError::Storage(format!("{}: {}", self.path.display(), e)))
    }
}

impl KeyValueStore for FileStore {
    fn get_int(&self, key: &str) -> Result<Option<i64>, GameError> {
        Ok(self.values.get(key).copied())
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), GameError> {
        self.values.insert(key.to_string(), value);
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("flappy-bird-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn test_value_survives_reopen() {
        let path = scratch_path("reopen.json");
        {
            let mut store = FileStore::open(&path).unwrap();
            assert_eq!(store.get_int("BEST").unwrap(), None);
            store.set_int("BEST", 42).unwrap();
        }
        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get_int("BEST").unwrap(), Some(42));
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let path = scratch_path("corrupt.json");
        fs::write(&path, "{{{").unwrap();
        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get_int("BEST").unwrap(), None);
    }
}
