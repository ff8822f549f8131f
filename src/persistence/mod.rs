//! Durable key-value storage for the best score
//!
//! Features:
//! - One integer per key, read at startup and written on change
//! - JSON file under the platform data directory (native)
//! - LocalStorage (web)
//! - Failures are logged and swallowed; the best score is cosmetic

use std::collections::BTreeMap;

use crate::consts::BEST_SCORE_KEY;
use crate::error::GameError;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// A durable store of integer values
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` if the key was never written
    fn get_int(&self, key: &str) -> Result<Option<i64>, GameError>;
    /// Write a value and flush it to durable storage
    fn set_int(&mut self, key: &str, value: i64) -> Result<(), GameError>;
}

/// In-memory store (tests, and fallback when no durable store opens)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_int(&self, key: &str) -> Result<Option<i64>, GameError> {
        Ok(self.values.get(key).copied())
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), GameError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// The `"BEST"` entry of a key-value store
pub struct BestScoreStore {
    store: Box<dyn KeyValueStore>,
}

impl BestScoreStore {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored best score, or 0 if missing, unreadable or out of range
    pub fn load(&self) -> u32 {
        match self.store.get_int(BEST_SCORE_KEY) {
            Ok(Some(value)) => u32::try_from(value).unwrap_or_else(|_| {
                log::warn!("Ignoring out-of-range best score {}", value);
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                log::warn!("Failed to read best score: {}", e);
                0
            }
        }
    }

    /// Persist `best` only if it beats what is stored. Best effort.
    pub fn persist_if_higher(&mut self, best: u32) {
        if best <= self.load() {
            return;
        }
        match self.store.set_int(BEST_SCORE_KEY, i64::from(best)) {
            Ok(()) => log::info!("Best score saved ({})", best),
            Err(e) => log::warn!("Failed to save best score {}: {}", best, e),
        }
    }
}
