//! LocalStorage store (web)

use super::KeyValueStore;
use crate::error::GameError;

/// Key prefix so the game does not collide with other pages on the origin
const PREFIX: &str = "flappy_bird_";

pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

impl LocalStorageStore {
    pub fn open() -> Result<Self, GameError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| GameError::Storage("LocalStorage unavailable".into()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get_int(&self, key: &str) -> Result<Option<i64>, GameError> {
        let raw = self
            .storage
            .get_item(&format!("{}{}", PREFIX, key))
            .map_err(|_| GameError::Storage(format!("read {} failed", key)))?;
        match raw {
            Some(text) => text
                .parse()
                .map(Some)
                .map_err(|_| GameError::Storage(format!("{} is not an integer", key))),
            None => Ok(None),
        }
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), GameError> {
        self.storage
            .set_item(&format!("{}{}", PREFIX, key), &value.to_string())
            .map_err(|_| GameError::Storage(format!("write {} failed", key)))
    }
}
