//! Startup errors
//!
//! Only setup can fail. Once the loop runs, audio and storage failures are
//! logged and dropped instead of surfacing here.

use std::fmt;

#[derive(Debug)]
pub enum GameError {
    /// An asset is missing or has unusable dimensions
    Asset { name: String, reason: String },
    /// Configuration could not be parsed or is out of range
    Config(String),
    /// The key-value store could not be opened
    Storage(String),
}

impl GameError {
    pub fn asset(name: &str, reason: impl Into<String>) -> Self {
        GameError::Asset {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Asset { name, reason } => write!(f, "asset '{}': {}", name, reason),
            GameError::Config(msg) => write!(f, "config: {}", msg),
            GameError::Storage(msg) => write!(f, "storage: {}", msg),
        }
    }
}

impl std::error::Error for GameError {}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_names_asset() {
        let err = GameError::asset("bird_a", "height must be positive");
        assert_eq!(err.to_string(), "asset 'bird_a': height must be positive");
    }

    #[test]
    fn test_from_json_error() {
        let err: GameError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, GameError::Config(_)));
    }
}
