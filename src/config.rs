//! Game tuning and asset dimensions
//!
//! Everything the simulation needs to know about the host: screen size,
//! sprite sizes, physics and timing. Loaded from JSON, any field may be
//! omitted and falls back to its default.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// Pixel dimensions of the sprites the core collides with or lays out
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSizes {
    pub ground: Vec2,
    pub cloud: Vec2,
    pub wall: Vec2,
    /// Both flap frames share one size
    pub bird: Vec2,
    pub item: Vec2,
}

impl Default for AssetSizes {
    fn default() -> Self {
        Self {
            ground: Vec2::new(336.0, 112.0),
            cloud: Vec2::new(336.0, 100.0),
            wall: Vec2::new(64.0, 480.0),
            bird: Vec2::new(52.0, 44.0),
            item: Vec2::new(40.0, 40.0),
        }
    }
}

impl AssetSizes {
    /// Asset names as the host bundles them
    pub const GROUND: &'static str = "ground";
    pub const CLOUD: &'static str = "cloud";
    pub const WALL: &'static str = "wall";
    pub const BIRD_A: &'static str = "bird_a";
    pub const BIRD_B: &'static str = "bird_b";
    pub const ITEM: &'static str = "money-500";

    /// Reject sizes no sprite could have
    pub fn validate(&self) -> Result<(), GameError> {
        let entries = [
            (Self::GROUND, self.ground),
            (Self::CLOUD, self.cloud),
            (Self::WALL, self.wall),
            (Self::BIRD_A, self.bird),
            (Self::ITEM, self.item),
        ];
        for (name, size) in entries {
            if !size.is_finite() {
                return Err(GameError::asset(name, "size is not finite"));
            }
            if size.x <= 0.0 || size.y <= 0.0 {
                return Err(GameError::asset(
                    name,
                    format!("size {}x{} must be positive", size.x, size.y),
                ));
            }
        }
        Ok(())
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: f32,
    pub screen_height: f32,

    // === Physics ===
    /// Downward acceleration (points/s²)
    pub gravity: f32,
    /// Upward velocity after a flap (points/s)
    pub flap_impulse: f32,

    // === Timing (seconds) ===
    pub wall_spawn_interval: f32,
    pub item_spawn_interval: f32,
    pub obstacle_travel_secs: f32,
    pub ground_scroll_secs: f32,
    pub cloud_scroll_secs: f32,
    pub crash_roll_secs: f32,

    /// RNG seed for wall and item placement
    pub seed: u64,
    /// Also remove items on restart (walls are always removed)
    pub clear_items_on_restart: bool,
    /// Sound effect volume (0.0 - 1.0)
    pub sfx_volume: f32,

    pub assets: AssetSizes,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,
            wall_spawn_interval: WALL_SPAWN_INTERVAL,
            item_spawn_interval: ITEM_SPAWN_INTERVAL,
            obstacle_travel_secs: OBSTACLE_TRAVEL_SECS,
            ground_scroll_secs: GROUND_SCROLL_SECS,
            cloud_scroll_secs: CLOUD_SCROLL_SECS,
            crash_roll_secs: CRASH_ROLL_SECS,
            seed: 0x5eed,
            clear_items_on_restart: true,
            sfx_volume: 1.0,
            assets: AssetSizes::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, GameError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| GameError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check every value the simulation divides by or lays out with
    pub fn validate(&self) -> Result<(), GameError> {
        self.assets.validate()?;

        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("wall_spawn_interval", self.wall_spawn_interval),
            ("item_spawn_interval", self.item_spawn_interval),
            ("obstacle_travel_secs", self.obstacle_travel_secs),
            ("ground_scroll_secs", self.ground_scroll_secs),
            ("cloud_scroll_secs", self.cloud_scroll_secs),
            ("crash_roll_secs", self.crash_roll_secs),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(GameError::Config(format!("{} must be positive, got {}", name, value)));
            }
        }
        if !self.gravity.is_finite() || !self.flap_impulse.is_finite() {
            return Err(GameError::Config("gravity and flap_impulse must be finite".into()));
        }
        if self.assets.ground.y >= self.screen_height {
            return Err(GameError::asset(
                AssetSizes::GROUND,
                "ground is taller than the screen",
            ));
        }
        Ok(())
    }

    /// Vertical centre of the playfield above the ground
    pub fn baseline_y(&self) -> f32 {
        let ground_h = self.assets.ground.y;
        ground_h + (self.screen_height - ground_h) / 2.0
    }

    /// Where the bird appears at start and after every restart
    pub fn bird_start(&self) -> Vec2 {
        Vec2::new(
            self.screen_width * BIRD_START_X_FRAC,
            self.screen_height * BIRD_START_Y_FRAC,
        )
    }

    /// Effective sound effect volume
    pub fn effective_volume(&self) -> f32 {
        self.sfx_volume.clamp(0.0, 1.0)
    }
}
