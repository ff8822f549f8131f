//! Flappy Bird - A side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (scrolling, spawning, physics, game state)
//! - `score`: Run score, item score and best score ledger
//! - `persistence`: Durable key-value store for the best score
//! - `audio`: Fire-and-forget sound effects
//! - `config`: Data-driven game tuning and asset dimensions
//! - `game`: Host-facing facade driving the fixed timestep loop

pub mod audio;
pub mod config;
pub mod error;
pub mod game;
pub mod persistence;
pub mod render;
pub mod score;
pub mod sim;

pub use config::{AssetSizes, GameConfig};
pub use error::GameError;
pub use game::Game;
pub use score::ScoreLedger;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default logical screen size (points)
    pub const SCREEN_WIDTH: f32 = 375.0;
    pub const SCREEN_HEIGHT: f32 = 667.0;

    /// Downward acceleration applied to the bird (points/s²)
    pub const GRAVITY: f32 = 600.0;
    /// Upward velocity set by a flap (points/s)
    pub const FLAP_IMPULSE: f32 = 330.0;

    /// Seconds between wall spawns (first wall spawns immediately)
    pub const WALL_SPAWN_INTERVAL: f32 = 2.0;
    /// Seconds between item spawns (first item after one interval)
    pub const ITEM_SPAWN_INTERVAL: f32 = 2.3;
    /// Seconds for a wall or item to cross the screen
    pub const OBSTACLE_TRAVEL_SECS: f32 = 4.0;
    /// Seconds for the ground to scroll one tile width
    pub const GROUND_SCROLL_SECS: f32 = 5.0;
    /// Seconds for the clouds to scroll one tile width
    pub const CLOUD_SCROLL_SECS: f32 = 20.0;

    /// Gap between upper and lower wall, in bird heights
    pub const WALL_GAP_BIRD_HEIGHTS: f32 = 3.0;
    /// Vertical spread of the wall gap, in bird heights
    pub const WALL_OFFSET_BIRD_HEIGHTS: f32 = 2.5;
    /// Vertical band items are placed in, in bird heights
    pub const ITEM_BAND_BIRD_HEIGHTS: f32 = 4.0;

    /// Duration of the crash roll animation (seconds)
    pub const CRASH_ROLL_SECS: f32 = 1.0;
    /// Roll angle per point of bird height, in multiples of π
    pub const CRASH_ROLL_PER_POINT: f32 = 0.01;
    /// Time each bird texture is shown while flapping
    pub const FLAP_FRAME_SECS: f32 = 0.2;

    /// Bird spawn point as a fraction of the screen size
    pub const BIRD_START_X_FRAC: f32 = 0.2;
    pub const BIRD_START_Y_FRAC: f32 = 0.7;

    /// Persisted best score key
    pub const BEST_SCORE_KEY: &str = "BEST";
}

/// Number of tiles needed to cover `span` seamlessly while scrolling
#[inline]
pub fn tiles_needed(span: f32, tile_width: f32) -> usize {
    (span / tile_width).ceil() as usize + 2
}

/// Wrap `value` into `[0, period)`
#[inline]
pub fn wrap(value: f32, period: f32) -> f32 {
    value.rem_euclid(period)
}
