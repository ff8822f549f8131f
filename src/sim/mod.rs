//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order, ids ascending)
//! - No rendering, audio or storage dependencies

pub mod body;
pub mod collision;
pub mod physics;
pub mod scroll;
pub mod spawn;
pub mod state;
pub mod tick;

pub use body::{Body, Category, CategorySet, Shape};
pub use collision::{CollisionResult, ContactKind, circle_rect_collision, classify_contact};
pub use physics::ContactBegin;
pub use scroll::{SpawnTimer, TileStrip, Travel};
pub use spawn::{ItemLayout, WallLayout, spawn_item, spawn_wall};
pub use state::{Bird, CrashRoll, GameEvent, GamePhase, GameState, Item, Part, WallUnit};
pub use tick::{TickInput, handle_tap, resolve_contact, tick};
