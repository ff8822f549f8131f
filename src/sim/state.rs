//! Game state and core simulation types
//!
//! Everything `tick` reads or writes lives in `GameState`; nothing is
//! global.

use std::collections::BTreeSet;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Body, Category, CategorySet, Shape};
use super::scroll::{SpawnTimer, TileStrip, Travel};
use crate::config::GameConfig;
use crate::score::ScoreLedger;
use crate::tiles_needed;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Scrolling, taps flap
    Playing,
    /// Hit something: scrolling stopped, bird still falling and rolling
    Crashed,
    /// Bird frozen, next tap restarts
    Stopped,
}

/// Things that happened during a tick, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Flap,
    WallSpawned { id: u32 },
    ItemSpawned { id: u32 },
    ScoreUp { score: u32 },
    NewBest { best: u32 },
    ItemCollected { id: u32, item_score: u32 },
    Crashed { other: Category },
    Stopped,
    Restarted,
}

/// A static collidable piece of a compound entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub id: u32,
    /// Position relative to the owner's origin (the owner has y = 0)
    pub offset: Vec2,
    pub body: Body,
}

impl Part {
    pub fn half_extents(&self) -> Vec2 {
        match self.body.shape {
            Shape::Rect { half_extents } => half_extents,
            Shape::Circle { radius } => Vec2::splat(radius),
        }
    }
}

/// Upper and lower wall around a gap, plus the score zone behind them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallUnit {
    pub id: u32,
    pub travel: Travel,
    pub lower: Part,
    pub upper: Part,
    pub score_zone: Part,
}

impl WallUnit {
    pub fn x(&self) -> f32 {
        self.travel.x()
    }

    pub fn parts(&self) -> [&Part; 3] {
        [&self.lower, &self.upper, &self.score_zone]
    }

    /// Distance between the top of the lower wall and the bottom of the upper
    pub fn gap_height(&self) -> f32 {
        let lower_top = self.lower.offset.y + self.lower.half_extents().y;
        let upper_bottom = self.upper.offset.y - self.upper.half_extents().y;
        upper_bottom - lower_top
    }

    pub fn gap_center_y(&self) -> f32 {
        let lower_top = self.lower.offset.y + self.lower.half_extents().y;
        lower_top + self.gap_height() / 2.0
    }
}

/// A bonus pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub travel: Travel,
    pub y: f32,
    pub body: Body,
}

impl Item {
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.travel.x(), self.y)
    }
}

/// Timed roll played after a crash; the bird freezes when it ends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrashRoll {
    pub total_angle: f32,
    pub duration: f32,
    pub elapsed: f32,
}

impl CrashRoll {
    /// Advance and return the rotation to apply this step
    pub fn advance(&mut self, dt: f32) -> f32 {
        let before = self.elapsed;
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.total_angle * (self.elapsed - before) / self.duration
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Radians, counter-clockwise
    pub rotation: f32,
    /// Action/physics multiplier: 1 while alive or settling, 0 once frozen
    pub speed: f32,
    pub body: Body,
    /// Flap texture index (0 = bird_a, 1 = bird_b)
    pub frame: usize,
    pub frame_timer: f32,
    pub roll: Option<CrashRoll>,
}

impl Bird {
    pub fn new(id: u32, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            rotation: 0.0,
            speed: 1.0,
            body: Body::bird(size.y / 2.0),
            frame: 0,
            frame_timer: 0.0,
            roll: None,
        }
    }

    pub fn radius(&self) -> f32 {
        match self.body.shape {
            Shape::Circle { radius } => radius,
            Shape::Rect { half_extents } => half_extents.y,
        }
    }

    /// Velocity is zeroed before the impulse, never added to
    pub fn flap(&mut self, impulse: f32) {
        self.vel = Vec2::ZERO;
        self.vel.y += impulse;
    }

    /// Back to spawn, upright, solid against ground and walls
    pub fn reset(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.rotation = 0.0;
        self.speed = 1.0;
        self.body.collides_with = CategorySet::of(&[Category::Ground, Category::Wall]);
        self.roll = None;
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Multiplier on every scrolling entity and spawn timer
    pub scroll_speed: f32,
    pub bird: Bird,
    pub ground: TileStrip,
    pub clouds: TileStrip,
    /// Active wall units, oldest first
    pub walls: Vec<WallUnit>,
    /// Active items, oldest first
    pub items: Vec<Item>,
    pub wall_timer: SpawnTimer,
    pub item_timer: SpawnTimer,
    pub ledger: ScoreLedger,
    /// Ids of world bodies the bird overlapped last step
    pub active_contacts: BTreeSet<u32>,
    /// Events since the host last drained them
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game in the Playing phase. `config` must be validated.
    pub fn new(config: GameConfig, best: u32) -> Self {
        let assets = config.assets.clone();
        let mut next_id = 1;
        let mut alloc = |n: usize| -> Vec<u32> {
            let ids = (next_id..next_id + n as u32).collect();
            next_id += n as u32;
            ids
        };

        let bird_id = alloc(1)[0];
        let ground_ids = alloc(tiles_needed(config.screen_width, assets.ground.x));
        let cloud_ids = alloc(tiles_needed(config.screen_width, assets.cloud.x));

        let ground = TileStrip::new(
            config.screen_width,
            assets.ground.x,
            assets.ground.y,
            assets.ground.y / 2.0,
            config.ground_scroll_secs,
            ground_ids,
        );
        let clouds = TileStrip::new(
            config.screen_width,
            assets.cloud.x,
            assets.cloud.y,
            config.screen_height - assets.cloud.y / 2.0,
            config.cloud_scroll_secs,
            cloud_ids,
        );

        Self {
            rng: Pcg32::seed_from_u64(config.seed),
            time_ticks: 0,
            phase: GamePhase::Playing,
            scroll_speed: 1.0,
            bird: Bird::new(bird_id, config.bird_start(), assets.bird),
            ground,
            clouds,
            walls: Vec::new(),
            items: Vec::new(),
            wall_timer: SpawnTimer::immediate(config.wall_spawn_interval),
            item_timer: SpawnTimer::delayed(config.item_spawn_interval),
            ledger: ScoreLedger::with_best(best),
            active_contacts: BTreeSet::new(),
            events: Vec::new(),
            next_id,
            config,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Collision bodies of every world entity with their world positions
    pub fn world_bodies(&self) -> Vec<(u32, Vec2, Body)> {
        let ground_body = Body::rect(
            Category::Ground,
            Vec2::new(self.ground.tile_width, self.ground.tile_height),
        );
        let mut bodies: Vec<(u32, Vec2, Body)> = self
            .ground
            .tiles()
            .map(|(id, x)| (id, Vec2::new(x, self.ground.y), ground_body))
            .collect();

        for wall in &self.walls {
            let x = wall.x();
            for part in wall.parts() {
                bodies.push((part.id, Vec2::new(x + part.offset.x, part.offset.y), part.body));
            }
        }
        for item in &self.items {
            bodies.push((item.id, item.pos(), item.body));
        }
        bodies
    }

    pub fn is_playing(&self) -> bool {
        self.scroll_speed > 0.0
    }

    /// Reset the run: scores, bird, walls (and items if configured)
    pub fn restart(&mut self) {
        self.ledger.reset_run();
        let start = self.config.bird_start();
        self.bird.reset(start);
        self.walls.clear();
        if self.config.clear_items_on_restart {
            self.items.clear();
        }
        self.active_contacts.clear();
        self.scroll_speed = 1.0;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Restarted);
        log::info!("Restarted (best {})", self.ledger.best());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_playing() {
        let state = GameState::new(GameConfig::default(), 4);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.is_playing());
        assert_eq!(state.bird.speed, 1.0);
        assert_eq!(state.ledger.best(), 4);
        assert_eq!(state.ledger.score(), 0);
        assert!(state.walls.is_empty());
        assert!(state.items.is_empty());
    }

    #[test]
    fn test_tile_counts_cover_screen() {
        let state = GameState::new(GameConfig::default(), 0);
        // ceil(375 / 336) + 2
        assert_eq!(state.ground.count(), 4);
        assert_eq!(state.clouds.count(), 4);
    }

    #[test]
    fn test_entity_ids_unique() {
        let mut state = GameState::new(GameConfig::default(), 0);
        let mut ids: Vec<u32> = state.ground.ids.clone();
        ids.extend(&state.clouds.ids);
        ids.push(state.bird.id);
        ids.push(state.next_entity_id());
        let count = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn test_flap_zeroes_before_impulse() {
        let mut bird = Bird::new(1, Vec2::new(75.0, 400.0), Vec2::new(52.0, 44.0));
        bird.vel = Vec2::new(3.0, -900.0);
        bird.flap(330.0);
        assert_eq!(bird.vel, Vec2::new(0.0, 330.0));
    }

    #[test]
    fn test_crash_roll_spreads_angle_over_duration() {
        let mut roll = CrashRoll {
            total_angle: 2.0,
            duration: 1.0,
            elapsed: 0.0,
        };
        let mut total = 0.0;
        for _ in 0..4 {
            total += roll.advance(0.3);
        }
        assert!(roll.finished());
        assert!((total - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_restart_restores_bird_mask() {
        let mut state = GameState::new(GameConfig::default(), 0);
        state.bird.body.collides_with = CategorySet::of(&[Category::Ground]);
        state.bird.speed = 0.0;
        state.scroll_speed = 0.0;
        state.phase = GamePhase::Stopped;
        state.restart();
        assert!(state.bird.body.collides_with.contains(Category::Wall));
        assert!(state.bird.body.collides_with.contains(Category::Ground));
        assert_eq!(state.bird.pos, state.config.bird_start());
        assert_eq!(state.events.last(), Some(&GameEvent::Restarted));
    }
}
