//! Procedural wall and item generation
//!
//! Walls and items spawn just past the right edge and travel left until
//! they are fully off the left edge. Only their vertical placement is
//! random.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::body::{Body, Category};
use super::scroll::Travel;
use super::state::{GameEvent, GameState, Item, Part, WallUnit};
use crate::config::GameConfig;
use crate::consts::*;

/// Fixed geometry shared by every wall unit
#[derive(Debug, Clone)]
pub struct WallLayout {
    /// Lower wall centre y when the random offset is 0
    pub lowest_lower_y: f32,
    /// Random offset range added to `lowest_lower_y`
    pub offset_range: f32,
    pub gap: f32,
    pub wall_size: Vec2,
    pub zone_offset: Vec2,
    pub zone_size: Vec2,
}

impl WallLayout {
    pub fn new(config: &GameConfig) -> Self {
        let bird = config.assets.bird;
        let wall = config.assets.wall;
        let gap = bird.y * WALL_GAP_BIRD_HEIGHTS;
        let offset_range = bird.y * WALL_OFFSET_BIRD_HEIGHTS;
        Self {
            lowest_lower_y: config.baseline_y() - gap / 2.0 - wall.y / 2.0 - offset_range / 2.0,
            offset_range,
            gap,
            wall_size: wall,
            zone_offset: Vec2::new(wall.x + bird.x / 2.0, config.screen_height / 2.0),
            zone_size: Vec2::new(wall.x, config.screen_height),
        }
    }

    /// Build a wall unit for a random offset in `[0, offset_range)`
    pub fn build(&self, ids: [u32; 4], offset: f32, config: &GameConfig) -> WallUnit {
        let [unit_id, lower_id, upper_id, zone_id] = ids;
        let lower_y = self.lowest_lower_y + offset;
        let upper_y = lower_y + self.wall_size.y + self.gap;
        let start_x = config.screen_width + self.wall_size.x / 2.0;

        WallUnit {
            id: unit_id,
            travel: Travel::new(
                start_x,
                config.screen_width + self.wall_size.x,
                config.obstacle_travel_secs,
            ),
            lower: Part {
                id: lower_id,
                offset: Vec2::new(0.0, lower_y),
                body: Body::rect(Category::Wall, self.wall_size),
            },
            upper: Part {
                id: upper_id,
                offset: Vec2::new(0.0, upper_y),
                body: Body::rect(Category::Wall, self.wall_size),
            },
            score_zone: Part {
                id: zone_id,
                offset: self.zone_offset,
                body: Body::trigger(Category::ScoreZone, self.zone_size),
            },
        }
    }
}

/// Fixed geometry shared by every item
#[derive(Debug, Clone)]
pub struct ItemLayout {
    pub lowest_y: f32,
    pub band: f32,
    pub size: Vec2,
}

impl ItemLayout {
    pub fn new(config: &GameConfig) -> Self {
        let band = config.assets.bird.y * ITEM_BAND_BIRD_HEIGHTS;
        let size = config.assets.item;
        Self {
            lowest_y: config.baseline_y() - band / 2.0 - size.y / 2.0,
            band,
            size,
        }
    }

    pub fn build(&self, id: u32, offset: f32, config: &GameConfig) -> Item {
        Item {
            id,
            travel: Travel::new(
                config.screen_width + self.size.x / 2.0,
                config.screen_width + self.size.x,
                config.obstacle_travel_secs,
            ),
            y: self.lowest_y + offset,
            body: Body::trigger(Category::Item, self.size),
        }
    }
}

/// Uniform sample in `[0, range)`, or 0 for an empty range
pub fn random_offset(rng: &mut Pcg32, range: f32) -> f32 {
    if range > 0.0 {
        rng.random_range(0.0..range)
    } else {
        0.0
    }
}

pub fn spawn_wall(state: &mut GameState) -> u32 {
    let layout = WallLayout::new(&state.config);
    let offset = random_offset(&mut state.rng, layout.offset_range);
    let ids = [
        state.next_entity_id(),
        state.next_entity_id(),
        state.next_entity_id(),
        state.next_entity_id(),
    ];
    let wall = layout.build(ids, offset, &state.config);
    log::debug!("Wall {} spawned, gap centre {:.1}", wall.id, wall.gap_center_y());
    state.events.push(GameEvent::WallSpawned { id: wall.id });
    state.walls.push(wall);
    ids[0]
}

pub fn spawn_item(state: &mut GameState) -> u32 {
    let layout = ItemLayout::new(&state.config);
    let offset = random_offset(&mut state.rng, layout.band);
    let id = state.next_entity_id();
    let item = layout.build(id, offset, &state.config);
    log::debug!("Item {} spawned at y {:.1}", id, item.y);
    state.events.push(GameEvent::ItemSpawned { id });
    state.items.push(item);
    id
}
