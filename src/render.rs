//! Render snapshot for the host's drawing surface
//!
//! The core does not draw. Each frame the host asks for a snapshot and
//! draws the sprites in order (they are sorted back to front).

use glam::Vec2;
use serde::Serialize;

use crate::config::AssetSizes;
use crate::sim::GameState;

/// Sky colour behind everything
pub const BACKGROUND: [f32; 3] = [0.15, 0.75, 0.90];

/// Z layers, back to front
pub mod z {
    pub const CLOUD: f32 = -100.0;
    pub const WALL: f32 = -50.0;
    pub const ITEM: f32 = -30.0;
    pub const GROUND: f32 = 0.0;
    pub const BIRD: f32 = 0.0;
    pub const HUD: f32 = 100.0;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sprite {
    pub texture: &'static str,
    /// Centre position, y up
    pub pos: Vec2,
    pub size: Vec2,
    /// Radians, counter-clockwise
    pub rotation: f32,
    pub z: f32,
}

/// Left-aligned HUD text line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub text: String,
    /// Left edge, baseline
    pub pos: Vec2,
    pub z: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub background: [f32; 3],
    pub sprites: Vec<Sprite>,
    pub labels: Vec<Label>,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let assets = &state.config.assets;
        let mut sprites = Vec::new();

        for (_, x) in state.clouds.tiles() {
            let pos = Vec2::new(x, state.clouds.y);
            sprites.push(still(AssetSizes::CLOUD, pos, assets.cloud, z::CLOUD));
        }
        for wall in &state.walls {
            let x = wall.x();
            for part in [&wall.lower, &wall.upper] {
                let pos = Vec2::new(x + part.offset.x, part.offset.y);
                sprites.push(still(AssetSizes::WALL, pos, assets.wall, z::WALL));
            }
        }
        for item in &state.items {
            sprites.push(still(AssetSizes::ITEM, item.pos(), assets.item, z::ITEM));
        }
        for (_, x) in state.ground.tiles() {
            let pos = Vec2::new(x, state.ground.y);
            sprites.push(still(AssetSizes::GROUND, pos, assets.ground, z::GROUND));
        }

        let bird = &state.bird;
        sprites.push(Sprite {
            texture: if bird.frame == 0 {
                AssetSizes::BIRD_A
            } else {
                AssetSizes::BIRD_B
            },
            pos: bird.pos,
            size: assets.bird,
            rotation: bird.rotation,
            z: z::BIRD,
        });

        // Stable sort keeps insertion order within a layer
        sprites.sort_by(|a, b| a.z.total_cmp(&b.z));

        Self {
            background: BACKGROUND,
            sprites,
            labels: hud_labels(state),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn still(texture: &'static str, pos: Vec2, size: Vec2, z: f32) -> Sprite {
    Sprite {
        texture,
        pos,
        size,
        rotation: 0.0,
        z,
    }
}

fn hud_labels(state: &GameState) -> Vec<Label> {
    let top = state.config.screen_height;
    let ledger = &state.ledger;
    [
        (format!("Score:{}", ledger.score()), 60.0),
        (format!("Best Score:{}", ledger.best()), 90.0),
        (format!("ItemScore:{}", ledger.item_score()), 120.0),
    ]
    .into_iter()
    .map(|(text, from_top)| Label {
        text,
        pos: Vec2::new(10.0, top - from_top),
        z: z::HUD,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::{TickInput, tick};

    #[test]
    fn test_snapshot_sorted_back_to_front() {
        let mut state = GameState::new(GameConfig::default(), 0);
        tick(&mut state, &TickInput::default(), crate::consts::SIM_DT);
        let snap = RenderSnapshot::capture(&state);
        assert!(snap.sprites.windows(2).all(|w| w[0].z <= w[1].z));
        assert_eq!(snap.sprites.first().map(|s| s.texture), Some("cloud"));
        assert!(snap.sprites.iter().filter(|s| s.texture == "wall").count() == 2);
    }

    #[test]
    fn test_hud_labels() {
        let mut state = GameState::new(GameConfig::default(), 9);
        state.ledger.add_score(3);
        state.ledger.add_item_score(2);
        let snap = RenderSnapshot::capture(&state);
        let texts: Vec<&str> = snap.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Score:3", "Best Score:9", "ItemScore:2"]);
        assert!(snap.labels.iter().all(|l| l.z == z::HUD));
    }

    #[test]
    fn test_bird_texture_follows_frame() {
        let mut state = GameState::new(GameConfig::default(), 0);
        state.bird.frame = 1;
        let snap = RenderSnapshot::capture(&state);
        assert!(snap.sprites.iter().any(|s| s.texture == "bird_b"));
        assert!(!snap.to_json().is_empty());
    }
}
