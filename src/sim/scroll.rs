//! Scrolling and timers
//!
//! Explicit per-entity timers advanced once per tick. All of them take an
//! already speed-scaled `dt`, so a scroll speed of 0 freezes them in place.

use serde::{Deserialize, Serialize};

use crate::{tiles_needed, wrap};

/// A row of identical tiles looping left forever
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileStrip {
    pub tile_width: f32,
    pub tile_height: f32,
    /// Centre y of every tile
    pub y: f32,
    /// Seconds to scroll one tile width
    pub period: f32,
    /// Distance scrolled within the current tile, in `[0, tile_width)`
    pub offset: f32,
    /// Entity ids, one per tile
    pub ids: Vec<u32>,
}

impl TileStrip {
    pub fn new(
        screen_width: f32,
        tile_width: f32,
        tile_height: f32,
        y: f32,
        period: f32,
        ids: Vec<u32>,
    ) -> Self {
        debug_assert_eq!(ids.len(), tiles_needed(screen_width, tile_width));
        Self {
            tile_width,
            tile_height,
            y,
            period,
            offset: 0.0,
            ids,
        }
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn advance(&mut self, dt: f32) {
        let speed = self.tile_width / self.period;
        self.offset = wrap(self.offset + speed * dt, self.tile_width);
    }

    /// Centre x of tile `index`
    pub fn tile_x(&self, index: usize) -> f32 {
        self.tile_width / 2.0 + self.tile_width * index as f32 - self.offset
    }

    /// (id, centre x) of every tile, left to right
    pub fn tiles(&self) -> impl Iterator<Item = (u32, f32)> + '_ {
        self.ids.iter().enumerate().map(|(i, &id)| (id, self.tile_x(i)))
    }
}

/// Repeating spawn timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub interval: f32,
    /// Seconds until the next spawn
    pub remaining: f32,
}

impl SpawnTimer {
    /// Fires on the first tick, then every `interval`
    pub fn immediate(interval: f32) -> Self {
        Self {
            interval,
            remaining: 0.0,
        }
    }

    /// Fires after one `interval`, then every `interval`
    pub fn delayed(interval: f32) -> Self {
        Self {
            interval,
            remaining: interval,
        }
    }

    /// Advance and return how many spawns came due
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.remaining -= dt;
        let mut due = 0;
        while self.remaining <= 0.0 {
            due += 1;
            self.remaining += self.interval;
        }
        due
    }
}

/// Straight-line travel to the left over a fixed duration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Travel {
    pub start_x: f32,
    pub distance: f32,
    pub duration: f32,
    pub elapsed: f32,
}

impl Travel {
    pub fn new(start_x: f32, distance: f32, duration: f32) -> Self {
        Self {
            start_x,
            distance,
            duration,
            elapsed: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    pub fn x(&self) -> f32 {
        self.start_x - self.distance * (self.elapsed / self.duration)
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip() -> TileStrip {
        TileStrip::new(375.0, 336.0, 112.0, 56.0, 5.0, vec![1, 2, 3, 4])
    }

    #[test]
    fn test_tile_strip_layout_edge_to_edge() {
        let s = strip();
        let xs: Vec<f32> = s.tiles().map(|(_, x)| x).collect();
        assert_eq!(xs, vec![168.0, 504.0, 840.0, 1176.0]);
    }

    #[test]
    fn test_tile_strip_wraps_seamlessly() {
        let mut s = strip();
        // One full period moves exactly one tile and snaps back
        s.advance(2.5);
        assert!((s.offset - 168.0).abs() < 1e-3);
        assert!((s.tile_x(0) - 0.0).abs() < 1e-3);
        s.advance(2.5);
        assert!(s.offset.abs() < 1e-3 || (s.offset - 336.0).abs() < 1e-3);
    }

    #[test]
    fn test_tile_strip_frozen_at_zero_dt() {
        let mut s = strip();
        s.advance(1.0);
        let before = s.offset;
        s.advance(0.0);
        assert_eq!(s.offset, before);
    }

    #[test]
    fn test_spawn_timer_immediate_then_interval() {
        let mut t = SpawnTimer::immediate(2.0);
        assert_eq!(t.advance(0.01), 1);
        assert_eq!(t.advance(1.0), 0);
        assert_eq!(t.advance(0.98), 0);
        assert_eq!(t.advance(0.02), 1);
    }

    #[test]
    fn test_spawn_timer_delayed() {
        let mut t = SpawnTimer::delayed(2.3);
        assert_eq!(t.advance(2.2), 0);
        assert_eq!(t.advance(0.2), 1);
        // Large step catches up on every missed spawn
        assert_eq!(t.advance(4.6), 2);
    }

    #[test]
    fn test_travel() {
        let mut t = Travel::new(407.0, 439.0, 4.0);
        assert_eq!(t.x(), 407.0);
        t.advance(2.0);
        assert!((t.x() - (407.0 - 219.5)).abs() < 1e-3);
        assert!(!t.finished());
        t.advance(3.0);
        assert!(t.finished());
        assert!((t.x() - (407.0 - 439.0)).abs() < 1e-3);
    }
}
