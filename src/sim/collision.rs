//! Collision detection and contact classification
//!
//! The bird is the only circle and the only moving body, so the one shape
//! test needed is circle against axis-aligned rectangle.

use glam::Vec2;

use super::body::Category;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal pointing from the rectangle toward the circle
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check collision between a circle and an axis-aligned rectangle
pub fn circle_rect_collision(
    center: Vec2,
    radius: f32,
    rect_center: Vec2,
    half_extents: Vec2,
) -> CollisionResult {
    let d = center - rect_center;
    let clamped = d.clamp(-half_extents, half_extents);
    let closest = rect_center + clamped;
    let delta = center - closest;
    let dist_sq = delta.length_squared();

    if dist_sq > radius * radius {
        return CollisionResult::miss();
    }

    if dist_sq > 0.0 {
        // Centre outside the rectangle
        let dist = dist_sq.sqrt();
        return CollisionResult {
            hit: true,
            normal: delta / dist,
            penetration: radius - dist,
        };
    }

    // Centre inside: push out along the shallowest axis
    let depth_x = half_extents.x - d.x.abs();
    let depth_y = half_extents.y - d.y.abs();
    let sign = |v: f32| if v >= 0.0 { 1.0 } else { -1.0 };
    if depth_x < depth_y {
        CollisionResult {
            hit: true,
            normal: Vec2::new(sign(d.x), 0.0),
            penetration: depth_x + radius,
        }
    } else {
        CollisionResult {
            hit: true,
            normal: Vec2::new(0.0, sign(d.y)),
            penetration: depth_y + radius,
        }
    }
}

/// What a contact between two categories means for the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// Bird passed through a wall gap
    Score,
    /// Bird touched a bonus item
    Item,
    /// Bird hit the ground or a wall
    Crash,
}

/// Score zones win over items, anything else is a crash
pub fn classify_contact(a: Category, b: Category) -> ContactKind {
    let either = |c: Category| a == c || b == c;
    if either(Category::ScoreZone) {
        ContactKind::Score
    } else if either(Category::Item) {
        ContactKind::Item
    } else {
        ContactKind::Crash
    }
}
