//! Bird physics step
//!
//! Integrates gravity, pushes the bird out of the bodies its collision set
//! blocks it on, and reports contacts the first step a notifying pair
//! starts overlapping.

use std::collections::BTreeSet;

use glam::Vec2;

use super::body::{Body, Category, Shape};
use super::collision::circle_rect_collision;
use super::state::Bird;

/// A notifying overlap that began this step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactBegin {
    pub other_id: u32,
    pub other: Category,
}

/// Apply gravity and move the bird. The bird never moves sideways.
pub fn integrate(bird: &mut Bird, gravity: f32, dt: f32) {
    let dt = dt * bird.speed;
    if dt <= 0.0 {
        return;
    }
    bird.vel.x = 0.0;
    bird.vel.y -= gravity * dt;
    bird.pos += bird.vel * dt;
}

/// Resolve overlaps against `bodies` and return contacts that began.
/// `active` holds ids overlapped last step and is replaced with this step's.
pub fn detect_contacts(
    bird: &mut Bird,
    bodies: &[(u32, Vec2, Body)],
    active: &mut BTreeSet<u32>,
) -> Vec<ContactBegin> {
    let mut began = Vec::new();
    let mut overlapping = BTreeSet::new();
    let radius = bird.radius();

    for &(id, pos, body) in bodies {
        let Shape::Rect { half_extents } = body.shape else {
            continue;
        };
        let result = circle_rect_collision(bird.pos, radius, pos, half_extents);
        if !result.hit {
            continue;
        }

        if bird.body.blocked_by(&body) {
            bird.pos += result.normal * result.penetration;
            let into_surface = bird.vel.dot(result.normal);
            if into_surface < 0.0 {
                bird.vel -= result.normal * into_surface;
            }
        }

        if bird.body.notifies_with(&body) {
            overlapping.insert(id);
            if !active.contains(&id) {
                began.push(ContactBegin {
                    other_id: id,
                    other: body.category,
                });
            }
        }
    }

    *active = overlapping;
    began
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::CategorySet;

    fn bird_at(y: f32) -> Bird {
        Bird::new(1, Vec2::new(75.0, y), Vec2::new(52.0, 44.0))
    }

    fn ground() -> (u32, Vec2, Body) {
        (10, Vec2::new(75.0, 56.0), Body::rect(Category::Ground, Vec2::new(336.0, 112.0)))
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut bird = bird_at(400.0);
        integrate(&mut bird, 600.0, 0.1);
        assert!((bird.vel.y + 60.0).abs() < 1e-4);
        assert!(bird.pos.y < 400.0);
        assert_eq!(bird.pos.x, 75.0);
    }

    #[test]
    fn test_frozen_bird_does_not_move() {
        let mut bird = bird_at(400.0);
        bird.speed = 0.0;
        bird.vel = Vec2::new(0.0, -50.0);
        integrate(&mut bird, 600.0, 0.1);
        assert_eq!(bird.pos.y, 400.0);
        assert_eq!(bird.vel.y, -50.0);
    }

    #[test]
    fn test_ground_blocks_and_notifies_once() {
        let mut bird = bird_at(130.0);
        bird.vel = Vec2::new(0.0, -100.0);
        let bodies = [ground()];
        let mut active = BTreeSet::new();

        let began = detect_contacts(&mut bird, &bodies, &mut active);
        assert_eq!(began.len(), 1);
        assert_eq!(began[0].other, Category::Ground);
        // Pushed to rest on top of the ground, downward velocity removed
        assert!((bird.pos.y - (112.0 + 22.0)).abs() < 1e-3);
        assert_eq!(bird.vel.y, 0.0);

        // Still touching next step: no new contact
        integrate(&mut bird, 600.0, 1.0 / 120.0);
        let began = detect_contacts(&mut bird, &bodies, &mut active);
        assert!(began.is_empty());
        assert!(active.contains(&10));
    }

    #[test]
    fn test_trigger_does_not_block() {
        let mut bird = bird_at(300.0);
        let zone = (
            20,
            Vec2::new(75.0, 300.0),
            Body::trigger(Category::ScoreZone, Vec2::new(64.0, 667.0)),
        );
        let mut active = BTreeSet::new();
        let began = detect_contacts(&mut bird, &[zone], &mut active);
        assert_eq!(
            began,
            vec![ContactBegin {
                other_id: 20,
                other: Category::ScoreZone,
            }]
        );
        assert_eq!(bird.pos.y, 300.0);
    }

    #[test]
    fn test_ground_only_mask_falls_through_walls() {
        let mut bird = bird_at(300.0);
        bird.body.collides_with = CategorySet::of(&[Category::Ground]);
        let wall = (30, Vec2::new(75.0, 300.0), Body::rect(Category::Wall, Vec2::new(64.0, 480.0)));
        let mut active = BTreeSet::new();
        detect_contacts(&mut bird, &[wall], &mut active);
        assert_eq!(bird.pos, Vec2::new(75.0, 300.0));
    }

    #[test]
    fn test_contact_ends_then_begins_again() {
        let mut bird = bird_at(300.0);
        let zone = (
            20,
            Vec2::new(75.0, 300.0),
            Body::trigger(Category::ScoreZone, Vec2::new(64.0, 100.0)),
        );
        let mut active = BTreeSet::new();
        assert_eq!(detect_contacts(&mut bird, &[zone], &mut active).len(), 1);
        bird.pos.y = 500.0;
        assert!(detect_contacts(&mut bird, &[zone], &mut active).is_empty());
        assert!(active.is_empty());
        bird.pos.y = 300.0;
        assert_eq!(detect_contacts(&mut bird, &[zone], &mut active).len(), 1);
    }
}
