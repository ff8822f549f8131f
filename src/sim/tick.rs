//! Fixed timestep simulation tick
//!
//! Order within a tick: input, spawn timers, scripted motion, physics,
//! contact dispatch. Contacts raised by physics are resolved before the
//! tick returns.

use super::body::{Category, CategorySet};
use super::collision::{ContactKind, classify_contact};
use super::physics::{self, ContactBegin};
use super::spawn::{spawn_item, spawn_wall};
use super::state::{CrashRoll, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Screen tapped (click/touch/space)
    pub tap: bool,
    /// Idle/demo mode - autopilot taps for the player
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    let tap = input.tap || (input.idle_mode && autopilot_wants_tap(state));
    if tap {
        handle_tap(state);
    }

    // Spawning and scrolling run on scroll time
    let scroll_dt = dt * state.scroll_speed;
    for _ in 0..state.wall_timer.advance(scroll_dt) {
        spawn_wall(state);
    }
    for _ in 0..state.item_timer.advance(scroll_dt) {
        spawn_item(state);
    }

    state.ground.advance(scroll_dt);
    state.clouds.advance(scroll_dt);
    for wall in &mut state.walls {
        wall.travel.advance(scroll_dt);
    }
    for item in &mut state.items {
        item.travel.advance(scroll_dt);
    }
    state.walls.retain(|w| !w.travel.finished());
    state.items.retain(|i| !i.travel.finished());

    animate_bird(state, dt);

    physics::integrate(&mut state.bird, state.config.gravity, dt);
    if state.bird.speed > 0.0 {
        let bodies = state.world_bodies();
        let contacts =
            physics::detect_contacts(&mut state.bird, &bodies, &mut state.active_contacts);
        for contact in contacts {
            resolve_contact(state, contact);
        }
    }
}

/// Tap while playing flaps, tap while stopped restarts, otherwise ignored
pub fn handle_tap(state: &mut GameState) {
    if state.scroll_speed > 0.0 {
        state.bird.flap(state.config.flap_impulse);
        state.events.push(GameEvent::Flap);
    } else if state.bird.speed == 0.0 {
        state.restart();
    } else {
        log::debug!("Tap ignored while settling");
    }
}

/// React to one contact-begin event
pub fn resolve_contact(state: &mut GameState, contact: ContactBegin) {
    // Game over: nothing counts any more
    if state.scroll_speed <= 0.0 {
        return;
    }

    match classify_contact(Category::Bird, contact.other) {
        ContactKind::Score => {
            let score = state.ledger.add_score(1);
            log::debug!("Score up: {}", score);
            state.events.push(GameEvent::ScoreUp { score });
            if state.ledger.maybe_update_best(score) {
                state.events.push(GameEvent::NewBest { best: score });
            }
        }
        ContactKind::Item => {
            let item_score = state.ledger.add_item_score(1);
            log::debug!("Item {} collected: {}", contact.other_id, item_score);
            state.items.retain(|i| i.id != contact.other_id);
            state.active_contacts.remove(&contact.other_id);
            state.events.push(GameEvent::ItemCollected {
                id: contact.other_id,
                item_score,
            });
        }
        ContactKind::Crash => crash(state, contact.other),
    }
}

/// Stop scrolling and let the bird drop through walls onto the ground
fn crash(state: &mut GameState, other: Category) {
    log::info!("Game over: hit {:?} at score {}", other, state.ledger.score());
    state.scroll_speed = 0.0;
    state.phase = GamePhase::Crashed;
    state.bird.body.collides_with = CategorySet::of(&[Category::Ground]);
    state.bird.roll = Some(CrashRoll {
        total_angle: std::f32::consts::PI * state.bird.pos.y * CRASH_ROLL_PER_POINT,
        duration: state.config.crash_roll_secs,
        elapsed: 0.0,
    });
    state.events.push(GameEvent::Crashed { other });
}

/// Flap frames and the crash roll, both on the bird's own time
fn animate_bird(state: &mut GameState, dt: f32) {
    let bird = &mut state.bird;
    let dt = dt * bird.speed;
    if dt <= 0.0 {
        return;
    }

    bird.frame_timer += dt;
    while bird.frame_timer >= FLAP_FRAME_SECS {
        bird.frame_timer -= FLAP_FRAME_SECS;
        bird.frame = (bird.frame + 1) % 2;
    }

    let Some(roll) = bird.roll.as_mut() else {
        return;
    };
    bird.rotation += roll.advance(dt);
    if roll.finished() {
        bird.roll = None;
        bird.speed = 0.0;
        state.phase = GamePhase::Stopped;
        state.events.push(GameEvent::Stopped);
        log::info!("Bird settled, tap to restart");
    }
}

/// Demo autopilot: flap when sinking below the next gap, restart when stopped
fn autopilot_wants_tap(state: &GameState) -> bool {
    match state.phase {
        GamePhase::Stopped => true,
        GamePhase::Crashed => false,
        GamePhase::Playing => {
            let bird = &state.bird;
            let half_wall = state.config.assets.wall.x / 2.0;
            let target = state
                .walls
                .iter()
                .find(|w| w.x() + half_wall > bird.pos.x - bird.radius())
                .map(|w| w.gap_center_y())
                .unwrap_or_else(|| state.config.baseline_y());
            bird.vel.y <= 0.0 && bird.pos.y < target - bird.radius() * 0.5
        }
    }
}
