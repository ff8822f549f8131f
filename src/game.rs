//! Host facade
//!
//! Owns the simulation plus its collaborators and turns wall-clock frames
//! into fixed simulation ticks. Side effects (best score writes, sounds)
//! are fired here from the events each tick leaves behind.

use crate::audio::{AudioSink, SoundEffect};
use crate::config::GameConfig;
use crate::consts::*;
use crate::error::GameError;
use crate::persistence::{BestScoreStore, KeyValueStore};
use crate::render::RenderSnapshot;
use crate::sim::{GameEvent, GameState, TickInput, tick};

pub struct Game {
    state: GameState,
    best_store: BestScoreStore,
    audio: Box<dyn AudioSink>,
    accumulator: f32,
    /// Tap waiting for the next tick
    pending_tap: bool,
    /// Autopilot for demo mode
    pub idle_mode: bool,
}

impl Game {
    /// Validate the config, read the best score and start playing
    pub fn new(
        config: GameConfig,
        store: Box<dyn KeyValueStore>,
        audio: Box<dyn AudioSink>,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let best_store = BestScoreStore::new(store);
        let best = best_store.load();
        log::info!(
            "Starting game {}x{} (best {})",
            config.screen_width,
            config.screen_height,
            best
        );
        Ok(Self {
            state: GameState::new(config, best),
            best_store,
            audio,
            accumulator: 0.0,
            pending_tap: false,
            idle_mode: false,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for hosts that script the world (tests, demos)
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Register a tap; it applies on the next tick
    pub fn tap(&mut self) {
        self.pending_tap = true;
    }

    /// Run as many fixed ticks as `dt` seconds of wall time cover.
    /// Returns the events those ticks produced.
    pub fn frame(&mut self, dt: f32) -> Vec<GameEvent> {
        // NaN would stick in the accumulator and stop the loop for good
        let dt = if dt.is_finite() { dt.clamp(0.0, 0.1) } else { 0.0 };
        self.accumulator += dt;

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            events.extend(self.step());
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog instead of fast-forwarding through it later
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        events
    }

    /// Run exactly one fixed tick
    pub fn step(&mut self) -> Vec<GameEvent> {
        let input = TickInput {
            tap: self.pending_tap,
            idle_mode: self.idle_mode,
        };
        // Clear one-shot input after processing
        self.pending_tap = false;

        tick(&mut self.state, &input, SIM_DT);
        let events = std::mem::take(&mut self.state.events);
        for event in &events {
            self.apply_side_effects(event);
        }
        events
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state)
    }

    /// Fire-and-forget effects; nothing here can fail the tick
    fn apply_side_effects(&mut self, event: &GameEvent) {
        match event {
            GameEvent::NewBest { best } => self.best_store.persist_if_higher(*best),
            GameEvent::ItemCollected { .. } => self.audio.play(SoundEffect::ItemPickup),
            GameEvent::Crashed { .. } => {
                log::info!(
                    "Run over: score {}, items {}, best {}",
                    self.state.ledger.score(),
                    self.state.ledger.item_score(),
                    self.state.ledger.best()
                );
            }
            _ => {}
        }
    }
}
