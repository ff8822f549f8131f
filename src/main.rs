//! Flappy Bird entry point
//!
//! Native: headless autopilot run that logs score events.
//! Web: exposes `WebGame` to the JS host, which draws the render snapshot.

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use wasm_bindgen::prelude::*;

    use flappy_bird::audio::{AudioSink, NullAudio, WebAudio};
    use flappy_bird::persistence::{KeyValueStore, LocalStorageStore, MemoryStore};
    use flappy_bird::{Game, GameConfig};

    /// Game instance driven by the page's requestAnimationFrame loop
    #[wasm_bindgen]
    pub struct WebGame {
        game: Game,
    }

    #[wasm_bindgen]
    impl WebGame {
        #[wasm_bindgen(constructor)]
        pub fn new(config_json: Option<String>) -> Result<WebGame, JsValue> {
            let config = match config_json {
                Some(json) => GameConfig::from_json_str(&json),
                None => Ok(GameConfig::default()),
            }
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

            let store: Box<dyn KeyValueStore> = match LocalStorageStore::open() {
                Ok(store) => Box::new(store),
                Err(e) => {
                    log::warn!("{} - best score will not persist", e);
                    Box::new(MemoryStore::new())
                }
            };
            let audio: Box<dyn AudioSink> = if config.effective_volume() > 0.0 {
                Box::new(WebAudio::new(config.effective_volume()))
            } else {
                Box::new(NullAudio)
            };

            let game = Game::new(config, store, audio).map_err(|e| {
                log::error!("Startup failed: {}", e);
                JsValue::from_str(&e.to_string())
            })?;
            Ok(WebGame { game })
        }

        pub fn tap(&mut self) {
            self.game.tap();
        }

        /// Advance by `dt` seconds of wall time
        pub fn frame(&mut self, dt: f32) {
            self.game.frame(dt);
        }

        pub fn set_idle_mode(&mut self, idle: bool) {
            self.game.idle_mode = idle;
        }

        /// Sprites and HUD labels for this frame, as JSON
        pub fn snapshot_json(&self) -> String {
            self.game.snapshot().to_json()
        }

        pub fn score(&self) -> u32 {
            self.game.state().ledger.score()
        }

        pub fn best(&self) -> u32 {
            self.game.state().ledger.best()
        }
    }

    #[wasm_bindgen(start)]
    pub fn wasm_main() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("Flappy Bird (web) loaded");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flappy Bird (native) starting headless demo...");

    if let Err(e) = run_demo() {
        log::error!("{}", e);
        eprintln!("flappy-bird: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Autopilot run. `FLAPPY_CONFIG` names a JSON config file,
/// `FLAPPY_DEMO_SECS` the simulated duration (default 60).
#[cfg(not(target_arch = "wasm32"))]
fn run_demo() -> Result<(), flappy_bird::GameError> {
    use flappy_bird::audio::NullAudio;
    use flappy_bird::consts::SIM_DT;
    use flappy_bird::persistence::{FileStore, KeyValueStore, MemoryStore};
    use flappy_bird::sim::GameEvent;
    use flappy_bird::{Game, GameConfig};

    let config = match std::env::var_os("FLAPPY_CONFIG") {
        Some(path) => GameConfig::load(std::path::Path::new(&path))?,
        None => GameConfig::default(),
    };
    let secs: f32 = std::env::var("FLAPPY_DEMO_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(60.0);

    let store: Box<dyn KeyValueStore> = match FileStore::open_default() {
        Ok(store) => {
            log::info!("Best score file: {}", store.path().display());
            Box::new(store)
        }
        Err(e) => {
            log::warn!("{} - best score will not persist", e);
            Box::new(MemoryStore::new())
        }
    };

    let mut game = Game::new(config, store, Box::new(NullAudio))?;
    game.idle_mode = true;

    let ticks = (secs / SIM_DT) as u64;
    let mut runs = 0u32;
    let mut top_score = 0u32;
    for _ in 0..ticks {
        for event in game.step() {
            match event {
                GameEvent::ScoreUp { score } => {
                    top_score = top_score.max(score);
                    log::info!("Score {}", score);
                }
                GameEvent::NewBest { best } => log::info!("New best {}", best),
                GameEvent::ItemCollected { item_score, .. } => log::info!("Items {}", item_score),
                GameEvent::Restarted => runs += 1,
                _ => {}
            }
        }
    }

    let ledger = &game.state().ledger;
    println!(
        "Simulated {:.0}s: {} restarts, top score {}, best {}",
        secs,
        runs,
        top_score,
        ledger.best()
    );
    Ok(())
}
