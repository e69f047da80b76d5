//! Poly Jumper headless runner
//!
//! Plays one run with the demo bot at 60 Hz, logs what happens and prints the
//! final snapshot as JSON.
//!
//! Usage: `poly-jumper [seed] [seconds]`
//!
//! Environment:
//! - `RUST_LOG`: log verbosity
//! - `POLY_JUMPER_TUNING`: path to a tuning JSON file
//! - `POLY_JUMPER_SCORES`: path to a high score JSON file to update

#[cfg(not(target_arch = "wasm32"))]
mod runner {
    use std::path::{Path, PathBuf};

    use poly_jumper::highscores::{HighScores, RunRecord};
    use poly_jumper::sim::{EffectSink, GameEvent, GamePhase, GameState, TickInput, tick};
    use poly_jumper::tuning::Tuning;

    const WIDTH: f32 = 1280.0;
    const HEIGHT: f32 = 720.0;
    const FRAME_DT: f32 = 1.0 / 60.0;
    const DEFAULT_SECONDS: f32 = 120.0;

    /// Logs gameplay events the way a sound/effects layer would consume them
    #[derive(Default)]
    struct EventLog {
        shots: u32,
        kills: u32,
        pickups: u32,
    }

    impl EffectSink for EventLog {
        fn emit(&mut self, event: GameEvent) {
            match event {
                GameEvent::Shoot { bullets, .. } => {
                    self.shots += bullets;
                    log::trace!("shoot x{}", bullets);
                }
                GameEvent::EnemyKilled { shape, xp_value, .. } => {
                    self.kills += 1;
                    log::debug!("killed {:?} worth {} xp", shape, xp_value);
                }
                GameEvent::XpPickup { .. } => self.pickups += 1,
                GameEvent::PlayerHit { damage, hp } => {
                    log::debug!("player hit for {:.1}, {:.1} hp left", damage, hp);
                }
                GameEvent::LevelUp { level, choices } => {
                    let keys: Vec<&str> = choices.iter().map(|c| c.key()).collect();
                    log::info!("level {} choices: {}", level, keys.join(", "));
                }
                GameEvent::UpgradeApplied { upgrade } => {
                    log::info!("picked {}", upgrade.map(|u| u.name()).unwrap_or("nothing"));
                }
                other => log::trace!("{:?}", other),
            }
        }
    }

    fn load_tuning() -> Tuning {
        let Some(path) = std::env::var_os("POLY_JUMPER_TUNING") else {
            return Tuning::default();
        };
        let path = PathBuf::from(path);
        match std::fs::read_to_string(&path) {
            Ok(json) => match Tuning::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Bad tuning file {}: {}, using defaults", path.display(), e);
                    Tuning::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {}, using defaults", path.display(), e);
                Tuning::default()
            }
        }
    }

    fn parse_arg<T: std::str::FromStr>(arg: Option<String>, name: &str, default: T) -> T {
        match arg {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("Invalid {} '{}', using default", name, raw);
                default
            }),
            None => default,
        }
    }

    fn record_run(state: &GameState, path: &Path) {
        let mut scores = HighScores::load(path);
        let run = RunRecord {
            score: state.score_points(),
            time_survived: state.game_time,
            level: state.player.level,
            seed: state.seed,
        };
        match scores.add_run(run) {
            Some(rank) => {
                log::info!("New high score, rank {}", rank);
                scores.save(path);
            }
            None => log::info!("Score did not make the table"),
        }
    }

    pub fn run() {
        env_logger::init();

        let mut args = std::env::args().skip(1);
        let seed: u64 = parse_arg(args.next(), "seed", 0xC0FFEE);
        let seconds: f32 = parse_arg(args.next(), "seconds", DEFAULT_SECONDS);

        let mut state = GameState::with_tuning(seed, WIDTH, HEIGHT, load_tuning());
        log::info!("Poly Jumper starting (seed {}, {}s budget)", seed, seconds);

        let input = TickInput {
            autoplay: true,
            ..Default::default()
        };
        let mut sink = EventLog::default();
        let frames = (seconds.max(0.0) / FRAME_DT) as u64;
        for _ in 0..frames {
            tick(&mut state, &input, FRAME_DT);
            state.flush_events(&mut sink);
            if state.phase == GamePhase::GameOver {
                break;
            }
        }

        log::info!(
            "Run finished: score {}, {:.1}s, level {}, {} shots, {} kills, {} pickups",
            state.score_points(),
            state.game_time,
            state.player.level,
            sink.shots,
            sink.kills,
            sink.pickups
        );

        if let Some(path) = std::env::var_os("POLY_JUMPER_SCORES") {
            record_run(&state, Path::new(&path));
        }

        match serde_json::to_string_pretty(&state.snapshot()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize snapshot: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    runner::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The core is driven by a browser host on wasm
}
