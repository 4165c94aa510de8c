//! Pole Balance headless runner
//!
//! Plays a demo run with the balancing bot and prints a JSON summary.
//!
//! Usage: `pole-balance [seed] [tuning.json]`

use pole_balance::sim::{FrameInput, GameEvent, GamePhase, GameState, frame};
use pole_balance::{Settings, Tuning};
use serde::Serialize;

/// Render rate the demo pretends to run at
const FRAME_DT: f32 = 1.0 / 60.0;
/// Longest demo run in simulated seconds
const MAX_RUN_SECS: f32 = 180.0;

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    survived: f32,
    toppled: bool,
    final_angle: f32,
    gravity_scale: f32,
    mass: f32,
    enemies_spawned: u32,
    hits: u32,
    taps: u32,
}

fn load_tuning(path: &str) -> Tuning {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Could not read tuning file {}: {}", path, e);
            return Tuning::default();
        }
    };
    match Tuning::from_json(&json) {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::warn!("Invalid tuning file {}: {}", path, e);
            Tuning::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5eed);
    let tuning = args.next().map(|p| load_tuning(&p)).unwrap_or_default();

    log::info!("Pole Balance (native) starting, seed {}", seed);

    let mut state = GameState::new(seed, tuning, Settings::default());
    state.start();

    let input = FrameInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut summary = RunSummary {
        seed,
        survived: 0.0,
        toppled: false,
        final_angle: 0.0,
        gravity_scale: 1.0,
        mass: 1.0,
        enemies_spawned: 0,
        hits: 0,
        taps: 0,
    };

    while state.phase == GamePhase::Playing && state.elapsed < MAX_RUN_SECS {
        frame(&mut state, &input, FRAME_DT);
        for event in state.drain_events() {
            match event {
                GameEvent::EnemyEntered { .. } => summary.enemies_spawned += 1,
                GameEvent::PoleHit { .. } | GameEvent::MassStuck { .. } => summary.hits += 1,
                GameEvent::Tap { .. } => summary.taps += 1,
                GameEvent::GravityScaleChanged(scale) => log::info!("Gravity scale {:.1}", scale),
                GameEvent::Toppled { .. } => summary.toppled = true,
                GameEvent::EnemySwipedOff { .. } => {}
            }
        }
    }

    summary.survived = state.elapsed;
    summary.final_angle = state.pole.target_rotation();
    summary.gravity_scale = state.pole.gravity_scale();
    summary.mass = state.pole.mass();

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize summary: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on the web; the host drives `frame` directly
}
