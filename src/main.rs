//! Bullet Frenzy headless runner
//!
//! Plays a run on autopilot without a window and logs the HUD as it goes.
//!
//! Usage: `bullet-frenzy [tuning.json] [seed]`

use bullet_frenzy::Tuning;
use bullet_frenzy::sim::{GameEvent, GameState, tick};

/// Stop after this many ticks even if the run is still going
const MAX_TICKS: u64 = 200_000;
/// Log the HUD every this many ticks
const HUD_INTERVAL: u64 = 1_000;

fn main() {
    env_logger::init();
    log::info!("Bullet Frenzy (headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => Tuning::load(&path).unwrap_or_else(|e| {
            log::error!("{e}; using default tuning");
            Tuning::default()
        }),
        None => Tuning::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5EED);

    let mut state = GameState::new(tuning, seed);
    state.autopilot = true;
    log::info!("Seed {seed}, {} enemies", state.enemies.len());

    let mut kills = 0u32;
    let mut hits = 0u32;
    while !state.game_over && state.time_ticks < MAX_TICKS {
        tick(&mut state);

        for event in state.drain_events() {
            match event {
                GameEvent::EnemyDestroyed { .. } => kills += 1,
                GameEvent::PlayerHit { .. } => hits += 1,
                _ => {}
            }
        }

        if state.time_ticks.is_multiple_of(HUD_INTERVAL) {
            for line in state.snapshot().hud_lines().iter().take(2) {
                log::info!("[tick {}] {}", state.time_ticks, line);
            }
        }
    }

    let snapshot = state.snapshot();
    for line in snapshot.hud_lines() {
        println!("{line}");
    }
    println!("ticks: {}  kills: {kills}  hits taken: {hits}", snapshot.tick);
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize final snapshot: {e}"),
    }
}
