//! Hand Tap entry point (simulation mode).
//!
//! Runs one round with the synthetic sweeping hand and the console
//! presentation, then updates the persisted high score. A camera-backed
//! [`hand_tap::source::LandmarkSource`] drops in here for the real game.

use std::time::{SystemTime, UNIX_EPOCH};

use hand_tap::consts::TICK_RATE;
use hand_tap::session::run_round;
use hand_tap::sim::GameMode;
use hand_tap::source::ScriptedSource;
use hand_tap::ui::Console;
use hand_tap::{HighScoreStore, Settings};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mode = match args.next() {
        Some(arg) => match GameMode::from_str(&arg) {
            Some(mode) => mode,
            None => {
                eprintln!("unknown mode '{arg}' (expected tap, grip, hold, or seq)");
                std::process::exit(2);
            }
        },
        None => GameMode::Tap,
    };
    // Demo rounds run for a fixed duration; default 20 seconds
    let seconds: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(20);

    let settings = Settings {
        mode,
        ..Settings::default()
    };

    let store = HighScoreStore::new(HighScoreStore::default_path());
    let high_score = store.load();
    log::info!("high score to beat: {high_score}");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut source = ScriptedSource::sweep(settings.width, settings.height);
    let mut presentation = Console::with_tick_limit(seconds * TICK_RATE as u64);

    let score = match run_round(&mut source, &mut presentation, &settings, seed) {
        Ok(score) => score,
        Err(err) => {
            log::error!("round aborted: {err}");
            0
        }
    };

    println!("Mode: {}  Score: {score}", settings.mode.label());
    if score > high_score {
        println!("New high score! (previous: {high_score})");
        store.save(score);
    } else {
        println!("High score: {high_score}");
    }
}
