//! Round execution: the fixed-rate interaction loop.
//!
//! One tick = acquire landmark data, advance the engine, render, then block
//! on the frame pacer. Single-threaded by design; the engine is the only
//! writer of round state and the presentation sees cloned snapshots.

use std::thread;
use std::time::{Duration, Instant};

use crate::consts::TICK_RATE;
use crate::settings::Settings;
use crate::sim::{GameState, TickInput, tick};
use crate::source::{Capture, LandmarkSource, SourceError};
use crate::ui::Presentation;

/// Blocking frame pacer gating the loop to a fixed tick rate.
///
/// The wait at the end of each tick is the loop's sole suspension point.
struct FramePacer {
    period: Duration,
    next: Instant,
}

impl FramePacer {
    fn new(rate: u32) -> Self {
        let period = Duration::from_secs(1) / rate;
        Self {
            period,
            next: Instant::now() + period,
        }
    }

    fn wait(&mut self) {
        let now = Instant::now();
        if self.next > now {
            thread::sleep(self.next - now);
        }
        self.next += self.period;
        // After a stall, restart the cadence instead of bursting to catch up
        if self.next < Instant::now() {
            self.next = Instant::now() + self.period;
        }
    }
}

/// Run one round to completion and return the final score.
///
/// A source that fails to open is fatal: the error is returned, the round
/// never enters play, and the caller treats it as a zero-score round. Once
/// running, the loop ends only on the presentation's quit signal; the
/// in-flight tick completes its render first. The source is released on
/// every exit path (sources also release in `Drop`).
pub fn run_round(
    source: &mut dyn LandmarkSource,
    presentation: &mut dyn Presentation,
    settings: &Settings,
    seed: u64,
) -> Result<u32, SourceError> {
    source.open()?;
    log::info!("round started: mode {}, seed {seed}", settings.mode.label());

    let start = Instant::now();
    let mut state = GameState::new(
        settings.mode,
        settings.width,
        settings.height,
        seed,
        0,
    );
    let mut pacer = FramePacer::new(TICK_RATE);

    while !presentation.wants_quit() {
        let (fingertip, landmarks, have_frame) = match source.capture() {
            Capture::NoFrame => (None, None, false),
            Capture::Frame { hand } => match hand {
                Some(hand) => (hand.index_tip(), Some(hand.landmarks), true),
                None => (None, None, true),
            },
        };

        let input = TickInput {
            fingertip,
            landmarks,
            now_ms: start.elapsed().as_millis() as u64,
        };
        let cue = tick(&mut state, &input);

        presentation.render(&state.snapshot(input.now_ms), have_frame);
        if let Some(cue) = cue {
            if !settings.muted {
                presentation.play(cue);
            }
        }

        pacer.wait();
    }

    source.close();
    log::info!("round over: final score {}", state.score);
    Ok(state.score)
}
