//! Presentation boundary: rendering, sound cues, and quit input.
//!
//! The engine never draws or plays anything itself; it hands a read-only
//! [`Snapshot`] to a [`Presentation`] each tick and surfaces sound cues as
//! events. A windowed renderer plugs in behind the same trait.

use crate::sim::{Snapshot, SoundCue};

/// Consumer of per-tick round output.
pub trait Presentation {
    /// Draw one tick. `have_frame` is false when the camera produced no
    /// frame; implementations show a blank background in that case.
    fn render(&mut self, snapshot: &Snapshot, have_frame: bool);

    /// Play a sound cue (already filtered through the mute setting).
    fn play(&mut self, cue: SoundCue);

    /// Poll for the quit/escape signal. Checked once per tick; the
    /// in-flight tick finishes its render before the round ends.
    fn wants_quit(&mut self) -> bool;
}

/// Presentation that draws nothing. Drives headless demo rounds and tests:
/// counts ticks, records cues, and requests quit after an optional limit.
#[derive(Debug, Default)]
pub struct Headless {
    pub ticks: u64,
    pub cues: Vec<SoundCue>,
    quit_after: Option<u64>,
}

impl Headless {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quit once the given number of ticks has rendered.
    pub fn with_tick_limit(ticks: u64) -> Self {
        Self {
            quit_after: Some(ticks),
            ..Self::default()
        }
    }
}

impl Presentation for Headless {
    fn render(&mut self, _snapshot: &Snapshot, _have_frame: bool) {
        self.ticks += 1;
    }

    fn play(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }

    fn wants_quit(&mut self) -> bool {
        self.quit_after.is_some_and(|limit| self.ticks >= limit)
    }
}

/// Presentation that narrates the round to the log instead of a window.
#[derive(Debug, Default)]
pub struct Console {
    headless: Headless,
    last_score: Option<u32>,
}

impl Console {
    pub fn with_tick_limit(ticks: u64) -> Self {
        Self {
            headless: Headless::with_tick_limit(ticks),
            last_score: None,
        }
    }
}

impl Presentation for Console {
    fn render(&mut self, snapshot: &Snapshot, have_frame: bool) {
        self.headless.render(snapshot, have_frame);
        if self.last_score != Some(snapshot.score) {
            log::info!(
                "[{}] score {} level {}",
                snapshot.mode.label(),
                snapshot.score,
                snapshot.level
            );
            self.last_score = Some(snapshot.score);
        }
    }

    fn play(&mut self, cue: SoundCue) {
        log::debug!("sound cue: {:?}", cue);
        self.headless.play(cue);
    }

    fn wants_quit(&mut self) -> bool {
        self.headless.wants_quit()
    }
}
