//! Per-round configuration.
//!
//! Everything a round needs travels in this struct; nothing is read from
//! process-wide state. Gameplay balance constants live in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::sim::GameMode;

/// Options for one round, passed explicitly into the session runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Gameplay mode for the round
    pub mode: GameMode,
    /// Suppress sound cues
    pub muted: bool,
    /// Canvas width the engine plays on (camera frames are scaled to this)
    pub width: i32,
    /// Canvas height
    pub height: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: GameMode::Tap,
            muted: false,
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
        }
    }
}
