//! Hand-landmark acquisition boundary
//!
//! The engine consumes per-tick hand observations through [`LandmarkSource`].
//! The crate ships a scripted simulation source ([`scripted::ScriptedSource`])
//! so the game runs without any hardware; a real camera + hand-landmark
//! pipeline plugs in behind the same trait.

pub mod scripted;

pub use scripted::ScriptedSource;

use thiserror::Error;

/// Hand landmark indices (MediaPipe hand landmark model convention).
pub mod landmark {
    pub const WRIST: usize = 0;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_TIP: usize = 8;
    /// Total landmarks per detected hand
    pub const COUNT: usize = 21;
}

/// Landmarks for one detected hand, in pixel coordinates.
///
/// Positions arrive already mirrored to match the selfie view, so moving a
/// hand to the player's right moves the landmarks right on the canvas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandObservation {
    /// All 21 landmarks in model order
    pub landmarks: Vec<(i32, i32)>,
}

impl HandObservation {
    /// Index fingertip (landmark 8), if the landmark list is complete enough.
    pub fn index_tip(&self) -> Option<(i32, i32)> {
        self.landmarks.get(landmark::INDEX_TIP).copied()
    }

    /// Thumb tip (landmark 4).
    pub fn thumb_tip(&self) -> Option<(i32, i32)> {
        self.landmarks.get(landmark::THUMB_TIP).copied()
    }
}

/// Result of polling the source for one tick.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Capture {
    /// No camera frame was available this tick; gameplay timers still run
    #[default]
    NoFrame,
    /// A frame arrived; a hand may or may not have been detected in it
    Frame { hand: Option<HandObservation> },
}

/// Failures that are fatal to a round: the device or the detection pipeline
/// could not be brought up. Transient conditions (no frame, no hand) are
/// data, not errors - see [`Capture`].
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot open camera device {index}")]
    Camera { index: u32 },
    #[error("hand detection pipeline failed to initialize: {reason}")]
    Pipeline { reason: String },
}

/// Per-tick provider of hand observations.
///
/// The device is scoped to one round: `open` at round start, `capture` once
/// per tick, `close` when the round ends. Implementations also release their
/// resources in `Drop` so every exit path cleans up.
pub trait LandmarkSource {
    /// Acquire the device and warm up the detection pipeline.
    fn open(&mut self) -> Result<(), SourceError>;

    /// Poll for the next frame. Must not block longer than a frame interval.
    fn capture(&mut self) -> Capture;

    /// Release the device.
    fn close(&mut self);
}
