//! Simulation landmark source - no camera or detection model needed.
//!
//! Two flavors: a fixed script of captures (tests, replays) and a synthetic
//! hand sweeping the canvas (demo runs).

use std::collections::VecDeque;

use super::{Capture, HandObservation, LandmarkSource, SourceError, landmark};

enum Script {
    /// Replay a fixed capture list, then report no frames
    Fixed(VecDeque<Capture>),
    /// Synthesize a hand gliding over the canvas
    Sweep {
        width: i32,
        height: i32,
        tick: u32,
    },
}

/// A [`LandmarkSource`] backed by synthetic data.
pub struct ScriptedSource {
    script: Script,
    open: bool,
}

impl ScriptedSource {
    /// Replay the given captures in order; once exhausted, every further
    /// poll reports [`Capture::NoFrame`].
    pub fn from_script(captures: Vec<Capture>) -> Self {
        Self {
            script: Script::Fixed(captures.into()),
            open: false,
        }
    }

    /// A synthetic hand tracing a smooth closed path over the canvas,
    /// fingers pinched. Crosses most of the play area every few seconds,
    /// which makes demo rounds score without any input device.
    pub fn sweep(width: i32, height: i32) -> Self {
        Self {
            script: Script::Sweep {
                width,
                height,
                tick: 0,
            },
            open: false,
        }
    }

    fn synth_hand(width: i32, height: i32, tick: u32) -> HandObservation {
        // Lissajous path with incommensurate frequencies so the tip does
        // not settle into a short cycle
        let t = tick as f32 * 0.05;
        let cx = width as f32 / 2.0;
        let cy = height as f32 / 2.0;
        let x = cx + (cx - 40.0) * (1.3 * t).sin();
        let y = cy + (cy - 40.0) * (2.1 * t).cos();

        let index = (x as i32, y as i32);
        // Thumb rides close enough to the index tip to count as a pinch
        let thumb = (index.0 - 25, index.1 + 10);

        let mut landmarks = vec![(index.0 - 10, index.1 + 40); landmark::COUNT];
        landmarks[landmark::WRIST] = (index.0 - 20, index.1 + 80);
        landmarks[landmark::THUMB_TIP] = thumb;
        landmarks[landmark::INDEX_TIP] = index;

        HandObservation { landmarks }
    }
}

impl LandmarkSource for ScriptedSource {
    fn open(&mut self) -> Result<(), SourceError> {
        self.open = true;
        Ok(())
    }

    fn capture(&mut self) -> Capture {
        if !self.open {
            return Capture::NoFrame;
        }
        match &mut self.script {
            Script::Fixed(captures) => captures.pop_front().unwrap_or_default(),
            Script::Sweep {
                width,
                height,
                tick,
            } => {
                *tick += 1;
                Capture::Frame {
                    hand: Some(Self::synth_hand(*width, *height, *tick)),
                }
            }
        }
    }

    fn close(&mut self) {
        self.open = false;
    }
}

impl Drop for ScriptedSource {
    fn drop(&mut self) {
        self.close();
    }
}
