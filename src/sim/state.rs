//! Session state for one round: mode, score, targets, visual effects.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::item::Item;
use crate::consts::*;

/// Gameplay mode; selects the hit-detection policy for the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Touch the target with the index fingertip
    #[default]
    Tap,
    /// Pinch (thumb + index) over the target
    Grip,
    /// Dwell inside the target until the hold threshold is reached
    Hold,
    /// Tap numbered targets in label order
    Sequence,
}

impl GameMode {
    pub fn label(&self) -> &'static str {
        match self {
            GameMode::Tap => "Tap",
            GameMode::Grip => "Grip",
            GameMode::Hold => "Hold",
            GameMode::Sequence => "Seq",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tap" => Some(GameMode::Tap),
            "grip" => Some(GameMode::Grip),
            "hold" => Some(GameMode::Hold),
            "seq" | "sequence" => Some(GameMode::Sequence),
            _ => None,
        }
    }

    /// Per-target lifetime budget; `None` means no expiry in this mode.
    pub fn lifetime_ms(&self) -> Option<u64> {
        match self {
            GameMode::Hold => Some(HOLD_ITEM_LIFETIME_MS),
            GameMode::Sequence => None,
            _ => Some(ITEM_LIFETIME_MS),
        }
    }
}

/// One numbered target in Sequence mode.
///
/// Labels are assigned `1..=SEQ_BATCH` in spawn order; targets are static.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeqTarget {
    pub pos: Vec2,
    pub radius: i32,
    pub label: u32,
}

/// A transient overlay effect carrying its own expiry timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VisualEffect {
    /// Burst at the hit position (tap success)
    Hit { pos: Vec2, until_ms: u64 },
    /// Closing-hand flash at the target (grip/hold success)
    Grab { pos: Vec2, until_ms: u64 },
    /// Banner shown when the level increases
    LevelUp { until_ms: u64 },
    /// Red flash on a missed target
    Fail { until_ms: u64 },
}

impl VisualEffect {
    pub fn until_ms(&self) -> u64 {
        match *self {
            VisualEffect::Hit { until_ms, .. }
            | VisualEffect::Grab { until_ms, .. }
            | VisualEffect::LevelUp { until_ms }
            | VisualEffect::Fail { until_ms } => until_ms,
        }
    }
}

/// Audio feedback event surfaced to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Correct,
    Fail,
}

/// Level is a pure function of score: one level per five points, never
/// below 1. Recomputed whenever the score changes; never stored in a way
/// that can drift from it.
pub fn level_for_score(score: u32) -> u32 {
    score / POINTS_PER_LEVEL + 1
}

/// Complete state of one round.
///
/// Exclusively owned by the session runner; the presentation layer only
/// ever sees a [`Snapshot`].
#[derive(Debug, Clone)]
pub struct GameState {
    pub mode: GameMode,
    pub score: u32,
    pub level: u32,
    /// Active target (all modes except Sequence)
    pub item: Option<Item>,
    /// Timestamp when the current item appeared
    pub item_spawn_ms: u64,
    /// Hold-mode dwell accumulator
    pub hold_accum_ms: u32,
    /// Sequence queue; the head is always the next label to hit
    pub seq_targets: VecDeque<SeqTarget>,
    /// Next expected label in Sequence mode
    pub seq_current: u32,
    pub effects: Vec<VisualEffect>,
    /// Canvas bounds, fixed for the life of the round
    pub width: i32,
    pub height: i32,
    rng: Pcg32,
}

impl GameState {
    /// Create the state for a new round and spawn its initial target(s).
    pub fn new(mode: GameMode, width: i32, height: i32, seed: u64, now_ms: u64) -> Self {
        let mut state = Self {
            mode,
            score: 0,
            level: 1,
            item: None,
            item_spawn_ms: now_ms,
            hold_accum_ms: 0,
            seq_targets: VecDeque::new(),
            seq_current: 1,
            effects: Vec::new(),
            width,
            height,
            rng: Pcg32::seed_from_u64(seed),
        };

        if mode == GameMode::Sequence {
            state.refill_sequence();
        } else {
            state.spawn_item(now_ms);
        }

        state
    }

    /// Replace the active item with a fresh spawn at the current level and
    /// reset the spawn clock.
    pub fn spawn_item(&mut self, now_ms: u64) {
        self.item = Some(Item::spawn(
            &mut self.rng,
            self.width,
            self.height,
            ITEM_RADIUS,
            self.level,
        ));
        self.item_spawn_ms = now_ms;
    }

    /// Fill the sequence queue with a fresh randomized batch, labels
    /// `1..=SEQ_BATCH` in spawn order, and reset the expected label.
    pub fn refill_sequence(&mut self) {
        self.seq_targets.clear();
        self.seq_current = 1;
        for label in 1..=SEQ_BATCH {
            let t = Item::spawn(&mut self.rng, self.width, self.height, SEQ_ITEM_RADIUS, 1);
            self.seq_targets.push_back(SeqTarget {
                pos: t.pos,
                radius: t.radius,
                label,
            });
        }
    }

    /// Read-only view for the presentation layer.
    pub fn snapshot(&self, now_ms: u64) -> Snapshot {
        let time_left_ms = self.mode.lifetime_ms().map(|budget| {
            budget.saturating_sub(now_ms.saturating_sub(self.item_spawn_ms))
        });

        Snapshot {
            mode: self.mode,
            score: self.score,
            level: self.level,
            item: self.item,
            seq_targets: self.seq_targets.iter().copied().collect(),
            seq_current: self.seq_current,
            time_left_ms,
            hold_accum_ms: self.hold_accum_ms,
            effects: self.effects.clone(),
        }
    }
}

/// Read-only view of the round handed to the presentation layer each tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub mode: GameMode,
    pub score: u32,
    pub level: u32,
    pub item: Option<Item>,
    pub seq_targets: Vec<SeqTarget>,
    pub seq_current: u32,
    /// Milliseconds until the current target expires (`None` in Sequence mode)
    pub time_left_ms: Option<u64>,
    pub hold_accum_ms: u32,
    pub effects: Vec<VisualEffect>,
}
