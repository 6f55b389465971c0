//! Deterministic interaction engine
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Timestamps come from the caller (monotonic milliseconds)
//! - Seeded RNG only
//! - No rendering, device, or filesystem dependencies

pub mod item;
pub mod state;
pub mod tick;

pub use item::Item;
pub use state::{
    GameMode, GameState, SeqTarget, Snapshot, SoundCue, VisualEffect, level_for_score,
};
pub use tick::{TickInput, tick};
