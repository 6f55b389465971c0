//! Per-tick interaction logic shared by all modes.

use glam::Vec2;

use super::state::{GameMode, GameState, SoundCue, VisualEffect, level_for_score};
use crate::consts::*;
use crate::pixel_distance;
use crate::source::landmark::{INDEX_TIP, THUMB_TIP};

/// Input for a single tick.
///
/// Coordinates are pixel-space, already mirrored to match the selfie view.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Index fingertip position, if a hand was detected this tick
    pub fingertip: Option<(i32, i32)>,
    /// All 21 hand landmarks; required for pinch detection in Grip mode
    pub landmarks: Option<Vec<(i32, i32)>>,
    /// Monotonic timestamp in milliseconds
    pub now_ms: u64,
}

/// Advance the round by one tick.
///
/// Runs the shared protocol: prune expired effects, advance target physics,
/// evaluate the mode-specific hit test, then charge an expiry miss if the
/// current target outlived its budget. Returns the sound cue to play, if any.
pub fn tick(state: &mut GameState, input: &TickInput) -> Option<SoundCue> {
    let now = input.now_ms;
    let mut cue = None;

    state.effects.retain(|e| e.until_ms() > now);

    if state.mode != GameMode::Sequence {
        if let Some(item) = state.item.as_mut() {
            item.advance(state.width, state.height);
        } else {
            // Replacement slot should never be empty past a single tick
            state.spawn_item(now);
        }
    }

    // Hit evaluation needs a detected fingertip; timers below run regardless
    if let Some(tip) = input.fingertip {
        if evaluate_hit(state, tip, input) {
            state.score += 1;
            let new_level = level_for_score(state.score);
            if new_level > state.level {
                state.effects.push(VisualEffect::LevelUp {
                    until_ms: now + EFFECT_LEVELUP_MS,
                });
            }
            state.level = new_level;
            cue = Some(SoundCue::Correct);

            match state.mode {
                GameMode::Tap => {
                    if let Some(item) = state.item {
                        state.effects.push(VisualEffect::Hit {
                            pos: item.pos,
                            until_ms: now + EFFECT_HIT_MS,
                        });
                    }
                }
                GameMode::Grip | GameMode::Hold => {
                    if let Some(item) = state.item {
                        state.effects.push(VisualEffect::Grab {
                            pos: item.pos,
                            until_ms: now + EFFECT_HIT_MS,
                        });
                    }
                }
                GameMode::Sequence => {}
            }

            if state.mode == GameMode::Sequence {
                if state.seq_targets.is_empty() {
                    state.refill_sequence();
                }
            } else {
                state.spawn_item(now);
            }
        }
    }

    // Lifetime management; Sequence mode has no expiry
    if let Some(budget) = state.mode.lifetime_ms() {
        let elapsed = now.saturating_sub(state.item_spawn_ms);
        if elapsed >= budget {
            state.score = state.score.saturating_sub(1);
            state.level = level_for_score(state.score);
            state.effects.push(VisualEffect::Fail {
                until_ms: now + EFFECT_FAIL_MS,
            });
            cue = Some(SoundCue::Fail);
            state.spawn_item(now);
        }
    }

    cue
}

/// Mode-specific hit test. Mutates only the hold accumulator and the
/// sequence queue; scoring side effects happen in [`tick`].
fn evaluate_hit(state: &mut GameState, tip: (i32, i32), input: &TickInput) -> bool {
    let tip_pos = Vec2::new(tip.0 as f32, tip.1 as f32);

    match state.mode {
        GameMode::Tap => state
            .item
            .map(|item| item.contains(tip_pos))
            .unwrap_or(false),

        GameMode::Grip => {
            // Pinch detection needs the raw landmark list; without it no
            // hit is possible this tick
            let Some(landmarks) = input.landmarks.as_deref() else {
                return false;
            };
            let (Some(&thumb), Some(&index)) =
                (landmarks.get(THUMB_TIP), landmarks.get(INDEX_TIP))
            else {
                return false;
            };
            if pixel_distance(thumb, index) >= PINCH_THRESHOLD_PX {
                return false;
            }
            let index_pos = Vec2::new(index.0 as f32, index.1 as f32);
            state
                .item
                .map(|item| item.contains(index_pos))
                .unwrap_or(false)
        }

        GameMode::Hold => {
            let Some(item) = state.item else {
                return false;
            };
            if item.contains(tip_pos) {
                state.hold_accum_ms += HOLD_GAIN_MS;
            } else {
                state.hold_accum_ms = state.hold_accum_ms.saturating_sub(HOLD_DECAY_MS);
            }
            if state.hold_accum_ms >= HOLD_THRESHOLD_MS {
                state.hold_accum_ms = 0;
                true
            } else {
                false
            }
        }

        GameMode::Sequence => {
            let Some(&head) = state.seq_targets.front() else {
                return false;
            };
            // Only the head of the queue is tappable; by construction its
            // label is the next expected one
            if head.label != state.seq_current {
                return false;
            }
            if tip_pos.distance(head.pos) <= head.radius as f32 {
                state.seq_targets.pop_front();
                state.seq_current += 1;
                true
            } else {
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::item::Item;
    use crate::sim::state::SeqTarget;
    use std::collections::VecDeque;

    fn state(mode: GameMode) -> GameState {
        GameState::new(mode, 640, 480, 42, 0)
    }

    /// Pin the active item to a known position so hit tests are exact.
    fn place_item(state: &mut GameState, x: f32, y: f32) {
        state.item = Some(Item {
            pos: Vec2::new(x, y),
            radius: 20,
            vel: Vec2::ZERO,
        });
    }

    fn touch(x: i32, y: i32, now_ms: u64) -> TickInput {
        TickInput {
            fingertip: Some((x, y)),
            landmarks: None,
            now_ms,
        }
    }

    /// 21 landmarks with the thumb and index tips at the given positions.
    fn hand_with_pinch(thumb: (i32, i32), index: (i32, i32)) -> Vec<(i32, i32)> {
        let mut lm = vec![(0, 0); 21];
        lm[THUMB_TIP] = thumb;
        lm[INDEX_TIP] = index;
        lm
    }

    #[test]
    fn test_tap_hit_scores_and_respawns() {
        let mut s = state(GameMode::Tap);
        place_item(&mut s, 100.0, 100.0);

        let cue = tick(&mut s, &touch(100, 100, 50));
        assert_eq!(cue, Some(SoundCue::Correct));
        assert_eq!(s.score, 1);
        assert_eq!(s.level, 1);
        assert_eq!(s.item_spawn_ms, 50);
        assert!(s.item.is_some());
        assert!(
            s.effects
                .iter()
                .any(|e| matches!(e, VisualEffect::Hit { .. }))
        );
    }

    #[test]
    fn test_tap_miss_outside_disk() {
        let mut s = state(GameMode::Tap);
        place_item(&mut s, 100.0, 100.0);

        let cue = tick(&mut s, &touch(130, 100, 50));
        assert_eq!(cue, None);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn test_fifth_point_levels_up() {
        let mut s = state(GameMode::Tap);
        s.score = 4;
        s.level = 1;
        place_item(&mut s, 100.0, 100.0);

        tick(&mut s, &touch(100, 100, 50));
        assert_eq!(s.score, 5);
        assert_eq!(s.level, 2);
        assert!(
            s.effects
                .iter()
                .any(|e| matches!(e, VisualEffect::LevelUp { .. }))
        );
    }

    #[test]
    fn test_expiry_decrements_and_respawns() {
        let mut s = state(GameMode::Tap);
        s.score = 3;
        s.level = 1;
        let old_item = s.item;

        let now = ITEM_LIFETIME_MS + 10;
        let cue = tick(
            &mut s,
            &TickInput {
                fingertip: None,
                landmarks: None,
                now_ms: now,
            },
        );
        assert_eq!(cue, Some(SoundCue::Fail));
        assert_eq!(s.score, 2);
        assert_eq!(s.level, 1);
        assert_eq!(s.item_spawn_ms, now);
        assert_ne!(s.item, old_item);
        assert!(
            s.effects
                .iter()
                .any(|e| matches!(e, VisualEffect::Fail { .. }))
        );
    }

    #[test]
    fn test_expiry_floors_score_at_zero() {
        let mut s = state(GameMode::Tap);
        assert_eq!(s.score, 0);

        tick(
            &mut s,
            &TickInput {
                fingertip: None,
                landmarks: None,
                now_ms: ITEM_LIFETIME_MS,
            },
        );
        assert_eq!(s.score, 0);
        assert_eq!(s.level, 1);
    }

    #[test]
    fn test_no_fingertip_still_advances_physics() {
        let mut s = state(GameMode::Tap);
        s.item = Some(Item {
            pos: Vec2::new(100.0, 100.0),
            radius: 20,
            vel: Vec2::new(2.0, 1.0),
        });

        tick(
            &mut s,
            &TickInput {
                fingertip: None,
                landmarks: None,
                now_ms: 33,
            },
        );
        let item = s.item.unwrap();
        assert_eq!(item.pos, Vec2::new(102.0, 101.0));
        assert_eq!(s.score, 0);
    }

    #[test]
    fn test_grip_pinch_over_threshold_is_no_hit() {
        let mut s = state(GameMode::Grip);
        place_item(&mut s, 100.0, 100.0);

        // 45 px apart: above the 40 px threshold, index tip inside the disk
        let input = TickInput {
            fingertip: Some((100, 100)),
            landmarks: Some(hand_with_pinch((145, 100), (100, 100))),
            now_ms: 50,
        };
        let cue = tick(&mut s, &input);
        assert_eq!(cue, None);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn test_grip_pinch_under_threshold_hits() {
        let mut s = state(GameMode::Grip);
        place_item(&mut s, 100.0, 100.0);

        let input = TickInput {
            fingertip: Some((100, 100)),
            landmarks: Some(hand_with_pinch((130, 100), (100, 100))),
            now_ms: 50,
        };
        let cue = tick(&mut s, &input);
        assert_eq!(cue, Some(SoundCue::Correct));
        assert_eq!(s.score, 1);
        assert!(
            s.effects
                .iter()
                .any(|e| matches!(e, VisualEffect::Grab { .. }))
        );
    }

    #[test]
    fn test_grip_without_landmarks_cannot_hit() {
        let mut s = state(GameMode::Grip);
        place_item(&mut s, 100.0, 100.0);

        let cue = tick(&mut s, &touch(100, 100, 50));
        assert_eq!(cue, None);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn test_hold_accumulates_and_fires_once() {
        let mut s = state(GameMode::Hold);
        place_item(&mut s, 100.0, 100.0);
        s.hold_accum_ms = HOLD_THRESHOLD_MS - 10;

        let cue = tick(&mut s, &touch(100, 100, 50));
        assert_eq!(cue, Some(SoundCue::Correct));
        assert_eq!(s.score, 1);
        // Accumulator resets in the same tick the hit fires
        assert_eq!(s.hold_accum_ms, 0);
    }

    #[test]
    fn test_hold_gains_fixed_step_inside() {
        let mut s = state(GameMode::Hold);
        place_item(&mut s, 100.0, 100.0);

        tick(&mut s, &touch(100, 100, 33));
        assert_eq!(s.hold_accum_ms, HOLD_GAIN_MS);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn test_hold_decays_outside_floored_at_zero() {
        let mut s = state(GameMode::Hold);
        place_item(&mut s, 100.0, 100.0);
        s.hold_accum_ms = 40;

        // Fingertip far from the target: decay exceeds the remainder
        tick(&mut s, &touch(500, 400, 33));
        assert_eq!(s.hold_accum_ms, 0);
        tick(&mut s, &touch(500, 400, 66));
        assert_eq!(s.hold_accum_ms, 0);
    }

    #[test]
    fn test_hold_accumulator_unchanged_without_fingertip() {
        let mut s = state(GameMode::Hold);
        place_item(&mut s, 100.0, 100.0);
        s.hold_accum_ms = 500;

        tick(
            &mut s,
            &TickInput {
                fingertip: None,
                landmarks: None,
                now_ms: 33,
            },
        );
        assert_eq!(s.hold_accum_ms, 500);
    }

    #[test]
    fn test_hold_full_dwell_from_zero() {
        let mut s = state(GameMode::Hold);
        place_item(&mut s, 100.0, 100.0);

        // 3000 / 33 rounds up to 91 ticks inside the disk
        let mut hits = 0;
        for i in 1..=91u64 {
            if tick(&mut s, &touch(100, 100, i * 33)) == Some(SoundCue::Correct) {
                hits += 1;
            }
        }
        assert_eq!(hits, 1);
        assert_eq!(s.score, 1);
        assert_eq!(s.hold_accum_ms, 0);
    }

    #[test]
    fn test_sequence_in_order_completes_and_refills() {
        let mut s = state(GameMode::Sequence);
        let targets: Vec<SeqTarget> = s.seq_targets.iter().copied().collect();

        for (i, t) in targets.iter().enumerate() {
            let cue = tick(
                &mut s,
                &touch(t.pos.x as i32, t.pos.y as i32, (i as u64 + 1) * 33),
            );
            assert_eq!(cue, Some(SoundCue::Correct));
        }

        assert_eq!(s.score, 5);
        assert_eq!(s.level, 2);
        // Batch drained: a fresh one appears and the expected label resets
        assert_eq!(s.seq_targets.len(), SEQ_BATCH as usize);
        assert_eq!(s.seq_current, 1);
        assert_eq!(s.seq_targets.front().unwrap().label, 1);
    }

    #[test]
    fn test_sequence_ignores_non_head_targets() {
        let mut s = state(GameMode::Sequence);
        s.seq_targets = VecDeque::from(vec![
            SeqTarget {
                pos: Vec2::new(100.0, 100.0),
                radius: 18,
                label: 1,
            },
            SeqTarget {
                pos: Vec2::new(300.0, 300.0),
                radius: 18,
                label: 2,
            },
        ]);
        s.seq_current = 1;

        // Touching target 2 while 1 is expected does nothing
        let cue = tick(&mut s, &touch(300, 300, 33));
        assert_eq!(cue, None);
        assert_eq!(s.score, 0);
        assert_eq!(s.seq_targets.len(), 2);
        assert_eq!(s.seq_current, 1);
    }

    #[test]
    fn test_sequence_has_no_expiry() {
        let mut s = state(GameMode::Sequence);
        let cue = tick(
            &mut s,
            &TickInput {
                fingertip: None,
                landmarks: None,
                now_ms: ITEM_LIFETIME_MS * 10,
            },
        );
        assert_eq!(cue, None);
        assert_eq!(s.score, 0);
        assert_eq!(s.seq_targets.len(), SEQ_BATCH as usize);
    }

    #[test]
    fn test_effects_expire() {
        let mut s = state(GameMode::Tap);
        s.effects.push(VisualEffect::Fail { until_ms: 100 });

        tick(
            &mut s,
            &TickInput {
                fingertip: None,
                landmarks: None,
                now_ms: 200,
            },
        );
        assert!(s.effects.is_empty());
    }

    #[test]
    fn test_hit_resets_expiry_clock() {
        let mut s = state(GameMode::Tap);
        place_item(&mut s, 100.0, 100.0);

        // Hit just before the budget would elapse; the fresh target must
        // not be charged as a miss in the same tick
        let now = ITEM_LIFETIME_MS - 1;
        let cue = tick(&mut s, &touch(100, 100, now));
        assert_eq!(cue, Some(SoundCue::Correct));
        assert_eq!(s.score, 1);
        assert_eq!(s.item_spawn_ms, now);
    }
}
