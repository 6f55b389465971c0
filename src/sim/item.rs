//! Circular target entity: spawn, bounce physics, hit testing.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::SPEED_PER_LEVEL;

/// A circular target the player must reach.
///
/// Position is kept in subpixels for smooth movement; velocity is in
/// pixels per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub pos: Vec2,
    pub radius: i32,
    pub vel: Vec2,
}

impl Item {
    /// Spawn a new item fully inside the `width` x `height` canvas.
    ///
    /// At level 1 the item is static. Above that it drifts at
    /// `level * 0.5` px/tick in a uniformly random direction.
    pub fn spawn(rng: &mut impl Rng, width: i32, height: i32, radius: i32, level: u32) -> Self {
        let x = rng.random_range(radius..=(width - radius).max(radius));
        let y = rng.random_range(radius..=(height - radius).max(radius));

        let vel = if level <= 1 {
            Vec2::ZERO
        } else {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            Vec2::new(angle.cos(), angle.sin()) * (level as f32 * SPEED_PER_LEVEL)
        };

        Self {
            pos: Vec2::new(x as f32, y as f32),
            radius,
            vel,
        }
    }

    /// Advance one tick of movement and bounce off the canvas edges.
    ///
    /// Keeps the center within `[radius, dim - radius]` on both axes; a
    /// boundary contact clamps the position and inverts that axis's
    /// velocity sign (elastic bounce, axes handled independently).
    pub fn advance(&mut self, width: i32, height: i32) {
        self.pos += self.vel;
        let r = self.radius as f32;

        if self.pos.x < r {
            self.pos.x = r;
            self.vel.x = -self.vel.x;
        } else if self.pos.x > width as f32 - r {
            self.pos.x = width as f32 - r;
            self.vel.x = -self.vel.x;
        }

        if self.pos.y < r {
            self.pos.y = r;
            self.vel.y = -self.vel.y;
        } else if self.pos.y > height as f32 - r {
            self.pos.y = height as f32 - r;
            self.vel.y = -self.vel.y;
        }
    }

    /// Closed-disk hit test: the boundary counts as a hit.
    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance(point) <= self.radius as f32
    }
}
