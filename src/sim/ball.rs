//! Ball dynamics for the bounce demo
//!
//! Each ball is an independent value record integrated with semi-implicit
//! Euler: gravity is applied to velocity before the position update, which
//! keeps the constant-force term stable under variable frame deltas. Wall
//! response is per-axis clamp + reflect with percentage restitution, so a
//! corner hit reflects both components in the same step.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{BALL_LAUNCH_SPEED, BALL_SIZE, BOUNDS_SIZE};

/// State of a single ball. Position is the top-left corner of the ball's
/// bounding square, so the valid range per axis is [0, bounds - size].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ball diameter (pixels)
    pub size: f32,
    /// Side length of the square display area (pixels)
    pub bounds: f32,
}

impl BallState {
    /// Spawn with uniformly random position inside the bounds and a
    /// uniformly random velocity in ±[`BALL_LAUNCH_SPEED`] per axis.
    pub fn new_random(rng: &mut Pcg32) -> Self {
        Self::randomized(rng, BALL_SIZE, BOUNDS_SIZE)
    }

    pub fn randomized(rng: &mut Pcg32, size: f32, bounds: f32) -> Self {
        let max = (bounds - size).max(0.0);
        Self {
            pos: Vec2::new(rng.random_range(0.0..=max), rng.random_range(0.0..=max)),
            vel: Vec2::new(
                rng.random_range(-BALL_LAUNCH_SPEED..=BALL_LAUNCH_SPEED),
                rng.random_range(-BALL_LAUNCH_SPEED..=BALL_LAUNCH_SPEED),
            ),
            size,
            bounds,
        }
    }

    /// Advance one step and return the next state.
    ///
    /// Pure: the receiver is not mutated; the host threads the returned
    /// record into the next call. `gravity` is px/s² (positive pulls toward
    /// increasing y), `restitution` is a percentage in [0, 100], `dt` is
    /// seconds. A non-positive `dt` (duplicate or out-of-order tick) returns
    /// the state unchanged.
    pub fn step(&self, gravity: f32, restitution: f32, dt: f32) -> Self {
        if dt <= 0.0 {
            return *self;
        }

        let k = restitution / 100.0;
        let max = self.bounds - self.size;

        let mut vel = self.vel;
        vel.y += gravity * dt;

        let mut pos = self.pos + vel * dt;

        // Left/right walls
        if pos.x <= 0.0 {
            pos.x = 0.0;
            vel.x = vel.x.abs() * k;
        } else if pos.x >= max {
            pos.x = max;
            vel.x = -vel.x.abs() * k;
        }

        // Top/bottom walls
        if pos.y <= 0.0 {
            pos.y = 0.0;
            vel.y = vel.y.abs() * k;
        } else if pos.y >= max {
            pos.y = max;
            vel.y = -vel.y.abs() * k;
        }

        Self { pos, vel, ..*self }
    }

    /// True when both position components are inside [0, bounds - size].
    pub fn in_bounds(&self) -> bool {
        let max = self.bounds - self.size;
        (0.0..=max).contains(&self.pos.x) && (0.0..=max).contains(&self.pos.y)
    }
}
