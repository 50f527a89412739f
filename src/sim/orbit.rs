//! Closed-form Keplerian orbit kinematics
//!
//! No integration: the orbiting body's position is a pure function of
//! (period, elapsed time). Orbit size follows Kepler's third law in inverted
//! form, distance ∝ period^(2/3), with a circular-orbit approximation.
//!
//! The phase angle grows without bound so the trig never sees a wrap
//! discontinuity; [`OrbitSample::display_angle`] wraps to [0, 2π) for
//! presentation only.

use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::consts::{KEPLER_DISTANCE_SCALE, ORBIT_BODY_OFFSET, PERIOD_MIN};
use crate::wrap_radians;

/// One sampled point on the orbit, plus the derived orbit geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitSample {
    /// Body center x, offset so the body is centered on the orbit track
    pub x: f32,
    /// Body center y (negated sine: the orbit runs clockwise on screen)
    pub y: f32,
    /// Orbit radius (pixels)
    pub radius: f32,
    /// Unbounded phase angle (radians)
    pub angle: f32,
    /// Constant angular velocity, 2π / period (rad/s)
    pub angular_velocity: f32,
}

impl OrbitSample {
    /// Phase wrapped to [0, 2π), for display read-outs only.
    pub fn display_angle(&self) -> f32 {
        wrap_radians(self.angle)
    }
}

/// Sample the orbit at `elapsed` seconds for the given period.
///
/// `period` is clamped to [`PERIOD_MIN`] so the phase computation can never
/// divide by zero; out-of-range periods are rejected upstream by the
/// parameter boundary before they get here.
pub fn sample(period: f32, elapsed: f32) -> OrbitSample {
    let period = period.max(PERIOD_MIN);

    let distance = KEPLER_DISTANCE_SCALE * period.powf(2.0 / 3.0);
    let radius = distance / 2.0;

    let angle = TAU * elapsed / period;

    OrbitSample {
        x: radius * angle.cos() + ORBIT_BODY_OFFSET,
        y: -radius * angle.sin() + ORBIT_BODY_OFFSET,
        radius,
        angle,
        angular_velocity: TAU / period,
    }
}
