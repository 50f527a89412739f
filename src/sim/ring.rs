//! Ring-tilt projection driven by an inclined moon orbit
//!
//! A moon on an orbit inclined by `inclination` degrees sees the planet's
//! ring from a viewpoint that slides above and below the ring plane as the
//! moon goes around. Two display angles fall out of the projection:
//!
//! - `rise` = inclination · sin(orbit angle) — how far the viewpoint sits
//!   out of the ring plane
//! - `rock` = inclination · cos(orbit angle) — the apparent tilt of the ring
//!   as drawn
//!
//! Auto-advance is event-count-driven: each call moves the orbit one fixed
//! step, so suspending it during user interaction owes no catch-up time.
//! The orbit angle wraps at 360°, unlike the orbit demo's unbounded phase:
//! the step is a constant increment, so wrapping here never lands inside a
//! trig discontinuity.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_INCLINATION_DEG, INCLINATION_MAX_DEG, RING_ADVANCE_STEP_DEG};
use crate::wrap_degrees;

/// Ring display state. `rise`/`rock` are derived from the orbit angle until
/// the consumer overrides them directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingState {
    /// Moon orbital inclination (degrees, [0, 90])
    inclination_deg: f32,
    /// Moon position along its orbit (degrees, [0, 360))
    orbit_angle_deg: f32,
    /// Viewpoint angle out of the ring plane (degrees)
    rise: f32,
    /// Viewed ring tilt (degrees)
    rock: f32,
    /// While set, auto-advance is suspended entirely
    user_overriding: bool,
}

impl Default for RingState {
    fn default() -> Self {
        Self::new()
    }
}

impl RingState {
    /// Initial state: 15° inclination, moon at angle 0.
    pub fn new() -> Self {
        let mut ring = Self {
            inclination_deg: DEFAULT_INCLINATION_DEG,
            orbit_angle_deg: 0.0,
            rise: 0.0,
            rock: 0.0,
            user_overriding: false,
        };
        ring.recompute();
        ring
    }

    fn recompute(&mut self) {
        let rad = self.orbit_angle_deg.to_radians();
        self.rise = self.inclination_deg * rad.sin();
        self.rock = self.inclination_deg * rad.cos();
    }

    /// Orbit-driven update: one fixed step around the orbit, modulo 360°,
    /// with `rise`/`rock` recomputed. Does nothing while the user holds a
    /// slider — the orbit resumes from the same angle on release.
    pub fn advance(&mut self) {
        if self.user_overriding {
            return;
        }
        self.orbit_angle_deg = wrap_degrees(self.orbit_angle_deg + RING_ADVANCE_STEP_DEG);
        self.recompute();
    }

    /// Direct angle override (orbit-angle slider): recomputes both display
    /// angles from the supplied value.
    pub fn set_angle(&mut self, angle_deg: f32) {
        self.orbit_angle_deg = wrap_degrees(angle_deg);
        self.recompute();
    }

    /// Change the orbital inclination; `rise`/`rock` follow immediately from
    /// the current orbit angle.
    pub fn set_inclination(&mut self, inclination_deg: f32) {
        self.inclination_deg = inclination_deg.clamp(0.0, INCLINATION_MAX_DEG);
        self.recompute();
    }

    /// Direct rock override (rock slider). Sets `rock` alone: `rise` and the
    /// orbit angle keep their previous values and stay stale until the next
    /// angle-driven update. Rock is presentation-only once manually set.
    pub fn set_rock(&mut self, rock: f32) {
        self.rock = rock;
    }

    /// Consumer signals the user grabbed a slider: suspend auto-advance.
    pub fn begin_interaction(&mut self) {
        self.user_overriding = true;
    }

    /// Slider released: auto-advance resumes from the current angle.
    pub fn end_interaction(&mut self) {
        self.user_overriding = false;
    }

    #[inline]
    pub fn inclination_deg(&self) -> f32 {
        self.inclination_deg
    }

    #[inline]
    pub fn orbit_angle_deg(&self) -> f32 {
        self.orbit_angle_deg
    }

    #[inline]
    pub fn rise(&self) -> f32 {
        self.rise
    }

    #[inline]
    pub fn rock(&self) -> f32 {
        self.rock
    }

    #[inline]
    pub fn is_user_overriding(&self) -> bool {
        self.user_overriding
    }
}
