//! Validated simulation parameters
//!
//! All externally supplied values pass through here before touching the
//! integrators. A value that is non-finite or outside its documented range
//! is rejected with [`ParamError`]; callers that prefer saturation can use
//! [`SimParams::clamped`]. Inside the sim, parameters are assumed valid.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::consts::{
    GRAVITY_MAX, INCLINATION_MAX_DEG, PERIOD_MAX, PERIOD_MIN, RESTITUTION_MAX,
};
use crate::wrap_degrees;

/// Rejected parameter input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamError {
    /// Value is NaN or infinite
    NotFinite { name: &'static str },
    /// Value is outside its documented range
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::NotFinite { name } => write!(f, "{name} must be a finite number"),
            ParamError::OutOfRange {
                name,
                value,
                min,
                max,
            } => write!(f, "{name} = {value} outside [{min}, {max}]"),
        }
    }
}

impl std::error::Error for ParamError {}

fn check(name: &'static str, value: f32, min: f32, max: f32) -> Result<f32, ParamError> {
    if !value.is_finite() {
        return Err(ParamError::NotFinite { name });
    }
    if value < min || value > max {
        return Err(ParamError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(value)
}

/// Continuous simulation parameters read by the host every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    /// Downward acceleration for the bounce demo (px/s², [0, 1000])
    gravity: f32,
    /// Impact speed retained on wall contact (%, [0, 100])
    restitution: f32,
    /// Orbital period for the orbit demo (seconds, [1, 100])
    period: f32,
}

impl Default for SimParams {
    /// Defaults matching the demo pages: gravity off, perfectly elastic
    /// walls, a 6-second orbit.
    fn default() -> Self {
        Self {
            gravity: 0.0,
            restitution: 100.0,
            period: 6.0,
        }
    }
}

impl SimParams {
    pub fn new(gravity: f32, restitution: f32, period: f32) -> Result<Self, ParamError> {
        let mut params = Self::default();
        params.set_gravity(gravity)?;
        params.set_restitution(restitution)?;
        params.set_period(period)?;
        Ok(params)
    }

    /// Build with every value saturated into range instead of rejected.
    /// Non-finite inputs fall back to the defaults.
    pub fn clamped(gravity: f32, restitution: f32, period: f32) -> Self {
        let defaults = Self::default();
        Self {
            gravity: if gravity.is_finite() {
                gravity.clamp(0.0, GRAVITY_MAX)
            } else {
                defaults.gravity
            },
            restitution: if restitution.is_finite() {
                restitution.clamp(0.0, RESTITUTION_MAX)
            } else {
                defaults.restitution
            },
            period: if period.is_finite() {
                period.clamp(PERIOD_MIN, PERIOD_MAX)
            } else {
                defaults.period
            },
        }
    }

    pub fn set_gravity(&mut self, value: f32) -> Result<(), ParamError> {
        self.gravity = check("gravity", value, 0.0, GRAVITY_MAX)?;
        Ok(())
    }

    pub fn set_restitution(&mut self, value: f32) -> Result<(), ParamError> {
        self.restitution = check("restitution", value, 0.0, RESTITUTION_MAX)?;
        Ok(())
    }

    pub fn set_period(&mut self, value: f32) -> Result<(), ParamError> {
        self.period = check("period", value, PERIOD_MIN, PERIOD_MAX)?;
        Ok(())
    }

    #[inline]
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    #[inline]
    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    #[inline]
    pub fn period(&self) -> f32 {
        self.period
    }
}

/// Validate a ring inclination slider value (degrees, [0, 90]).
pub fn validate_inclination(value: f32) -> Result<f32, ParamError> {
    check("inclination", value, 0.0, INCLINATION_MAX_DEG)
}

/// Validate a ring orbit-angle slider value (degrees). The slider's top stop
/// emits exactly 360, which wraps to 0.
pub fn validate_orbit_angle(value: f32) -> Result<f32, ParamError> {
    check("orbit angle", value, 0.0, 360.0).map(wrap_degrees)
}
