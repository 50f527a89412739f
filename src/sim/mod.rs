//! Deterministic simulation module
//!
//! All demo logic lives here. This module must be pure and deterministic:
//! - Measured delta time, never an assumed frame rate
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! Entities are value-like records: each ball, the orbit sample and the ring
//! state are produced from (previous state, delta time, parameters) with no
//! references between them. The clock is the only shared mutable state and
//! is owned exclusively by [`SimulationHost`].

pub mod ball;
pub mod clock;
pub mod host;
pub mod orbit;
pub mod ring;

pub use ball::BallState;
pub use clock::AnimationClock;
pub use host::{Demo, RenderState, SimulationHost};
pub use orbit::{OrbitSample, sample as orbit_sample};
pub use ring::RingState;
