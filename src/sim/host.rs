//! Simulation host
//!
//! Owns the one [`AnimationClock`], the validated parameter set, the seeded
//! RNG and the active demo's entities. Each host tick fans the measured
//! delta out to the active demo and publishes a fresh [`RenderState`]
//! snapshot; a consumer never observes a partially updated entity.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::BallState;
use super::clock::AnimationClock;
use super::orbit::{self, OrbitSample};
use super::ring::RingState;
use crate::consts::{BALL_COUNT, MAX_FRAME_DELTA, TIME_DISPLAY_UNIT};
use crate::params::{self, ParamError, SimParams};

/// Which demonstration the host is currently running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Demo {
    #[default]
    Bounce,
    Orbit,
    Ring,
}

impl Demo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Demo::Bounce => "bounce",
            Demo::Orbit => "orbit",
            Demo::Ring => "ring",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bounce" => Some(Demo::Bounce),
            "orbit" => Some(Demo::Orbit),
            "ring" => Some(Demo::Ring),
            _ => None,
        }
    }
}

/// Immutable per-tick snapshot handed to the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderState {
    Bounce {
        /// Simulation seconds
        time: f32,
        /// Display counter the bounce page shows (floor of time / unit)
        display_ticks: u64,
        /// Top-left corner of each ball, simulation-space pixels
        balls: Vec<Vec2>,
    },
    Orbit {
        time: f32,
        body: OrbitSample,
    },
    Ring {
        inclination_deg: f32,
        orbit_angle_deg: f32,
        rise: f32,
        rock: f32,
    },
}

/// Orchestrates the clock and the active demo's entities.
pub struct SimulationHost {
    clock: AnimationClock,
    params: SimParams,
    demo: Demo,
    seed: u64,
    rng: Pcg32,
    balls: Vec<BallState>,
    ring: RingState,
    snapshot: RenderState,
}

impl SimulationHost {
    /// Create a paused host running the bounce demo.
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let balls = (0..BALL_COUNT).map(|_| BallState::new_random(&mut rng)).collect();
        let mut host = Self {
            clock: AnimationClock::new(),
            params: SimParams::default(),
            demo: Demo::Bounce,
            seed,
            rng,
            balls,
            ring: RingState::new(),
            snapshot: RenderState::Bounce {
                time: 0.0,
                display_ticks: 0,
                balls: Vec::new(),
            },
        };
        host.rebuild_snapshot();
        log::info!("simulation host ready (seed {seed})");
        host
    }

    /// Feed one host frame timestamp (milliseconds) and publish the
    /// resulting snapshot.
    ///
    /// While paused the clock applies no change and entity state is left
    /// untouched; the returned snapshot simply restates the current state.
    pub fn advance(&mut self, host_timestamp_ms: f64) -> &RenderState {
        self.clock.tick(host_timestamp_ms);

        if self.clock.is_running() {
            match self.demo {
                Demo::Bounce => {
                    // One capped step per frame; dt 0 (baseline latch or
                    // scheduler jitter) falls through as a no-op inside step
                    let dt = self.clock.last_delta().min(MAX_FRAME_DELTA);
                    let gravity = self.params.gravity();
                    let restitution = self.params.restitution();
                    for ball in &mut self.balls {
                        *ball = ball.step(gravity, restitution, dt);
                    }
                }
                Demo::Orbit => {
                    // Stateless: the snapshot samples at absolute time below
                }
                Demo::Ring => {
                    self.ring.advance();
                }
            }
        }

        self.rebuild_snapshot();
        &self.snapshot
    }

    fn rebuild_snapshot(&mut self) {
        let time = self.clock.elapsed();
        self.snapshot = match self.demo {
            Demo::Bounce => RenderState::Bounce {
                time,
                display_ticks: (time / TIME_DISPLAY_UNIT).floor() as u64,
                balls: self.balls.iter().map(|b| b.pos).collect(),
            },
            Demo::Orbit => RenderState::Orbit {
                time,
                body: orbit::sample(self.params.period(), time),
            },
            Demo::Ring => RenderState::Ring {
                inclination_deg: self.ring.inclination_deg(),
                orbit_angle_deg: self.ring.orbit_angle_deg(),
                rise: self.ring.rise(),
                rock: self.ring.rock(),
            },
        };
    }

    /// Switch demos. The clock resets and the incoming demo's entities are
    /// reinitialized, so each demo starts from a clean t = 0.
    pub fn set_demo(&mut self, demo: Demo) {
        if self.demo == demo {
            return;
        }
        log::info!("switching demo: {} -> {}", self.demo.as_str(), demo.as_str());
        self.demo = demo;
        self.reset();
    }

    pub fn play(&mut self) {
        self.clock.play();
        log::debug!("play");
    }

    pub fn pause(&mut self) {
        self.clock.pause();
        log::debug!("pause");
    }

    /// Zero the clock and reinitialize entity state per each type's reset
    /// rule: balls re-randomize from the host's RNG stream, the ring
    /// returns to its defaults. Does not change the play/pause state.
    pub fn reset(&mut self) {
        self.clock.reset();
        for ball in &mut self.balls {
            *ball = BallState::new_random(&mut self.rng);
        }
        self.ring = RingState::new();
        self.rebuild_snapshot();
        log::debug!("reset");
    }

    // --- parameter boundary -------------------------------------------------

    pub fn set_gravity(&mut self, value: f32) -> Result<(), ParamError> {
        self.params
            .set_gravity(value)
            .inspect_err(|e| log::warn!("rejected input: {e}"))
    }

    pub fn set_restitution(&mut self, value: f32) -> Result<(), ParamError> {
        self.params
            .set_restitution(value)
            .inspect_err(|e| log::warn!("rejected input: {e}"))
    }

    pub fn set_period(&mut self, value: f32) -> Result<(), ParamError> {
        self.params
            .set_period(value)
            .inspect_err(|e| log::warn!("rejected input: {e}"))
    }

    pub fn set_inclination(&mut self, value: f32) -> Result<(), ParamError> {
        let value = params::validate_inclination(value)
            .inspect_err(|e| log::warn!("rejected input: {e}"))?;
        self.ring.set_inclination(value);
        self.rebuild_snapshot();
        Ok(())
    }

    pub fn set_orbit_angle(&mut self, value: f32) -> Result<(), ParamError> {
        let value = params::validate_orbit_angle(value)
            .inspect_err(|e| log::warn!("rejected input: {e}"))?;
        self.ring.set_angle(value);
        self.rebuild_snapshot();
        Ok(())
    }

    /// Direct rock override; any finite value is accepted (rock has no
    /// slider range of its own once decoupled from the orbit angle).
    pub fn set_rock(&mut self, value: f32) -> Result<(), ParamError> {
        if !value.is_finite() {
            let err = ParamError::NotFinite { name: "rock" };
            log::warn!("rejected input: {err}");
            return Err(err);
        }
        self.ring.set_rock(value);
        self.rebuild_snapshot();
        Ok(())
    }

    // --- ring interaction signals ------------------------------------------

    pub fn begin_interaction(&mut self) {
        self.ring.begin_interaction();
    }

    pub fn end_interaction(&mut self) {
        self.ring.end_interaction();
    }

    // --- accessors ----------------------------------------------------------

    #[inline]
    pub fn snapshot(&self) -> &RenderState {
        &self.snapshot
    }

    #[inline]
    pub fn demo(&self) -> Demo {
        self.demo
    }

    #[inline]
    pub fn params(&self) -> &SimParams {
        &self.params
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.clock.is_running()
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn balls(&self) -> &[BallState] {
        &self.balls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BALL_SIZE, BOUNDS_SIZE};

    /// Drive `n` frames at a fixed 60 Hz cadence starting from `start_ms`.
    fn run_frames(host: &mut SimulationHost, start_ms: f64, n: usize) -> f64 {
        let mut ts = start_ms;
        for _ in 0..n {
            host.advance(ts);
            ts += 1000.0 / 60.0;
        }
        ts
    }

    #[test]
    fn test_spawns_full_ball_set_in_bounds() {
        let host = SimulationHost::new(1);
        assert_eq!(host.balls().len(), BALL_COUNT);
        assert!(host.balls().iter().all(|b| b.in_bounds()));
    }

    #[test]
    fn test_paused_host_applies_no_state_change() {
        let mut host = SimulationHost::new(2);
        let before = host.snapshot().clone();
        run_frames(&mut host, 0.0, 10);
        assert_eq!(*host.snapshot(), before);
        assert_eq!(host.elapsed(), 0.0);
    }

    #[test]
    fn test_balls_move_while_playing() {
        let mut host = SimulationHost::new(3);
        let before: Vec<Vec2> = host.balls().iter().map(|b| b.pos).collect();
        host.play();
        run_frames(&mut host, 0.0, 30);
        let after: Vec<Vec2> = host.balls().iter().map(|b| b.pos).collect();
        assert_ne!(before, after);
        assert!(host.balls().iter().all(|b| b.in_bounds()));
        assert!(host.elapsed() > 0.0);
    }

    #[test]
    fn test_same_seed_same_timestamps_same_snapshots() {
        let mut a = SimulationHost::new(42);
        let mut b = SimulationHost::new(42);
        a.play();
        b.play();
        for i in 0..120 {
            let ts = i as f64 * 16.0;
            let sa = a.advance(ts).clone();
            let sb = b.advance(ts).clone();
            assert_eq!(sa, sb);
        }
    }

    #[test]
    fn test_reset_while_playing() {
        let mut host = SimulationHost::new(4);
        host.play();
        let ts = run_frames(&mut host, 0.0, 60);
        let before: Vec<Vec2> = host.balls().iter().map(|b| b.pos).collect();
        assert!(host.elapsed() > 0.5);

        host.reset();
        assert_eq!(host.elapsed(), 0.0);
        assert!(host.is_playing());
        let after: Vec<Vec2> = host.balls().iter().map(|b| b.pos).collect();
        assert_ne!(before, after);
        assert!(host.balls().iter().all(|b| b.in_bounds()));

        // Clock re-latches: the first post-reset frame adds no time
        host.advance(ts + 10_000.0);
        assert_eq!(host.elapsed(), 0.0);
    }

    #[test]
    fn test_pause_resume_has_no_discontinuity() {
        let mut host = SimulationHost::new(5);
        host.set_gravity(500.0).unwrap();
        host.play();
        let ts = run_frames(&mut host, 0.0, 30);
        host.pause();
        let frozen: Vec<Vec2> = host.balls().iter().map(|b| b.pos).collect();
        let elapsed = host.elapsed();

        // A long paused gap of callbacks
        run_frames(&mut host, ts, 20);

        host.play();
        // First post-resume frame latches the baseline: nothing jumps
        host.advance(ts + 120_000.0);
        let resumed: Vec<Vec2> = host.balls().iter().map(|b| b.pos).collect();
        assert_eq!(frozen, resumed);
        assert_eq!(host.elapsed(), elapsed);
    }

    #[test]
    fn test_orbit_snapshot_tracks_absolute_time() {
        let mut host = SimulationHost::new(6);
        host.set_demo(Demo::Orbit);
        host.play();
        host.advance(0.0);
        host.advance(3000.0); // period 6: half a revolution
        match host.snapshot() {
            RenderState::Orbit { time, body } => {
                assert!((time - 3.0).abs() < 1e-3);
                assert!((body.x - (-body.radius + 6.0)).abs() < 0.1);
            }
            other => panic!("expected orbit snapshot, got {other:?}"),
        }
    }

    #[test]
    fn test_ring_advances_once_per_tick() {
        let mut host = SimulationHost::new(7);
        host.set_demo(Demo::Ring);
        host.play();
        run_frames(&mut host, 0.0, 10);
        match host.snapshot() {
            RenderState::Ring { orbit_angle_deg, .. } => {
                assert!((orbit_angle_deg - 1.0).abs() < 1e-3);
            }
            other => panic!("expected ring snapshot, got {other:?}"),
        }
    }

    #[test]
    fn test_ring_interaction_suspends_auto_advance() {
        let mut host = SimulationHost::new(8);
        host.set_demo(Demo::Ring);
        host.play();
        host.begin_interaction();
        host.set_orbit_angle(200.0).unwrap();
        let ts = run_frames(&mut host, 0.0, 50);
        match host.snapshot() {
            RenderState::Ring { orbit_angle_deg, .. } => assert_eq!(*orbit_angle_deg, 200.0),
            other => panic!("expected ring snapshot, got {other:?}"),
        }
        host.end_interaction();
        run_frames(&mut host, ts, 1);
        match host.snapshot() {
            RenderState::Ring { orbit_angle_deg, .. } => {
                assert!((orbit_angle_deg - 200.1).abs() < 1e-3);
            }
            other => panic!("expected ring snapshot, got {other:?}"),
        }
    }

    #[test]
    fn test_demo_switch_resets_clock_and_entities() {
        let mut host = SimulationHost::new(9);
        host.play();
        run_frames(&mut host, 0.0, 30);
        assert!(host.elapsed() > 0.0);

        host.set_demo(Demo::Ring);
        assert_eq!(host.elapsed(), 0.0);
        match host.snapshot() {
            RenderState::Ring {
                inclination_deg,
                orbit_angle_deg,
                ..
            } => {
                assert_eq!(*inclination_deg, 15.0);
                assert_eq!(*orbit_angle_deg, 0.0);
            }
            other => panic!("expected ring snapshot, got {other:?}"),
        }
    }

    #[test]
    fn test_rejected_input_leaves_state_untouched() {
        let mut host = SimulationHost::new(10);
        assert!(host.set_gravity(5000.0).is_err());
        assert!(host.set_inclination(180.0).is_err());
        assert!(host.set_rock(f32::NAN).is_err());
        assert_eq!(host.params().gravity(), 0.0);
        match host.snapshot() {
            RenderState::Bounce { .. } => {}
            other => panic!("expected bounce snapshot, got {other:?}"),
        }
    }

    #[test]
    fn test_balls_never_escape_under_heavy_gravity() {
        let mut host = SimulationHost::new(11);
        host.set_gravity(1000.0).unwrap();
        host.set_restitution(100.0).unwrap();
        host.play();
        let mut ts = 0.0;
        for i in 0..600 {
            // Irregular cadence, including a dropped-frames stall
            ts += if i % 97 == 0 { 250.0 } else { 16.7 };
            host.advance(ts);
            assert!(host.balls().iter().all(|b| b.in_bounds()));
        }
        let max = BOUNDS_SIZE - BALL_SIZE;
        assert!(host.balls().iter().all(|b| b.pos.y <= max));
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut host = SimulationHost::new(12);
        host.play();
        host.advance(0.0);
        let json = serde_json::to_string(host.snapshot()).expect("snapshot should serialize");
        assert!(json.contains("Bounce"));
    }
}
