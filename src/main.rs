//! Physics Toys entry point
//!
//! Headless driver: runs the chosen demo at a synthetic fixed 60 Hz frame
//! cadence and prints one JSON snapshot per frame to stdout. A renderer
//! would consume the same snapshots from [`SimulationHost::advance`] with
//! real frame-callback timestamps instead.

use physics_toys::sim::{Demo, SimulationHost};

/// Synthetic frame interval (milliseconds)
const FRAME_MS: f64 = 1000.0 / 60.0;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let demo = match args.next() {
        Some(name) => match Demo::from_str(&name) {
            Some(demo) => demo,
            None => {
                eprintln!("unknown demo '{name}' (expected bounce, orbit or ring)");
                eprintln!("usage: physics-toys [demo] [seconds] [seed]");
                std::process::exit(2);
            }
        },
        None => Demo::Bounce,
    };
    let seconds: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(2.0);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    log::info!("running {} demo for {seconds}s (seed {seed})", demo.as_str());

    let mut host = SimulationHost::new(seed);
    host.set_demo(demo);
    host.play();

    let frames = (seconds * 60.0).ceil() as u64;
    for frame in 0..=frames {
        let snapshot = host.advance(frame as f64 * FRAME_MS);
        match serde_json::to_string(snapshot) {
            Ok(line) => println!("{line}"),
            Err(e) => {
                log::error!("snapshot serialization failed: {e}");
                std::process::exit(1);
            }
        }
    }

    log::info!("done: {} frames, sim time {:.3}s", frames + 1, host.elapsed());
}
