//! Driftbelt headless demo driver
//!
//! Runs a scripted session at a fixed timestep and prints the outcome:
//! survival time, a JSON snapshot of the final frame, and the leaderboard
//! after inserting the run. Useful for smoke-testing the core and for
//! eyeballing balance changes with `RUST_LOG=debug`.

use driftbelt::consts::{MAX_FRAME_DT, SIM_DT};
use driftbelt::sim::{GameEvent, TickInput, World, tick};
use driftbelt::{Config, HighScores};

/// Default seed when none is given on the command line
const DEMO_SEED: u64 = 0xD21F7;

/// Safety cap so a lucky script doesn't run forever
const MAX_SESSION_SECS: f32 = 120.0;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEMO_SEED);

    let config = Config::default();
    let mut world = match World::new(config, seed) {
        Ok(world) => world,
        Err(err) => {
            log::error!("invalid configuration: {err}");
            std::process::exit(1);
        }
    };
    log::info!("session started (seed {seed})");

    let mut frame = 0u64;
    loop {
        let input = scripted_input(frame);
        // A real host would clamp wall-clock dt the same way
        let dt = SIM_DT.min(MAX_FRAME_DT);
        let ended = tick(&mut world, &input, dt);

        for event in world.events() {
            if !matches!(event, GameEvent::ShotFired) {
                log::debug!("frame {frame}: {event:?}");
            }
        }

        if ended || world.elapsed() >= MAX_SESSION_SECS {
            break;
        }
        frame += 1;
    }

    let snapshot = world.snapshot();
    println!(
        "survived {:.1}s across {} frames ({} entities on the final frame)",
        snapshot.elapsed,
        frame + 1,
        snapshot.entities.len()
    );

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(err) => log::warn!("snapshot serialization failed: {err}"),
    }

    // The leaderboard lives with the host; the core only hands over the
    // final elapsed time
    let mut scores = HighScores::new();
    if let Some(rank) = scores.add_score("demo", snapshot.elapsed) {
        println!("run placed at rank {rank}:");
        print!("{scores}");
    }
}

/// Deterministic input script: thrust in bursts, sweep the heading, and
/// hold fire. Enough to exercise spawning, splitting and wrap-around.
fn scripted_input(frame: u64) -> TickInput {
    let phase = frame % 240;
    TickInput {
        rotate: match phase {
            0..=59 => 1,
            120..=179 => -1,
            _ => 0,
        },
        thrust: (60..=119).contains(&phase),
        fire: true,
    }
}
