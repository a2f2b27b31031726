//! Asteroid field spawner
//!
//! Time-driven: a timer accumulates dt and every full interval introduces
//! one Large asteroid at a field edge, aimed into the interior. The
//! while/subtract loop means no spawns are lost under a large dt.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use crate::config::{Config, SpawnRamp};

/// Cosmetic spin range for asteroids (radians/sec)
pub(crate) const MAX_SPIN: f32 = 0.9;

/// Spawn scheduler state, reset at session restart
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FieldSpawner {
    timer: f32,
    interval: f32,
    ramp: Option<SpawnRamp>,
}

impl FieldSpawner {
    pub fn new(config: &Config) -> Self {
        Self {
            timer: 0.0,
            interval: config.spawn_interval,
            ramp: config.spawn_ramp,
        }
    }

    pub fn reset(&mut self, config: &Config) {
        *self = Self::new(config);
    }

    /// Accumulate dt; returns how many asteroids are due this tick
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.timer += dt;
        let mut due = 0;
        while self.timer >= self.interval {
            self.timer -= self.interval;
            due += 1;
            if let Some(ramp) = self.ramp {
                self.interval = (self.interval * ramp.factor).max(ramp.min_interval);
            }
        }
        due
    }

    /// Leftover time toward the next spawn (seconds)
    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Current interval (shrinks only under a configured ramp)
    pub fn interval(&self) -> f32 {
        self.interval
    }
}

/// Place a fresh Large asteroid on a random field edge with a velocity
/// aimed into the interior: the inward edge normal rotated by a uniform
/// angle within the spawn cone, at a uniform speed from the configured
/// range. Returns the body and its cosmetic spin.
///
/// Draw order from the rng is fixed (edge, position, speed, cone angle,
/// spin) so replays stay deterministic.
pub fn spawn_edge_body(rng: &mut Pcg32, config: &Config) -> (Body, f32) {
    let bounds = config.bounds();
    let radius = config.large_radius;

    let edge = rng.random_range(0..4u8);
    let t = rng.random_range(0.0..1.0f32);
    let (pos, inward) = match edge {
        0 => (Vec2::new(0.0, t * bounds.y), Vec2::X),
        1 => (Vec2::new(bounds.x, t * bounds.y), -Vec2::X),
        2 => (Vec2::new(t * bounds.x, 0.0), Vec2::Y),
        _ => (Vec2::new(t * bounds.x, bounds.y), -Vec2::Y),
    };

    let (speed_min, speed_max) = config.spawn_speed_range;
    let speed = rng.random_range(speed_min..=speed_max);
    let cone = config.spawn_cone;
    let angle = if cone > 0.0 {
        rng.random_range(-cone..=cone)
    } else {
        0.0
    };
    let vel = Vec2::from_angle(angle).rotate(inward) * speed;

    let spin = rng.random_range(-MAX_SPIN..=MAX_SPIN);

    let mut body = Body::new(pos, vel, 0.0, radius);
    // x = width / y = height is the same toroidal point as 0
    body.wrap(bounds);
    (body, spin)
}
