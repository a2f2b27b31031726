//! Driftbelt - deterministic core for a toroidal-field asteroids game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, spawning, collisions, session state)
//! - `config`: Data-driven game balance with validation
//! - `highscores`: Leaderboard collaborator (delimited text format, host does I/O)
//!
//! The crate is renderer-agnostic: a host drives it by calling
//! [`sim::tick`] with elapsed time and input intents, then reads
//! [`sim::World::snapshot`] for drawing.

pub mod config;
pub mod highscores;
pub mod sim;

pub use config::{Config, ConfigError, ShotPolicy, SpawnRamp};
pub use highscores::HighScores;

use glam::Vec2;

/// Host-facing timing constants
pub mod consts {
    /// Recommended fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Recommended per-frame dt clamp; hosts should clamp stalls before
    /// calling `tick` (the core itself does not guard dt)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}

/// Normalize an angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    angle.rem_euclid(std::f32::consts::TAU)
}

/// Unit vector for a heading angle.
///
/// Rotation 0 points along +Y ("up"); positive rotation turns
/// counter-clockwise.
#[inline]
pub fn forward_vector(rotation: f32) -> Vec2 {
    Vec2::new(-rotation.sin(), rotation.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    #[test]
    fn test_normalize_angle_range() {
        assert!((normalize_angle(TAU + 0.5) - 0.5).abs() < 1e-6);
        assert!((normalize_angle(-FRAC_PI_2) - (TAU - FRAC_PI_2)).abs() < 1e-6);
        assert_eq!(normalize_angle(0.0), 0.0);
    }

    #[test]
    fn test_forward_vector_convention() {
        // Rotation 0 points up
        let up = forward_vector(0.0);
        assert!((up.x).abs() < 1e-6);
        assert!((up.y - 1.0).abs() < 1e-6);

        // Quarter turn CCW points along -X
        let left = forward_vector(FRAC_PI_2);
        assert!((left.x + 1.0).abs() < 1e-6);
        assert!((left.y).abs() < 1e-6);

        // Half turn points down
        let down = forward_vector(PI);
        assert!((down.y + 1.0).abs() < 1e-5);
    }
}
