//! Game balance configuration
//!
//! Every tunable constant of the simulation lives here so hosts can
//! reconfigure a session without touching sim code. A session refuses to
//! start on an invalid configuration; [`Config::validate`] is the gate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What happens to a shot that leaves the field.
///
/// The field is toroidal for every other entity; for shots either policy
/// is defensible, so it is a config choice. Default is `Despawn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ShotPolicy {
    /// Shots wrap around the field like everything else
    Wrap,
    /// Shots are removed once fully outside the field
    #[default]
    Despawn,
}

/// Optional difficulty ramp for the asteroid field.
///
/// After each spawn the interval is multiplied by `factor` and floored at
/// `min_interval`. Absent by default (constant spawn rate).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRamp {
    /// Multiplier applied to the spawn interval after each spawn, in (0, 1]
    pub factor: f32,
    /// Lower bound the interval never shrinks below (seconds)
    pub min_interval: f32,
}

/// All tunable constants for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // === Field ===
    /// Play area width (pixels)
    pub field_width: f32,
    /// Play area height (pixels)
    pub field_height: f32,

    // === Asteroid field spawner ===
    /// Seconds between edge spawns
    pub spawn_interval: f32,
    /// Speed range for freshly spawned asteroids (min, max), pixels/sec
    pub spawn_speed_range: (f32, f32),
    /// Half-angle of the inward velocity cone at spawn (radians)
    pub spawn_cone: f32,
    /// Optional spawn-rate ramp
    pub spawn_ramp: Option<SpawnRamp>,

    // === Player ===
    /// Turn rate (radians/sec)
    pub rotation_speed: f32,
    /// Thrust acceleration (pixels/sec²)
    pub acceleration: f32,
    /// Linear drag factor per second (0 = none)
    pub drag: f32,
    /// Ship collision radius
    pub player_radius: f32,

    // === Shots ===
    /// Muzzle speed added along the ship's heading (pixels/sec)
    pub shot_speed: f32,
    /// Shot collision radius
    pub shot_radius: f32,
    /// Seconds between shots
    pub shoot_cooldown: f32,
    /// Off-field behavior for shots
    pub shot_policy: ShotPolicy,

    // === Asteroids ===
    /// Split perturbation angle range (min, max), radians
    pub split_angle_range: (f32, f32),
    /// Child speed multiplier on split (children outrun the parent)
    pub split_speed_multiplier: f32,
    /// Tier radii; must strictly decrease
    pub large_radius: f32,
    pub medium_radius: f32,
    pub small_radius: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_width: 1280.0,
            field_height: 720.0,

            spawn_interval: 0.8,
            spawn_speed_range: (40.0, 100.0),
            spawn_cone: 30f32.to_radians(),
            spawn_ramp: None,

            rotation_speed: 300f32.to_radians(),
            acceleration: 200.0,
            drag: 0.0,
            player_radius: 20.0,

            shot_speed: 500.0,
            shot_radius: 5.0,
            shoot_cooldown: 0.3,
            shot_policy: ShotPolicy::Despawn,

            split_angle_range: (20f32.to_radians(), 50f32.to_radians()),
            split_speed_multiplier: 1.2,
            large_radius: 60.0,
            medium_radius: 40.0,
            small_radius: 20.0,
        }
    }
}

impl Config {
    /// Field extents as a vector
    #[inline]
    pub fn bounds(&self) -> glam::Vec2 {
        glam::Vec2::new(self.field_width, self.field_height)
    }

    /// Field center (player spawn point)
    #[inline]
    pub fn center(&self) -> glam::Vec2 {
        self.bounds() * 0.5
    }

    /// Check internal consistency. Called by `World::new`; a session never
    /// starts with an invalid configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("spawn_interval", self.spawn_interval),
            ("rotation_speed", self.rotation_speed),
            ("player_radius", self.player_radius),
            ("shot_speed", self.shot_speed),
            ("shot_radius", self.shot_radius),
            ("shoot_cooldown", self.shoot_cooldown),
            ("split_speed_multiplier", self.split_speed_multiplier),
            ("large_radius", self.large_radius),
            ("medium_radius", self.medium_radius),
            ("small_radius", self.small_radius),
        ];
        for (name, value) in positives {
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::NonPositive(name));
            }
        }

        if self.acceleration < 0.0 {
            return Err(ConfigError::NonPositive("acceleration"));
        }
        if self.drag < 0.0 {
            return Err(ConfigError::NonPositive("drag"));
        }
        if self.spawn_cone < 0.0 {
            return Err(ConfigError::NonPositive("spawn_cone"));
        }

        let (speed_min, speed_max) = self.spawn_speed_range;
        if !(speed_min > 0.0) || speed_max < speed_min {
            return Err(ConfigError::InvertedRange("spawn_speed_range"));
        }

        let (angle_min, angle_max) = self.split_angle_range;
        if angle_min < 0.0 || angle_max < angle_min {
            return Err(ConfigError::InvertedRange("split_angle_range"));
        }

        // Tier radii must strictly decrease so splits shrink
        if !(self.large_radius > self.medium_radius && self.medium_radius > self.small_radius) {
            return Err(ConfigError::TierRadii);
        }

        if let Some(ramp) = self.spawn_ramp {
            if !(ramp.factor > 0.0 && ramp.factor <= 1.0) {
                return Err(ConfigError::Ramp("factor must be in (0, 1]"));
            }
            if !(ramp.min_interval > 0.0 && ramp.min_interval <= self.spawn_interval) {
                return Err(ConfigError::Ramp(
                    "min_interval must be in (0, spawn_interval]",
                ));
            }
        }

        Ok(())
    }
}

/// Rejected configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A field that must be positive (and finite) is not
    NonPositive(&'static str),
    /// A (min, max) range with max < min or a non-positive minimum
    InvertedRange(&'static str),
    /// Tier radii do not strictly decrease
    TierRadii,
    /// Spawn ramp parameters out of range
    Ramp(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive(name) => write!(f, "config field `{name}` must be positive"),
            ConfigError::InvertedRange(name) => write!(f, "config range `{name}` is invalid"),
            ConfigError::TierRadii => {
                write!(f, "asteroid tier radii must strictly decrease (large > medium > small)")
            }
            ConfigError::Ramp(reason) => write!(f, "spawn ramp: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_non_positive_cooldown() {
        let config = Config {
            shoot_cooldown: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive("shoot_cooldown"))
        );
    }

    #[test]
    fn test_rejects_non_decreasing_tier_radii() {
        let config = Config {
            medium_radius: 60.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::TierRadii));

        let config = Config {
            small_radius: 40.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::TierRadii));
    }

    #[test]
    fn test_rejects_inverted_speed_range() {
        let config = Config {
            spawn_speed_range: (100.0, 40.0),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedRange("spawn_speed_range"))
        );
    }

    #[test]
    fn test_rejects_bad_ramp() {
        let config = Config {
            spawn_ramp: Some(SpawnRamp {
                factor: 1.5,
                min_interval: 0.2,
            }),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Ramp(_))));

        let config = Config {
            spawn_ramp: Some(SpawnRamp {
                factor: 0.95,
                min_interval: 10.0, // above the base interval
            }),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Ramp(_))));
    }

    #[test]
    fn test_rejects_nan_dimension() {
        let config = Config {
            field_width: f32::NAN,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive("field_width"))
        );
    }
}
