//! Shared kinematics for every entity
//!
//! A `Body` is position, velocity, heading and a collision radius. The
//! field has toroidal topology: integration wraps each axis independently
//! into [0, extent).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{forward_vector, normalize_angle};

/// Kinematic state shared by the player, shots and asteroids
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in radians, normalized to [0, 2π). 0 points +Y.
    pub rotation: f32,
    /// Collision radius (circular collision and rendering scale)
    pub radius: f32,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, rotation: f32, radius: f32) -> Self {
        Self {
            pos,
            vel,
            rotation: normalize_angle(rotation),
            radius,
        }
    }

    /// Move by velocity without wrapping (shot despawn policy needs the
    /// raw position to detect field exit)
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Wrap each axis into [0, extent). `rem_euclid` keeps the invariant
    /// for arbitrarily large displacements, not just single-edge crossings.
    #[inline]
    pub fn wrap(&mut self, bounds: Vec2) {
        self.pos.x = wrap_axis(self.pos.x, bounds.x);
        self.pos.y = wrap_axis(self.pos.y, bounds.y);
    }

    /// One integration step with toroidal wrap
    #[inline]
    pub fn advance(&mut self, dt: f32, bounds: Vec2) {
        self.integrate(dt);
        self.wrap(bounds);
    }

    /// Circle-circle overlap test. Pure and symmetric.
    #[inline]
    pub fn overlaps(&self, other: &Body) -> bool {
        self.pos.distance(other.pos) < self.radius + other.radius
    }

    /// Point at the tip of the heading (shot spawn position)
    #[inline]
    pub fn nose(&self) -> Vec2 {
        self.pos + forward_vector(self.rotation) * self.radius
    }

    /// Whether the circle still intersects the field rectangle (only
    /// meaningful for unwrapped positions, i.e. the shot despawn policy)
    pub fn intersects_field(&self, bounds: Vec2) -> bool {
        self.pos.x > -self.radius
            && self.pos.x < bounds.x + self.radius
            && self.pos.y > -self.radius
            && self.pos.y < bounds.y + self.radius
    }
}

/// `f32::rem_euclid` can round up to exactly `extent` for tiny negative
/// inputs; fold that case back to 0 so the wrap invariant holds.
#[inline]
fn wrap_axis(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    if wrapped >= extent { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_advance_moves_by_velocity() {
        let bounds = Vec2::new(1280.0, 720.0);
        let mut body = Body::new(Vec2::new(100.0, 100.0), Vec2::new(10.0, -20.0), 0.0, 5.0);
        body.advance(0.5, bounds);
        assert!((body.pos.x - 105.0).abs() < 1e-4);
        assert!((body.pos.y - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_is_toroidal() {
        let bounds = Vec2::new(100.0, 100.0);
        let mut body = Body::new(Vec2::new(95.0, 5.0), Vec2::new(100.0, -100.0), 0.0, 5.0);
        body.advance(0.1, bounds);
        // Exits right edge, re-enters from the left; exits top via bottom
        assert!((body.pos.x - 5.0).abs() < 1e-4);
        assert!((body.pos.y - 95.0).abs() < 1e-4);
    }

    #[test]
    fn test_overlap_at_same_center() {
        // Distance 0 < 15 + 20
        let a = Body::new(Vec2::new(400.0, 300.0), Vec2::ZERO, 0.0, 15.0);
        let b = Body::new(Vec2::new(400.0, 300.0), Vec2::ZERO, 0.0, 20.0);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_no_overlap_at_exact_radius_sum() {
        let a = Body::new(Vec2::new(0.0, 0.0), Vec2::ZERO, 0.0, 10.0);
        let b = Body::new(Vec2::new(25.0, 0.0), Vec2::ZERO, 0.0, 15.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_nose_points_along_heading() {
        let body = Body::new(Vec2::new(50.0, 50.0), Vec2::ZERO, 0.0, 20.0);
        let nose = body.nose();
        assert!((nose.x - 50.0).abs() < 1e-4);
        assert!((nose.y - 70.0).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_wrap_invariant(
            x in -5000.0f32..5000.0,
            y in -5000.0f32..5000.0,
            vx in -2000.0f32..2000.0,
            vy in -2000.0f32..2000.0,
            dt in 0.0f32..10.0,
        ) {
            let bounds = Vec2::new(1280.0, 720.0);
            let mut body = Body::new(Vec2::new(x, y), Vec2::new(vx, vy), 0.0, 5.0);
            body.advance(dt, bounds);
            prop_assert!(body.pos.x >= 0.0 && body.pos.x < bounds.x);
            prop_assert!(body.pos.y >= 0.0 && body.pos.y < bounds.y);
        }

        #[test]
        fn prop_collision_symmetry(
            ax in 0.0f32..1280.0, ay in 0.0f32..720.0,
            bx in 0.0f32..1280.0, by in 0.0f32..720.0,
            ar in 1.0f32..80.0, br in 1.0f32..80.0,
        ) {
            let a = Body::new(Vec2::new(ax, ay), Vec2::ZERO, 0.0, ar);
            let b = Body::new(Vec2::new(bx, by), Vec2::ZERO, 0.0, br);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }
    }
}
