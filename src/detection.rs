//! Detection result structures.
//!
//! These structures hold the results of the physics queries (raycasts and
//! shapecasts) used for ground probing and step detection. They are produced
//! by the backend's sensor systems every physics tick and are read-only to
//! every later stage of the motor.

use bevy::prelude::*;

/// Ground distance at or below which the character counts as touching the
/// ground.
pub const GROUND_CONTACT_DISTANCE: f32 = 0.05;

/// Sentinel distance reported when no ground was found below the character.
pub const GROUND_MISS_DISTANCE: f32 = 10.0;

/// Round a probe distance to two decimals.
///
/// Probe distances are quantized so that jitter in the last bits of a cast
/// never flips a threshold comparison back and forth between ticks.
pub fn round_distance(distance: f32) -> f32 {
    (distance * 100.0).round() / 100.0
}

/// Information about a raycast/shapecast result.
#[derive(Debug, Clone, Copy, Reflect)]
pub struct SensorCast {
    /// Whether the cast hit something.
    pub hit: bool,
    /// Distance to the hit point (if hit).
    pub distance: f32,
    /// Normal of the surface at the hit point.
    pub normal: Vec3,
    /// World position of the hit point.
    pub point: Vec3,
    /// Entity that was hit (if any).
    pub entity: Option<Entity>,
}

impl Default for SensorCast {
    fn default() -> Self {
        Self {
            hit: false,
            distance: 0.0,
            normal: Vec3::Y,
            point: Vec3::ZERO,
            entity: None,
        }
    }
}

impl SensorCast {
    /// Create an empty (no hit) result.
    pub fn miss() -> Self {
        Self::default()
    }

    /// Create a hit result.
    pub fn hit(distance: f32, normal: Vec3, point: Vec3, entity: Option<Entity>) -> Self {
        Self {
            hit: true,
            distance,
            normal,
            point,
            entity,
        }
    }
}

/// The ground sample taken once per physics tick.
///
/// Owned by the sensor stage; consumers only read it. A missed probe reports
/// [`GROUND_MISS_DISTANCE`] with an upright normal, which downstream logic
/// interprets as airborne rather than as an error.
#[derive(Debug, Clone, Copy, Reflect)]
pub struct GroundSample {
    /// Distance from the feet plane to the ground, rounded to two decimals.
    pub distance: f32,
    /// Surface normal at the hit point.
    pub normal: Vec3,
    /// World position of the hit point.
    pub point: Vec3,
    /// Ground entity that was hit, if any.
    pub entity: Option<Entity>,
}

impl Default for GroundSample {
    fn default() -> Self {
        Self::miss()
    }
}

impl GroundSample {
    /// Sample reported when no ground was found.
    pub fn miss() -> Self {
        Self {
            distance: GROUND_MISS_DISTANCE,
            normal: Vec3::Y,
            point: Vec3::ZERO,
            entity: None,
        }
    }

    /// Sample for a successful probe.
    pub fn hit(distance: f32, normal: Vec3, point: Vec3, entity: Option<Entity>) -> Self {
        Self {
            distance: round_distance(distance),
            normal,
            point,
            entity,
        }
    }

    /// Whether the probe found any ground at all.
    pub fn detected(&self) -> bool {
        self.distance < GROUND_MISS_DISTANCE
    }

    /// Whether the feet are in contact with the ground.
    pub fn in_contact(&self) -> bool {
        self.distance <= GROUND_CONTACT_DISTANCE
    }

    /// Angle between the surface normal and world up, in radians.
    pub fn angle(&self) -> f32 {
        angle_from_up(self.normal)
    }
}

/// A steppable ledge found ahead of the movement direction.
#[derive(Debug, Clone, Copy, Reflect)]
pub struct StepSample {
    /// World position of the step surface hit.
    pub point: Vec3,
    /// Vector from the feet position to the step surface hit.
    pub offset: Vec3,
    /// Height of the step surface above the feet plane.
    pub height: f32,
}

/// Angle between a surface normal and world up, in radians.
pub fn angle_from_up(normal: Vec3) -> f32 {
    let dot = normal.normalize_or_zero().dot(Vec3::Y).clamp(-1.0, 1.0);
    dot.acos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn sensor_cast_miss() {
        let cast = SensorCast::miss();
        assert!(!cast.hit);
        assert_eq!(cast.distance, 0.0);
        assert!(cast.entity.is_none());
    }

    #[test]
    fn sensor_cast_hit() {
        let cast = SensorCast::hit(5.0, Vec3::Y, Vec3::new(10.0, 0.0, 0.0), None);
        assert!(cast.hit);
        assert_eq!(cast.distance, 5.0);
        assert_eq!(cast.normal, Vec3::Y);
        assert_eq!(cast.point, Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn ground_sample_miss_is_airborne_sentinel() {
        let sample = GroundSample::miss();
        assert_eq!(sample.distance, GROUND_MISS_DISTANCE);
        assert!(!sample.detected());
        assert!(!sample.in_contact());
    }

    #[test]
    fn ground_sample_rounds_to_two_decimals() {
        let sample = GroundSample::hit(0.123_456, Vec3::Y, Vec3::ZERO, None);
        assert_eq!(sample.distance, 0.12);

        let sample = GroundSample::hit(0.126, Vec3::Y, Vec3::ZERO, None);
        assert_eq!(sample.distance, 0.13);
    }

    #[test]
    fn ground_sample_contact_boundary() {
        assert!(GroundSample::hit(0.05, Vec3::Y, Vec3::ZERO, None).in_contact());
        assert!(!GroundSample::hit(0.06, Vec3::Y, Vec3::ZERO, None).in_contact());
    }

    #[test]
    fn angle_from_flat_normal_is_zero() {
        assert!(angle_from_up(Vec3::Y).abs() < 1e-6);
    }

    #[test]
    fn angle_from_tilted_normal() {
        let normal = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((angle_from_up(normal) - FRAC_PI_4).abs() < 1e-5);
    }

    #[test]
    fn angle_from_degenerate_normal_is_safe() {
        // Zero-length normals come from malformed geometry; they must not
        // produce NaN.
        let angle = angle_from_up(Vec3::ZERO);
        assert!(angle.is_finite());
    }
}
