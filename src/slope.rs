//! Slope classification.
//!
//! Compares the sampled ground angle against the configured slope limit to
//! decide whether the surface can be walked on, forces a slide, or counts as
//! a wall. Sliding additionally requires two independent surface samples to
//! agree, so a single noisy cast can never trigger it.

use bevy::prelude::*;

/// Surfaces steeper than this are treated as vertical walls: the character
/// neither walks nor slides on them.
pub const MAX_SLIDE_ANGLE: f32 = 85.0 * core::f32::consts::PI / 180.0;

/// How a surface angle relates to the character's slope limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum SlopeClass {
    /// Shallow enough to walk on.
    Walkable,
    /// Too steep to walk, shallow enough to slide down.
    Sliding,
    /// Effectively vertical; no slide is applied.
    Wall,
}

/// Classify a surface angle (radians) against a slope limit (radians).
pub fn classify(angle: f32, slope_limit: f32) -> SlopeClass {
    if angle <= slope_limit {
        SlopeClass::Walkable
    } else if angle <= MAX_SLIDE_ANGLE {
        SlopeClass::Sliding
    } else {
        SlopeClass::Wall
    }
}

/// Whether two independently sampled surface angles agree on a slide.
///
/// Both the probe-normal angle and the cross-check ray angle must classify
/// as [`SlopeClass::Sliding`].
pub fn should_slide(primary_angle: f32, cross_check_angle: f32, slope_limit: f32) -> bool {
    classify(primary_angle, slope_limit) == SlopeClass::Sliding
        && classify(cross_check_angle, slope_limit) == SlopeClass::Sliding
}

/// Downward slide speed for a sliding surface.
///
/// Scales with how far the surface angle exceeds the limit, two units per
/// degree of excess, capped at 10.
pub fn slide_speed(angle: f32, slope_limit: f32) -> f32 {
    ((angle - slope_limit).to_degrees() * 2.0).clamp(0.0, 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deg(v: f32) -> f32 {
        v.to_radians()
    }

    #[test]
    fn shallow_slope_is_walkable() {
        assert_eq!(classify(deg(30.0), deg(45.0)), SlopeClass::Walkable);
    }

    #[test]
    fn slope_limit_itself_is_walkable() {
        assert_eq!(classify(deg(45.0), deg(45.0)), SlopeClass::Walkable);
    }

    #[test]
    fn steep_slope_slides() {
        assert_eq!(classify(deg(60.0), deg(45.0)), SlopeClass::Sliding);
    }

    #[test]
    fn vertical_surface_is_a_wall() {
        // Near-vertical surfaces produce neither the walk nor the slide
        // behavior.
        assert_eq!(classify(deg(90.0), deg(45.0)), SlopeClass::Wall);
        assert_eq!(classify(deg(86.0), deg(45.0)), SlopeClass::Wall);
    }

    #[test]
    fn slide_requires_both_samples_to_agree() {
        let limit = deg(45.0);
        assert!(should_slide(deg(60.0), deg(58.0), limit));
        // One noisy sample is not enough.
        assert!(!should_slide(deg(60.0), deg(30.0), limit));
        assert!(!should_slide(deg(30.0), deg(60.0), limit));
        // A wall reading on either sample also rejects the slide.
        assert!(!should_slide(deg(60.0), deg(89.0), limit));
    }

    #[test]
    fn slide_speed_scales_and_clamps() {
        let limit = deg(45.0);
        assert_eq!(slide_speed(deg(45.0), limit), 0.0);
        assert!((slide_speed(deg(48.0), limit) - 6.0).abs() < 1e-3);
        // 60 - 45 = 15 degrees of excess would be 30; capped at 10.
        assert_eq!(slide_speed(deg(60.0), limit), 10.0);
    }
}
