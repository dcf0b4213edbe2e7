//! Configuration for ground probing, slopes and extra gravity.

use bevy::prelude::*;

/// Configuration for ground probing, slopes and extra gravity.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct GroundingConfig {
    /// Collision layer mask the ground probes cast against.
    pub layers: u32,

    /// Grounded/airborne threshold used while moving slowly.
    pub min_distance: f32,

    /// Grounded/airborne threshold used at speed. Ground distances between
    /// the two thresholds keep the previous grounded state.
    pub max_distance: f32,

    /// Maximum walkable surface angle (radians). Steeper surfaces slide, up
    /// to the wall cutoff.
    pub slope_limit: f32,

    /// Extra downward acceleration applied while airborne (negative,
    /// units/second²). Doubled inside the threshold band to firm up
    /// landings.
    pub extra_gravity: f32,
}

impl Default for GroundingConfig {
    fn default() -> Self {
        Self {
            layers: u32::MAX,
            min_distance: 0.2,
            max_distance: 0.5,
            slope_limit: 45.0_f32.to_radians(),
            extra_gravity: -10.0,
        }
    }
}
