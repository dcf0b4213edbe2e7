//! Configuration for crouching.

use bevy::prelude::*;

/// Configuration for crouching.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct CrouchConfig {
    /// Crouched capsule height as a fraction of the standing height
    /// (`0 < ratio <= 1`).
    pub height_ratio: f32,

    /// Rate of the capsule height transition (per second, scaled by delta
    /// time).
    pub smooth: f32,
}

impl Default for CrouchConfig {
    fn default() -> Self {
        Self {
            height_ratio: 0.6,
            smooth: 6.0,
        }
    }
}
