//! Configuration for jumping and air control.

use bevy::prelude::*;

/// Configuration for jumping and air control.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct JumpConfig {
    /// Duration (seconds) the jump holds the character's upward velocity.
    pub timer: f32,

    /// Upward velocity held for the duration of the jump (units/second).
    pub height: f32,

    /// Planar speed applied while airborne (units/second).
    pub forward: f32,

    /// Whether input steers the planar velocity while airborne. When false,
    /// the forward push is applied unconditionally.
    pub air_control: bool,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            timer: 0.3,
            height: 4.0,
            forward: 3.0,
            air_control: true,
        }
    }
}
