//! Configuration for locomotion mode and body rotation.

use bevy::prelude::*;

/// How the character's body orients itself while moving.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocomotionMode {
    /// The body faces the direction of travel.
    #[default]
    Free,
    /// The body faces the camera and strafes laterally.
    Strafe,
}

/// Configuration for locomotion mode and body rotation.
#[derive(Reflect, Debug, Clone, Copy)]
pub struct LocomotionConfig {
    /// Locomotion mode the character starts in.
    pub mode: LocomotionMode,

    /// Yaw rotation rate toward the travel direction in free mode (per
    /// second, scaled by delta time).
    pub free_rotation_speed: f32,

    /// Yaw rotation rate toward the reference yaw in strafe mode.
    pub strafe_rotation_speed: f32,

    /// Keep the last travel direction when input stops instead of
    /// recomputing it from the reference frame.
    pub keep_direction: bool,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            mode: LocomotionMode::Free,
            free_rotation_speed: 10.0,
            strafe_rotation_speed: 10.0,
            keep_direction: false,
        }
    }
}
