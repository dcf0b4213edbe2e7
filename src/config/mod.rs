//! Motor configuration.
//!
//! One component, [`MotorConfig`], aggregates a set of per-concern config
//! structs. Everything is plain data with sensible defaults; `with_*`
//! builders cover the common overrides.

mod crouching;
mod grounding;
mod jumping;
mod locomotion;
mod speeds;
mod stepping;

pub use crouching::CrouchConfig;
pub use grounding::GroundingConfig;
pub use jumping::JumpConfig;
pub use locomotion::{LocomotionConfig, LocomotionMode};
pub use speeds::{SpeedTable, SpeedTier, SpeedTiers};
pub use stepping::StepConfig;

use bevy::prelude::*;

/// Full configuration for one character motor.
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct MotorConfig {
    /// Locomotion mode and rotation rates.
    pub locomotion: LocomotionConfig,
    /// The (mode × crouch × tier) speed table.
    pub speeds: SpeedTable,
    /// Jump timing and air control.
    pub jumping: JumpConfig,
    /// Crouch capsule parameters.
    pub crouching: CrouchConfig,
    /// Step detection window and assist strength.
    pub stepping: StepConfig,
    /// Ground thresholds, slope limit and extra gravity.
    pub grounding: GroundingConfig,
}

impl MotorConfig {
    /// Configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the locomotion mode.
    pub fn with_mode(mut self, mode: LocomotionMode) -> Self {
        self.locomotion.mode = mode;
        self
    }

    /// Replace the speed table.
    pub fn with_speeds(mut self, speeds: SpeedTable) -> Self {
        self.speeds = speeds;
        self
    }

    /// Set the slope limit (radians).
    pub fn with_slope_limit(mut self, slope_limit: f32) -> Self {
        self.grounding.slope_limit = slope_limit;
        self
    }

    /// Set the ground layer mask.
    pub fn with_ground_layers(mut self, layers: u32) -> Self {
        self.grounding.layers = layers;
        self
    }

    /// Set jump duration and held upward velocity.
    pub fn with_jump(mut self, timer: f32, height: f32) -> Self {
        self.jumping.timer = timer;
        self.jumping.height = height;
        self
    }

    /// Set the steppable height window.
    pub fn with_step_window(mut self, offset_start: f32, offset_end: f32) -> Self {
        self.stepping.offset_start = offset_start;
        self.stepping.offset_end = offset_end;
        self
    }
}
