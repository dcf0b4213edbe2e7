//! Velocity resolution.
//!
//! Maps the shaped input channels through the speed table to a target
//! planar velocity and queues the blend command for the backend. Resolution
//! is a pure function of its inputs: calling it twice with identical state
//! yields the identical target vector.

use bevy::prelude::*;

use crate::config::{LocomotionMode, MotorConfig, SpeedTier};
use crate::intent::MovementIntent;
use crate::motor::{CharacterMotor, VelocityCommand};
use crate::state::MotionState;

/// Fixed interpolation rate for the velocity blend, in units of `1/dt`.
///
/// A design constant balancing responsiveness against jitter; it is not
/// derived from the physics step.
pub const VELOCITY_BLEND_RATE: f32 = 20.0;

/// Sprint multiplier applied to the strafe move amount.
const STRAFE_SPRINT_BOOST: f32 = 1.5;

/// Target planar velocity for the current basis and channels.
///
/// In strafe mode the raw input axes are projected on the body basis and
/// scaled by the selected speed; in free mode the body forward carries the
/// clamped speed channel. The vertical component is resolved later, at
/// application time.
pub fn resolve_target_velocity(
    strafing: bool,
    forward: Vec3,
    right: Vec3,
    speed_scale: f32,
    axes: Vec2,
    speed_channel: f32,
) -> Vec3 {
    if strafing {
        let scale = if speed_scale > 0.0 { speed_scale } else { 1.0 };
        (right * axes.x + forward * axes.y) * scale
    } else {
        forward * speed_scale * speed_channel.clamp(-1.0, 1.0)
    }
}

/// Tier for the current tick.
///
/// Strafe mode tiers on the sprint-boosted move amount; free mode tiers on
/// the signed speed channel, so backwards movement always selects the walk
/// tier.
pub fn select_tier(state: &MotionState, move_amount: f32, speed_channel: f32) -> SpeedTier {
    if state.strafing {
        let boost = if state.sprinting {
            STRAFE_SPRINT_BOOST
        } else {
            1.0
        };
        SpeedTier::from_amount(boost * move_amount.clamp(0.0, 1.0))
    } else {
        SpeedTier::from_amount(speed_channel)
    }
}

/// Pick the tier speed and queue the planar blend while grounded.
pub fn speed_observer(
    mut q_motors: Query<(
        &mut CharacterMotor,
        &MotionState,
        &MovementIntent,
        &MotorConfig,
        &Transform,
    )>,
) {
    for (mut motor, state, intent, config, transform) in &mut q_motors {
        if motor.lock_movement || !state.grounded {
            continue;
        }

        let tier = select_tier(state, motor.move_amount, motor.speed);
        let mode = if state.strafing {
            LocomotionMode::Strafe
        } else {
            LocomotionMode::Free
        };
        let speed_scale = config.speeds.speed(mode, state.crouching, tier);
        motor.speed_scale = speed_scale;

        let forward = transform.rotation * Vec3::NEG_Z;
        let right = transform.rotation * Vec3::X;
        let target = resolve_target_velocity(
            state.strafing,
            forward,
            right,
            speed_scale,
            intent.axes,
            motor.speed,
        );
        motor.push_command(VelocityCommand::BlendPlanar {
            target,
            rate: VELOCITY_BLEND_RATE,
        });
    }
}

/// Steer the planar velocity while airborne.
///
/// Only acts when the space ahead of the capsule is clear; with air control
/// disabled the forward push is applied regardless of input.
pub fn air_control(
    mut q_motors: Query<(&mut CharacterMotor, &MotionState, &MotorConfig, &Transform)>,
) {
    for (mut motor, state, config, transform) in &mut q_motors {
        if motor.lock_movement || state.grounded {
            continue;
        }
        if !motor.forward_clear {
            continue;
        }

        let forward = transform.rotation * Vec3::NEG_Z;
        let right = transform.rotation * Vec3::X;
        let push = config.jumping.forward;

        let target = if config.jumping.air_control {
            if state.strafing {
                forward * (push * motor.speed.clamp(-1.0, 1.0))
                    + right * (push * motor.direction.clamp(-1.0, 1.0))
            } else {
                forward * (push * motor.speed.clamp(-1.0, 1.0))
            }
        } else {
            forward * push
        };

        motor.push_command(VelocityCommand::SetPlanar { target });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_is_idempotent() {
        let forward = Vec3::NEG_Z;
        let right = Vec3::X;
        let axes = Vec2::new(0.3, 0.8);

        let a = resolve_target_velocity(true, forward, right, 3.0, axes, 0.8);
        let b = resolve_target_velocity(true, forward, right, 3.0, axes, 0.8);
        assert_eq!(a, b);

        let a = resolve_target_velocity(false, forward, right, 2.5, axes, 1.0);
        let b = resolve_target_velocity(false, forward, right, 2.5, axes, 1.0);
        assert_eq!(a, b);
    }

    #[test]
    fn free_mode_projects_on_forward() {
        let target =
            resolve_target_velocity(false, Vec3::NEG_Z, Vec3::X, 3.0, Vec2::new(1.0, 1.0), 1.0);
        assert!((target - Vec3::new(0.0, 0.0, -3.0)).length() < 1e-5);
    }

    #[test]
    fn free_mode_clamps_boosted_channel() {
        // The sprint boost pushes the channel to 2; the projection clamps it
        // back to 1, so sprinting changes the tier, not the projection.
        let boosted =
            resolve_target_velocity(false, Vec3::NEG_Z, Vec3::X, 4.0, Vec2::new(0.0, 1.0), 2.0);
        let plain =
            resolve_target_velocity(false, Vec3::NEG_Z, Vec3::X, 4.0, Vec2::new(0.0, 1.0), 1.0);
        assert_eq!(boosted, plain);
    }

    #[test]
    fn strafe_mode_projects_both_axes() {
        let target =
            resolve_target_velocity(true, Vec3::NEG_Z, Vec3::X, 2.0, Vec2::new(1.0, 0.0), 0.0);
        assert!((target - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn strafe_mode_guards_zero_speed() {
        // A zero or negative table entry falls back to the unit scale
        // instead of zeroing the projection.
        let target =
            resolve_target_velocity(true, Vec3::NEG_Z, Vec3::X, 0.0, Vec2::new(1.0, 0.0), 0.0);
        assert!((target - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn tier_selection_boundaries() {
        let free = MotionState::default();
        assert_eq!(select_tier(&free, 0.5, 0.5), SpeedTier::Walk);
        assert_eq!(select_tier(&free, 0.51, 0.51), SpeedTier::Run);
        assert_eq!(select_tier(&free, 1.0, 1.0), SpeedTier::Run);
        assert_eq!(select_tier(&free, 1.0, 2.0), SpeedTier::Sprint);
    }

    #[test]
    fn strafe_tier_uses_sprint_boost() {
        let state = MotionState {
            strafing: true,
            sprinting: true,
            ..Default::default()
        };
        // 1.5 × 1.0 = 1.5 → sprint tier.
        assert_eq!(select_tier(&state, 1.0, 0.0), SpeedTier::Sprint);
        // 1.5 × 0.6 = 0.9 → run tier.
        assert_eq!(select_tier(&state, 0.6, 0.0), SpeedTier::Run);

        let relaxed = MotionState {
            strafing: true,
            sprinting: false,
            ..Default::default()
        };
        assert_eq!(select_tier(&relaxed, 1.0, 0.0), SpeedTier::Run);
    }

    #[test]
    fn free_tier_walks_backwards() {
        let free = MotionState::default();
        // Signed channel: moving backwards always selects the walk tier.
        assert_eq!(select_tier(&free, 1.0, -1.0), SpeedTier::Walk);
        assert_eq!(select_tier(&free, 1.0, -2.0), SpeedTier::Walk);
    }
}
