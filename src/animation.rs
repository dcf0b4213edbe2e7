//! Animator parameter export.
//!
//! The motor does not drive an animation graph itself. Instead it mirrors
//! the values an animation layer needs into [`AnimatorParams`] once per
//! render frame, after the fixed-tick motor systems have run. Hosts map
//! these onto their animation graph parameters.

use bevy::prelude::*;

use crate::motor::CharacterMotor;
use crate::state::MotionState;

/// Smoothing window (seconds) for the speed and direction parameters.
const PARAM_DAMP_TIME: f32 = 0.1;

/// Animation-facing view of the motor state.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct AnimatorParams {
    /// Feet are supported by walkable ground.
    pub is_grounded: bool,
    /// Distance to the ground as sampled by the probe.
    pub ground_distance: f32,
    /// The character is crouched.
    pub is_crouching: bool,
    /// The character is sliding down a steep surface.
    pub is_sliding: bool,
    /// Normalized move amount.
    pub move_amount: f32,
    /// Damped forward channel.
    pub speed: f32,
    /// Damped lateral channel (only updated while strafing).
    pub direction: f32,
    /// Vertical velocity, only updated while airborne.
    pub vertical_velocity: f32,
    /// Smoothed crouch amount in `[0, 1]`.
    pub crouch_fraction: f32,
}

/// Move a parameter toward a target over a smoothing window.
fn damp(current: f32, target: f32, smooth_time: f32, dt: f32) -> f32 {
    if smooth_time <= 0.0 {
        return target;
    }
    current + (target - current) * (dt / smooth_time).clamp(0.0, 1.0)
}

/// Mirror the motor state into the animator parameters.
pub fn sync_animator_params(
    time: Res<Time>,
    mut q_motors: Query<(&CharacterMotor, &MotionState, &mut AnimatorParams)>,
) {
    let dt = time.delta_secs();
    for (motor, state, mut params) in &mut q_motors {
        params.is_grounded = state.grounded;
        params.ground_distance = motor.ground.distance;
        params.is_crouching = state.crouching;
        params.is_sliding = state.sliding;
        params.move_amount = motor.move_amount;
        params.crouch_fraction = motor.crouch_fraction;

        if !state.grounded {
            params.vertical_velocity = motor.vertical_velocity;
        }
        if state.strafing {
            params.direction = damp(params.direction, motor.direction, PARAM_DAMP_TIME, dt);
        }
        params.speed = damp(params.speed, motor.speed, PARAM_DAMP_TIME, dt);
    }
}
