//! Locomotion control systems.
//!
//! These systems combine the sensor samples into the grounded / airborne /
//! sliding / jumping state machine and shape the input channels that the
//! velocity resolver consumes. They run in a fixed chain inside
//! [`CharacterMotorSet::Locomotion`](crate::CharacterMotorSet): target
//! direction, ground check, jump, locomotion channels, sprint, crouch.

use bevy::prelude::*;

use crate::config::{LocomotionMode, MotorConfig};
use crate::detection::round_distance;
use crate::intent::MovementIntent;
use crate::motor::{CharacterMotor, VelocityCommand};
use crate::slope::{should_slide, slide_speed};
use crate::state::MotionState;

/// Reference frame (usually the camera) whose yaw defines the input
/// projection basis and, in strafe mode, the body yaw target.
#[derive(Component, Reflect, Debug, Clone, Copy)]
pub struct MotionReference(pub Entity);

/// Planar speed above which the larger grounded/airborne threshold is used.
const FAST_THRESHOLD_SPEED: f32 = 0.25;

/// Yaw (radians) that makes `-Z` face the given planar direction.
pub(crate) fn yaw_toward(direction: Vec3) -> f32 {
    (-direction.x).atan2(-direction.z)
}

/// Update each motor's move amount and world-space travel direction.
///
/// With a [`MotionReference`] the input axes are projected onto the
/// reference's flattened forward/right basis; without one they map to world
/// axes directly. `keep_direction` freezes the last direction while no
/// reference is attached.
pub fn update_target_direction(
    mut q_motors: Query<(
        &mut CharacterMotor,
        &MovementIntent,
        &MotorConfig,
        Option<&MotionReference>,
    )>,
    q_frames: Query<&GlobalTransform>,
) {
    for (mut motor, intent, config, reference) in &mut q_motors {
        motor.move_amount = intent.move_amount();

        let frame = reference.and_then(|r| q_frames.get(r.0).ok());
        if let Some(frame) = frame {
            let (_, rotation, _) = frame.to_scale_rotation_translation();
            let mut forward = rotation * Vec3::NEG_Z;
            forward.y = 0.0;
            let right = rotation * Vec3::X;
            motor.target_direction = right * intent.axes.x + forward * intent.axes.y;
        } else if !config.locomotion.keep_direction {
            motor.target_direction = Vec3::new(intent.axes.x, 0.0, -intent.axes.y);
        }
    }
}

/// The ground/airborne/sliding state machine.
///
/// Runs before every other control system, whether or not movement is
/// locked: a locked character still falls, lands and slides.
pub fn check_ground(
    time: Res<Time>,
    mut q_motors: Query<(
        &mut CharacterMotor,
        &mut MotionState,
        &MotorConfig,
        &Transform,
    )>,
) {
    let dt = time.delta_secs();
    for (mut motor, mut state, config, transform) in &mut q_motors {
        let up = transform.rotation * Vec3::Y;

        // The airborne threshold widens with planar speed so that running
        // over small dips does not drop the grounded flag.
        let planar = round_distance(motor.planar_speed()).clamp(0.0, 1.0);
        let threshold = if planar > FAST_THRESHOLD_SPEED {
            config.grounding.max_distance
        } else {
            config.grounding.min_distance
        };

        let stepping = motor.is_stepping();
        if let Some(step) = motor.step {
            step_assist(&mut motor, &state, config, step.offset);
        }

        if motor.ground.in_contact() {
            state.grounded = true;

            let primary = motor.ground.angle();
            // A missing cross-check sample reads as flat ground: one sample
            // alone never triggers a slide.
            let cross = motor.slope_cross_angle.unwrap_or(0.0);
            // `!jumping` keeps the jumping/sliding flags mutually exclusive.
            if should_slide(primary, cross, config.grounding.slope_limit)
                && !stepping
                && !state.jumping
            {
                state.sliding = true;
                state.grounded = false;
                let down_speed = slide_speed(primary, config.grounding.slope_limit);
                motor.push_command(VelocityCommand::SetVertical { speed: -down_speed });
            } else {
                state.sliding = false;
                state.grounded = true;
            }
        } else if motor.ground.distance >= threshold {
            state.grounded = false;
            motor.vertical_velocity = motor.velocity.y;
            if !stepping && !state.jumping {
                let delta = up * (config.grounding.extra_gravity * dt);
                motor.push_command(VelocityCommand::Impulse { delta });
            }
        } else if !stepping && !state.jumping {
            // Inside the threshold band the grounded flag keeps its previous
            // value; doubled extra gravity firms up the landing.
            let delta = up * (config.grounding.extra_gravity * 2.0 * dt);
            motor.push_command(VelocityCommand::Impulse { delta });
        }
    }
}

/// Velocity nudge that carries the character onto a detected step.
fn step_assist(
    motor: &mut CharacterMotor,
    state: &MotionState,
    config: &MotorConfig,
    offset: Vec3,
) {
    let (direction, factor) = if state.strafing {
        (offset, motor.move_amount.clamp(0.0, 1.0))
    } else {
        (offset.normalize_or_zero(), motor.speed.clamp(-1.0, 1.0))
    };
    let scale = if motor.speed_scale > 1.0 {
        motor.speed_scale
    } else {
        1.0
    };
    motor.push_command(VelocityCommand::Set {
        target: direction * config.stepping.smooth * (factor * scale),
    });
}

/// Jump countdown and trigger handling.
pub fn control_jump(
    time: Res<Time>,
    mut q_motors: Query<(
        &mut CharacterMotor,
        &mut MotionState,
        &mut MovementIntent,
        &MotorConfig,
    )>,
) {
    let dt = time.delta_secs();
    for (mut motor, mut state, mut intent, config) in &mut q_motors {
        if motor.lock_movement {
            continue;
        }

        // Countdown first: a fresh trigger only starts holding the upward
        // velocity on the following tick.
        if state.jumping {
            match motor.jump_timer {
                Some(remaining) => {
                    let remaining = remaining - dt;
                    if remaining <= 0.0 {
                        motor.jump_timer = None;
                        state.jumping = false;
                    } else {
                        motor.jump_timer = Some(remaining);
                    }
                }
                None => state.jumping = false,
            }
            // The expiring tick still gets the held velocity.
            motor.push_command(VelocityCommand::SetVertical {
                speed: config.jumping.height,
            });
        }

        let requested = intent.take_jump();
        if requested && state.grounded && !state.jumping {
            motor.jump_timer = Some(config.jumping.timer);
            state.jumping = true;
        }
    }
}

/// Shape the free/strafe input channels and rotate the body.
pub fn control_locomotion(
    time: Res<Time>,
    mut q_motors: Query<(
        &mut CharacterMotor,
        &mut MotionState,
        &MovementIntent,
        &MotorConfig,
        &mut Transform,
        Option<&MotionReference>,
    )>,
    q_frames: Query<&GlobalTransform, Without<CharacterMotor>>,
) {
    let dt = time.delta_secs();
    for (mut motor, mut state, intent, config, mut transform, reference) in &mut q_motors {
        if motor.lock_movement {
            continue;
        }

        state.strafing = config.locomotion.mode == LocomotionMode::Strafe;

        if state.strafing {
            motor.speed = intent.axes.y.clamp(-1.0, 1.0);
            motor.direction = intent.axes.x.clamp(-1.0, 1.0);

            if let Some(frame) = reference.and_then(|r| q_frames.get(r.0).ok()) {
                let (_, rotation, _) = frame.to_scale_rotation_translation();
                let (reference_yaw, _, _) = rotation.to_euler(EulerRot::YXZ);
                let goal = Quat::from_rotation_y(reference_yaw);
                let t = (config.locomotion.strafe_rotation_speed * dt).clamp(0.0, 1.0);
                transform.rotation = transform.rotation.slerp(goal, t);
            }
        } else {
            motor.speed = motor.move_amount;
            motor.direction = 0.0;

            if motor.move_amount > 0.0 && motor.target_direction.length() > 0.1 {
                let look = motor.target_direction.normalize();
                let target_yaw = yaw_toward(look);
                let (current_yaw, _, _) = transform.rotation.to_euler(EulerRot::YXZ);

                if state.grounded || config.jumping.air_control {
                    let yaw_difference = target_yaw - current_yaw;
                    let mut yaw = current_yaw;
                    // Only an exactly-zero difference leaves the yaw alone.
                    if yaw_difference < 0.0 || yaw_difference > 0.0 {
                        yaw = target_yaw;
                    }
                    let goal = Quat::from_rotation_y(yaw);
                    let t = (config.locomotion.free_rotation_speed * dt).clamp(0.0, 1.0);
                    transform.rotation = transform.rotation.slerp(goal, t);
                }
            }
        }
    }
}

/// Sprint flag and the ±2 channel boost.
pub fn control_sprint(
    mut q_motors: Query<(&mut CharacterMotor, &mut MotionState, &MovementIntent), With<MotorConfig>>,
) {
    for (mut motor, mut state, intent) in &mut q_motors {
        if motor.lock_movement {
            continue;
        }

        state.sprinting = intent.sprint_held;
        if motor.move_amount > 0.0 && state.sprinting {
            if motor.speed > 0.0 {
                motor.speed = 2.0;
            } else if motor.speed < 0.0 {
                motor.speed = -2.0;
            }
            if motor.direction > 0.0 {
                motor.direction = 2.0;
            } else if motor.direction < 0.0 {
                motor.direction = -2.0;
            }
        }
    }
}

/// Crouch toggling and the smoothed crouch fraction.
///
/// Standing back up requires headroom; the backend's clearance probe keeps
/// `headroom_clear` current.
pub fn control_crouch(
    time: Res<Time>,
    mut q_motors: Query<(
        &mut CharacterMotor,
        &mut MotionState,
        &mut MovementIntent,
        &MotorConfig,
    )>,
) {
    let dt = time.delta_secs();
    for (mut motor, mut state, mut intent, config) in &mut q_motors {
        if motor.lock_movement {
            continue;
        }

        if intent.take_crouch() {
            if !state.crouching {
                state.crouching = true;
            } else if motor.headroom_clear {
                state.crouching = false;
            }
        }

        let target = if state.crouching { 1.0 } else { 0.0 };
        let t = (config.crouching.smooth * dt).clamp(0.0, 1.0);
        motor.crouch_fraction += (target - motor.crouch_fraction) * t;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn yaw_faces_negative_z_at_zero() {
        assert!(yaw_toward(Vec3::NEG_Z).abs() < 1e-6);
    }

    #[test]
    fn yaw_faces_positive_x_at_minus_half_pi() {
        let yaw = yaw_toward(Vec3::X);
        let forward = Quat::from_rotation_y(yaw) * Vec3::NEG_Z;
        assert!((forward - Vec3::X).length() < 1e-5);
        assert!((yaw + FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn yaw_roundtrips_arbitrary_directions() {
        for dir in [
            Vec3::new(0.3, 0.0, 0.7),
            Vec3::new(-0.5, 0.0, 0.2),
            Vec3::new(-1.0, 0.0, -1.0),
        ] {
            let dir = dir.normalize();
            let forward = Quat::from_rotation_y(yaw_toward(dir)) * Vec3::NEG_Z;
            assert!((forward - dir).length() < 1e-5, "dir {dir:?}");
        }
    }
}
